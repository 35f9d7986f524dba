//! [`Upstream`] fixture: a remote repository plus room for sync targets.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A temporary directory holding an `upstream` repository with history on
/// `main`. Its path doubles as the clone URL.
///
/// # Example
///
/// ```rust,no_run
/// use repo_test_utils::Upstream;
///
/// let upstream = Upstream::new();
/// let target = upstream.target("checkout");
/// let next = upstream.commit("CHANGELOG.md", "v2");
/// assert_eq!(upstream.head(), next);
/// ```
pub struct Upstream {
    temp_dir: TempDir,
    initial_commit: String,
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new()
    }
}

impl Upstream {
    /// Create the upstream repository with one commit on `main`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let initial_commit = git::real_git_repo_with_commit(&temp_dir.path().join("upstream"));
        Self {
            temp_dir,
            initial_commit,
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the upstream repository.
    pub fn path(&self) -> PathBuf {
        self.root().join("upstream")
    }

    /// The upstream path as a string usable as a clone URL.
    pub fn url(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Id of the commit the upstream was created with.
    pub fn initial_commit(&self) -> &str {
        &self.initial_commit
    }

    /// Current tip of the upstream's checked-out branch.
    pub fn head(&self) -> String {
        git::head_commit(&self.path())
    }

    /// Advance the upstream's checked-out branch by one commit.
    pub fn commit(&self, name: &str, content: &str) -> String {
        git::commit_file(&self.path(), name, content)
    }

    /// Create `branch` at the current tip without switching to it.
    pub fn branch(&self, branch: &str) {
        git::run_git(&self.path(), &["branch", branch]);
    }

    /// Tag the current tip.
    pub fn tag(&self, tag: &str) {
        git::run_git(&self.path(), &["tag", tag]);
    }

    /// A not-yet-existing path next to the upstream, for use as a sync target.
    pub fn target(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }
}
