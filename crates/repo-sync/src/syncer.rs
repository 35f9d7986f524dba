//! Clone and sync procedures
//!
//! [`RepoSyncer`] classifies the target location, then runs the sequence of
//! git invocations that lands the working copy on the requested ref. Every
//! step fails fast; the only tolerated failure is removing an `origin`
//! remote that may not exist yet.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::exec::{GitCli, GitExecutor};
use crate::head::HeadKind;
use crate::location::{self, SyncAction};
use crate::{Error, Result, SyncRequest};

/// Name of the remote the syncer manages.
pub const ORIGIN: &str = "origin";

/// Reconciles local directories with remote git refs.
#[derive(Debug, Clone)]
pub struct RepoSyncer<E = GitCli> {
    executor: E,
}

impl RepoSyncer<GitCli> {
    /// Create a syncer that runs the `git` found on `PATH`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_executor(GitCli::new()?))
    }

    /// Create a syncer that runs the git executable at `path`.
    pub fn with_git_path(path: impl Into<PathBuf>) -> Self {
        Self::with_executor(GitCli::with_path(path))
    }

    pub fn set_git_path(&mut self, path: impl Into<PathBuf>) {
        self.executor.set_git_path(path);
    }
}

impl<E: GitExecutor> RepoSyncer<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Clone `repository_url` into `location` if it is absent, otherwise
    /// align the existing repository with the remote, then check out
    /// `reference`.
    pub fn sync_repository_to_remote_branch(
        &self,
        location: impl AsRef<Path>,
        repository_url: &str,
        reference: &str,
    ) -> Result<()> {
        self.sync(&SyncRequest::new(
            location.as_ref(),
            repository_url,
            reference,
        ))
    }

    pub fn sync(&self, request: &SyncRequest) -> Result<()> {
        match location::plan(request.location())? {
            SyncAction::Clone => self.clone_repository(request),
            SyncAction::Sync => self.sync_existing(request),
        }
    }

    fn clone_repository(&self, request: &SyncRequest) -> Result<()> {
        let location = request.location();
        info!(
            location = %location.display(),
            url = %request.repository_url,
            reference = %request.reference,
            "Cloning repository"
        );

        self.git(
            None,
            &[
                OsStr::new("clone"),
                OsStr::new(&request.repository_url),
                location.as_os_str(),
            ],
        )?;
        self.git(Some(location), &[OsStr::new("fetch"), OsStr::new("--tags")])?;
        self.git(
            Some(location),
            &[OsStr::new("checkout"), OsStr::new(&request.reference)],
        )?;

        info!(location = %location.display(), "Clone complete");
        Ok(())
    }

    fn sync_existing(&self, request: &SyncRequest) -> Result<()> {
        let location = request.location();
        info!(
            location = %location.display(),
            url = %request.repository_url,
            reference = %request.reference,
            "Syncing existing repository"
        );

        self.reset_origin(location)?;
        self.git(
            Some(location),
            &[
                OsStr::new("remote"),
                OsStr::new("add"),
                OsStr::new(ORIGIN),
                OsStr::new(&request.repository_url),
            ],
        )?;
        self.git(Some(location), &[OsStr::new("fetch"), OsStr::new(ORIGIN)])?;
        self.git(
            Some(location),
            &[OsStr::new("checkout"), OsStr::new(&request.reference)],
        )?;

        match HeadKind::read(location)? {
            HeadKind::Branch => {
                let remote_ref = request.remote_ref();
                self.git(
                    Some(location),
                    &[
                        OsStr::new("merge"),
                        OsStr::new("--ff-only"),
                        OsStr::new(&remote_ref),
                    ],
                )?;
            }
            HeadKind::Detached => {
                debug!(reference = %request.reference, "Detached checkout, nothing to merge");
            }
        }

        info!(location = %location.display(), "Sync complete");
        Ok(())
    }

    /// Remove `origin` so it can be re-added with the requested URL.
    ///
    /// Any non-zero exit is taken to mean the remote did not exist.
    fn reset_origin(&self, location: &Path) -> Result<()> {
        match self.git(
            Some(location),
            &[OsStr::new("remote"), OsStr::new("rm"), OsStr::new(ORIGIN)],
        ) {
            Ok(_) => Ok(()),
            Err(Error::ExecutionFailed { stderr, exit, .. }) => {
                debug!(
                    %exit,
                    stderr = %String::from_utf8_lossy(&stderr).trim_end(),
                    "Ignoring failure to remove origin"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn git(&self, working_dir: Option<&Path>, args: &[&OsStr]) -> Result<String> {
        self.executor.execute(working_dir, args)
    }
}
