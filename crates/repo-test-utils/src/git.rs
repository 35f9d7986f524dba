//! Git repository fixtures at two realism levels: fake `.git` directories
//! and real repositories with history.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs;
//! fakes are faster and have fewer external dependencies.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Identity flags so commits work without any user or system config.
const IDENTITY: [&str; 6] = [
    "-c",
    "user.email=test@test.com",
    "-c",
    "user.name=Test User",
    "-c",
    "commit.gpgsign=false",
];

/// Creates a minimal `.git` directory whose `HEAD` is a symbolic ref to
/// `main`, **without** initialising a real git repository.
///
/// Realism level: **FAKE**, directory structure only, no git object store.
///
/// Use for: tests that need a `.git` marker to satisfy location checks or
/// `HEAD` parsing but never run git against the directory.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    write_fake_head(path, "ref: refs/heads/main\n");
}

/// Like [`fake_git_dir`], but `HEAD` holds the commit id `sha` directly.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_detached_git_dir(path: &Path, sha: &str) {
    write_fake_head(path, &format!("{sha}\n"));
}

fn write_fake_head(path: &Path, head: &str) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake git dir: failed to create .git/refs/heads: {e}"));
    fs::write(path.join(".git/HEAD"), head)
        .unwrap_or_else(|e| panic!("fake git dir: failed to write HEAD: {e}"));
}

/// Runs `git <args>` in `path` and returns its trimmed stdout.
///
/// # Panics
/// Panics if git cannot be launched or exits non-zero.
pub fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a real git repository with an initial commit using the `git`
/// CLI and returns the commit id.
///
/// Realism level: **REAL WITH HISTORY**, `main` branch, one commit.
///
/// Use for: tests that sync from or into a repository with history.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) -> String {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to create dir: {e}"));
    run_git(path, &["init"]);
    // Pin the branch name regardless of `init.defaultBranch`.
    run_git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    commit_file(path, "README.md", "# Test")
}

/// Writes `name` with `content`, commits it, and returns the new commit id.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_file(path: &Path, name: &str, content: &str) -> String {
    fs::write(path.join(name), content)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {name}: {e}"));
    run_git(path, &["add", name]);

    let mut args: Vec<&str> = IDENTITY.iter().copied().collect();
    args.extend(["commit", "-m"]);
    let message = format!("Update {name}");
    args.push(&message);
    run_git(path, &args);

    head_commit(path)
}

/// Id of the commit `HEAD` resolves to, read through `git2`.
///
/// # Panics
/// Panics if the repository cannot be opened or `HEAD` is unborn.
pub fn head_commit(path: &Path) -> String {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("head_commit: failed to open {}: {e}", path.display()));
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .unwrap_or_else(|e| panic!("head_commit: failed to resolve HEAD: {e}"));
    commit.id().to_string()
}

/// Short name of the checked-out branch, or `None` when `HEAD` is detached.
///
/// # Panics
/// Panics if the repository cannot be opened.
pub fn current_branch(path: &Path) -> Option<String> {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("current_branch: failed to open {}: {e}", path.display()));
    let detached = repo
        .head_detached()
        .unwrap_or_else(|e| panic!("current_branch: failed to read HEAD: {e}"));
    if detached {
        return None;
    }
    let head = repo.head().ok()?;
    head.shorthand().map(str::to_string)
}

/// URL configured for `remote`, if any.
///
/// # Panics
/// Panics if the repository cannot be opened.
pub fn remote_url(path: &Path, remote: &str) -> Option<String> {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("remote_url: failed to open {}: {e}", path.display()));
    let remote = repo.find_remote(remote).ok()?;
    remote.url().map(str::to_string)
}
