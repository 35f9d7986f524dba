//! Sync and apply command implementations

use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use colored::Colorize;

use repo_sync::{GitCli, GitExecutor, RepoSyncer, SyncRequest};

use crate::config::{Manifest, manifest_dir};
use crate::error::{CliError, Result};

/// Build a syncer for an explicit git path, or the git on PATH.
pub fn build_syncer(git: Option<&Path>) -> Result<RepoSyncer> {
    match git {
        Some(path) => Ok(RepoSyncer::with_git_path(path)),
        None => Ok(RepoSyncer::new()?),
    }
}

/// Run the sync command for a single working copy.
pub fn run_sync(
    git: Option<&Path>,
    location: &Path,
    url: &str,
    reference: &str,
    retries: u32,
) -> Result<()> {
    let syncer = build_syncer(git)?;
    let request = SyncRequest::new(location, url, reference);

    announce(&request);
    sync_with_retry(&syncer, &request, retries)?;
    println!(
        "{} {} is at {}",
        "OK".green().bold(),
        request.location.display().to_string().cyan(),
        request.reference.yellow()
    );
    Ok(())
}

/// Run the apply command for every repository in a manifest.
///
/// Every entry is attempted even after a failure.
pub fn run_apply(git: Option<&Path>, manifest_path: &Path, retries: u32) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let base = manifest_dir(manifest_path);
    let git: Option<PathBuf> = git
        .map(Path::to_path_buf)
        .or_else(|| manifest.git.resolved_path(&base));
    let syncer = build_syncer(git.as_deref())?;

    let requests = manifest.requests(&base);
    if requests.is_empty() {
        println!(
            "{} No repositories listed in {}",
            "=>".blue().bold(),
            manifest_path.display()
        );
        return Ok(());
    }

    let mut failed = 0;
    for request in &requests {
        announce(request);
        match sync_with_retry(&syncer, request, retries) {
            Ok(()) => println!("   {} {}", "OK".green().bold(), request.reference.yellow()),
            Err(e) => {
                failed += 1;
                println!("   {} {}", "FAILED".red().bold(), e);
            }
        }
    }

    println!();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{} of {} repositories failed to sync",
            failed,
            requests.len()
        )));
    }
    println!(
        "{} {} repositories in sync",
        "OK".green().bold(),
        requests.len()
    );
    Ok(())
}

/// Wait before the first retry; doubles up to [`MAX_RETRY_INTERVAL`].
pub const INITIAL_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Longest wait between two retries.
pub const MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Run a whole synchronization, retrying with exponential backoff while
/// the failure is retryable and attempts remain.
pub fn sync_with_retry<E: GitExecutor>(
    syncer: &RepoSyncer<E>,
    request: &SyncRequest,
    retries: u32,
) -> repo_sync::Result<()> {
    sync_with_backoff(syncer, request, retries, INITIAL_RETRY_INTERVAL)
}

/// [`sync_with_retry`] with an explicit first retry interval.
pub fn sync_with_backoff<E: GitExecutor>(
    syncer: &RepoSyncer<E>,
    request: &SyncRequest,
    retries: u32,
    initial_interval: Duration,
) -> repo_sync::Result<()> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(initial_interval)
        .with_multiplier(2.0)
        .with_max_interval(MAX_RETRY_INTERVAL.max(initial_interval))
        .with_max_elapsed_time(None)
        .build();

    let mut attempt = 0;
    backoff::retry(policy, || {
        attempt += 1;
        syncer.sync(request).map_err(|e| {
            if e.is_retryable() && attempt <= retries {
                tracing::warn!(
                    attempt,
                    retries,
                    location = %request.location.display(),
                    error = %e,
                    "Sync failed, retrying"
                );
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(e) => e,
        backoff::Error::Transient { err, .. } => err,
    })
}

fn announce(request: &SyncRequest) {
    println!(
        "{} Syncing {} from {} ({})",
        "=>".blue().bold(),
        request.location.display().to_string().cyan(),
        request.repository_url,
        request.reference.yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ffi::OsStr;

    use repo_sync::{Error, ExitInfo};

    /// Fails every git call, counting how many were made.
    struct AlwaysFails {
        calls: Cell<usize>,
        classified: bool,
    }

    impl GitExecutor for AlwaysFails {
        fn execute(&self, _: Option<&Path>, _: &[&OsStr]) -> repo_sync::Result<String> {
            self.calls.set(self.calls.get() + 1);
            if self.classified {
                Err(Error::ExecutionFailed {
                    command: "git clone".into(),
                    stderr: b"fatal: unable to access".to_vec(),
                    exit: ExitInfo::from_code(128),
                })
            } else {
                Err(Error::not_a_directory("/unreachable"))
            }
        }
    }

    /// Fails the first `failures` git calls, then succeeds.
    struct FailsFirst {
        calls: Cell<usize>,
        failures: usize,
    }

    impl FailsFirst {
        fn new(failures: usize) -> Self {
            Self {
                calls: Cell::new(0),
                failures,
            }
        }
    }

    impl GitExecutor for FailsFirst {
        fn execute(&self, _: Option<&Path>, _: &[&OsStr]) -> repo_sync::Result<String> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                Err(Error::ExecutionFailed {
                    command: "git clone".into(),
                    stderr: b"fatal: unable to access".to_vec(),
                    exit: ExitInfo::from_code(128),
                })
            } else {
                Ok(String::new())
            }
        }
    }

    const FAST: Duration = Duration::from_millis(1);

    fn absent_target() -> (tempfile::TempDir, SyncRequest) {
        let temp = tempfile::TempDir::new().unwrap();
        let request = SyncRequest::new(temp.path().join("checkout"), "https://x/y.git", "main");
        (temp, request)
    }

    #[test]
    fn test_no_retries_runs_once() {
        let (_temp, request) = absent_target();
        let syncer = RepoSyncer::with_executor(AlwaysFails {
            calls: Cell::new(0),
            classified: true,
        });

        let err = sync_with_retry(&syncer, &request, 0).unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert_eq!(syncer.executor().calls.get(), 1);
    }

    #[test]
    fn test_non_retryable_error_is_not_retried() {
        let (_temp, request) = absent_target();
        let syncer = RepoSyncer::with_executor(AlwaysFails {
            calls: Cell::new(0),
            classified: false,
        });

        let err = sync_with_retry(&syncer, &request, 5).unwrap_err();
        assert!(matches!(err, Error::PathIsNotADirectory { .. }));
        assert_eq!(syncer.executor().calls.get(), 1);
    }

    #[test]
    fn test_retry_reruns_whole_procedure() {
        let (_temp, request) = absent_target();
        let syncer = RepoSyncer::with_executor(FailsFirst::new(1));

        sync_with_backoff(&syncer, &request, 1, FAST).unwrap();
        // failed clone, then clone, fetch --tags, checkout
        assert_eq!(syncer.executor().calls.get(), 4);
    }

    #[test]
    fn test_zero_retries_returns_first_error() {
        let (_temp, request) = absent_target();
        let syncer = RepoSyncer::with_executor(FailsFirst::new(1));

        let err = sync_with_backoff(&syncer, &request, 0, FAST).unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert_eq!(syncer.executor().calls.get(), 1);
    }

    #[test]
    fn test_retries_exhausted_returns_last_error() {
        let (_temp, request) = absent_target();
        let syncer = RepoSyncer::with_executor(FailsFirst::new(usize::MAX));

        let err = sync_with_backoff(&syncer, &request, 2, FAST).unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert_eq!(syncer.executor().calls.get(), 3);
    }

    #[test]
    fn test_build_syncer_with_explicit_git() {
        let syncer = build_syncer(Some(Path::new("/opt/git/bin/git"))).unwrap();
        assert_eq!(syncer.executor().git_path(), Path::new("/opt/git/bin/git"));
    }

    #[test]
    fn test_apply_reports_missing_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = run_apply(
            Some(Path::new("git")),
            &temp.path().join("missing.toml"),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
