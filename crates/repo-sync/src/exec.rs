//! Command execution boundary for git invocations

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Capability to run git with an argument vector.
///
/// Everything version-control specific sits behind this trait so the
/// clone/sync decision logic can be driven by a fake in tests.
pub trait GitExecutor {
    /// Run git with `args` in `working_dir` (`None` inherits the caller's
    /// current directory) and return its trimmed standard output.
    ///
    /// A non-zero exit is reported as [`Error::ExecutionFailed`]; failures to
    /// launch or wait on the process surface as [`Error::Io`].
    fn execute(&self, working_dir: Option<&Path>, args: &[&OsStr]) -> Result<String>;
}

impl<T: GitExecutor + ?Sized> GitExecutor for &T {
    fn execute(&self, working_dir: Option<&Path>, args: &[&OsStr]) -> Result<String> {
        (**self).execute(working_dir, args)
    }
}

/// [`GitExecutor`] backed by the `git` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    path: PathBuf,
}

impl GitCli {
    /// Locate `git` on the executable search path.
    pub fn new() -> Result<Self> {
        let path = which::which("git")?;
        tracing::debug!(git = %path.display(), "Located git executable");
        Ok(Self { path })
    }

    /// Use an explicit git executable instead of searching `PATH`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn git_path(&self) -> &Path {
        &self.path
    }

    pub fn set_git_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    fn command_line(&self, args: &[&OsStr]) -> String {
        std::iter::once(self.path.as_os_str())
            .chain(args.iter().copied())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl GitExecutor for GitCli {
    fn execute(&self, working_dir: Option<&Path>, args: &[&OsStr]) -> Result<String> {
        let mut cmd = Command::new(&self.path);
        cmd.args(args);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            command = %self.command_line(args),
            cwd = ?working_dir,
            "Executing git"
        );

        // `output` reads stdout and stderr concurrently before reaping the
        // child, so neither pipe can fill up and stall git.
        let output = cmd.output()?;

        if !output.status.success() {
            return Err(Error::ExecutionFailed {
                command: self.command_line(args),
                stderr: output.stderr,
                exit: output.status.into(),
            });
        }

        Ok(trim_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Strip surrounding spaces and line breaks from command output.
///
/// Carriage returns count as line breaks, so CRLF output trims the same
/// as LF output.
pub fn trim_output(raw: &str) -> String {
    raw.trim_matches(|c| matches!(c, ' ' | '\n' | '\r')).to_string()
}
