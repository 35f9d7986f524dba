//! Error types for repo-sync

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Result type for repo-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing a working copy
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path exists and is not a directory: {}", .path.display())]
    PathIsNotADirectory { path: PathBuf },

    #[error("Directory exists and is not a git repository: {}", .path.display())]
    DirectoryIsNotARepository { path: PathBuf },

    #[error("Command '{command}' failed ({exit}). Standard error was:\n{}", lossy(.stderr))]
    ExecutionFailed {
        command: String,
        stderr: Vec<u8>,
        exit: ExitInfo,
    },

    #[error("Could not locate git executable: {0}")]
    GitNotFound(#[from] which::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::PathIsNotADirectory { path: path.into() }
    }

    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryIsNotARepository { path: path.into() }
    }

    /// The offending path for the path-shape errors.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathIsNotADirectory { path } | Self::DirectoryIsNotARepository { path } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }

    /// The reconstructed command line of a failed git invocation.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { command, .. } => Some(command.as_str()),
            _ => None,
        }
    }

    /// Captured standard error of a failed git invocation.
    pub fn stderr(&self) -> Option<&[u8]> {
        match self {
            Self::ExecutionFailed { stderr, .. } => Some(stderr.as_slice()),
            _ => None,
        }
    }

    pub fn exit(&self) -> Option<&ExitInfo> {
        match self {
            Self::ExecutionFailed { exit, .. } => Some(exit),
            _ => None,
        }
    }

    /// Whether re-running the whole procedure could succeed.
    ///
    /// Git failures and raw I/O errors may be transient (network, locks).
    /// A path of the wrong shape or a missing git binary needs an operator.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExecutionFailed { .. } | Self::Io(_))
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

/// How a git process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    /// Exit code, absent when the process was terminated by a signal
    pub code: Option<i32>,

    /// Terminating signal (unix only)
    pub signal: Option<i32>,
}

impl ExitInfo {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }
}

impl From<ExitStatus> for ExitInfo {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "terminated by signal {}", signal),
            (None, None) => write!(f, "unknown exit status"),
        }
    }
}
