//! Scripted [`GitExecutor`] that records invocations instead of running git.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use repo_sync::{Error, ExitInfo, GitExecutor, Result};

/// One recorded git call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub cwd: Option<PathBuf>,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(cwd: Option<&Path>, args: &[&str]) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The arguments joined by spaces, e.g. `"remote rm origin"`.
    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

type Responder = Box<dyn Fn(&Invocation) -> Result<String>>;

/// Fake git that succeeds with empty output unless told otherwise.
pub struct ScriptedGit {
    calls: RefCell<Vec<Invocation>>,
    responder: Responder,
}

impl ScriptedGit {
    pub fn succeeding() -> Self {
        Self::responding(|_| Ok(String::new()))
    }

    pub fn responding(responder: impl Fn(&Invocation) -> Result<String> + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Fail with a classified error whenever the argument line starts with
    /// `prefix`; succeed otherwise.
    pub fn failing_on(prefix: &'static str) -> Self {
        Self::responding(move |call| {
            if call.line().starts_with(prefix) {
                Err(execution_failed(&call.line()))
            } else {
                Ok(String::new())
            }
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::line).collect()
    }
}

impl GitExecutor for ScriptedGit {
    fn execute(&self, working_dir: Option<&Path>, args: &[&OsStr]) -> Result<String> {
        let call = Invocation {
            cwd: working_dir.map(Path::to_path_buf),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        };
        self.calls.borrow_mut().push(call.clone());
        (self.responder)(&call)
    }
}

/// A classified failure as git would produce it for `line`.
pub fn execution_failed(line: &str) -> Error {
    Error::ExecutionFailed {
        command: format!("git {line}"),
        stderr: format!("fatal: {line} failed\n").into_bytes(),
        exit: ExitInfo::from_code(128),
    }
}

/// An unclassified failure, as when git cannot be launched.
pub fn launch_failed() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "permission denied",
    ))
}
