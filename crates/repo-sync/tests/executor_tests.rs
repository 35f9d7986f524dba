//! GitCli behaviour against stand-in executables, plus output trimming

use std::ffi::OsStr;

use proptest::prelude::*;
use repo_sync::exec::trim_output;

proptest! {
    #[test]
    fn test_trim_strips_blank_lines_and_spaces(
        prefix in "[ \n]*",
        body in "[a-z0-9]([a-z0-9 \n]*[a-z0-9])?",
        suffix in "[ \n]*",
    ) {
        let trimmed = trim_output(&format!("{prefix}{body}{suffix}"));
        prop_assert_eq!(trimmed, body);
    }

    #[test]
    fn test_trim_never_leaves_edge_whitespace(raw in "\\PC*") {
        let trimmed = trim_output(&raw);
        prop_assert!(!trimmed.starts_with([' ', '\n', '\r']));
        prop_assert!(!trimmed.ends_with([' ', '\n', '\r']));
    }
}

#[cfg(unix)]
mod stand_in {
    use super::*;

    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;
    use repo_sync::{Error, GitCli, GitExecutor};
    use tempfile::TempDir;

    /// Write an executable shell script standing in for git.
    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-git");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn args<'a>(parts: &'a [&'a str]) -> Vec<&'a OsStr> {
        parts.iter().map(OsStr::new).collect()
    }

    #[test]
    fn test_stdout_is_trimmed() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_path(script(temp.path(), r#"printf '\n\n  %s  \n\n' "$*""#));

        let out = git.execute(None, &args(&["rev-parse", "HEAD"])).unwrap();
        assert_eq!(out, "rev-parse HEAD");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        fs::create_dir(&work).unwrap();
        let git = GitCli::with_path(script(temp.path(), "pwd -P"));

        let out = git.execute(Some(&work), &args(&["status"])).unwrap();
        assert_eq!(PathBuf::from(out), work.canonicalize().unwrap());
    }

    #[test]
    fn test_non_zero_exit_carries_stderr_and_command() {
        let temp = TempDir::new().unwrap();
        let path = script(temp.path(), "echo 'fatal: no such remote' >&2\nexit 3");
        let git = GitCli::with_path(&path);

        let err = git
            .execute(None, &args(&["remote", "rm", "origin"]))
            .unwrap_err();

        match err {
            Error::ExecutionFailed {
                command,
                stderr,
                exit,
            } => {
                assert_eq!(command, format!("{} remote rm origin", path.display()));
                assert_eq!(stderr, b"fatal: no such remote\n");
                assert_eq!(exit.code, Some(3));
            }
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_signal_is_reported() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_path(script(temp.path(), "kill -9 $$"));

        let err = git.execute(None, &args(&["fetch"])).unwrap_err();
        let exit = err.exit().copied().expect("expected ExecutionFailed");
        assert_eq!(exit.code, None);
        assert_eq!(exit.signal, Some(9));
    }

    #[test]
    fn test_large_output_on_both_streams_does_not_block() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::with_path(script(
            temp.path(),
            "head -c 1048576 /dev/zero | tr '\\0' 'e' >&2\nhead -c 1048576 /dev/zero | tr '\\0' 'o'",
        ));

        let out = git.execute(None, &args(&["fetch"])).unwrap();
        assert_eq!(out.len(), 1_048_576);
        assert!(out.bytes().all(|b| b == b'o'));
    }

    #[test]
    fn test_non_executable_is_raw_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("not-executable");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        let git = GitCli::with_path(&path);

        let err = git.execute(None, &args(&["status"])).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
