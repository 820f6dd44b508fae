//! External program execution with a hard time budget
//!
//! Status probes shell out to small system utilities (`git`, `df`, `free`,
//! `systemctl`, ...). A hung utility must never stall a page, so every call
//! goes through [`CommandRunner`], which kills the child once the timeout
//! elapses. Dropping the returned future (client went away) kills it too.

use crate::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default time budget for one external program
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs external programs and captures their stdout
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `program args...` and return stdout as text
    ///
    /// Fails on spawn errors, non-zero exit, timeout, or non-UTF-8 output.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        self.run_with(program, args, None).await
    }

    /// Like [`run`](Self::run) with the working directory set to `dir`
    pub async fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<String> {
        self.run_with(program, args, Some(dir)).await
    }

    async fn run_with(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<String> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        debug!("Running {} {}", program, args.join(" "));

        let child = command.spawn().map_err(|e| Error::CommandFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::CommandTimeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match output.status.code() {
                Some(code) => format!("exit code {}: {}", code, stderr.trim()),
                None => format!("terminated by signal: {}", stderr.trim()),
            };
            return Err(Error::CommandFailed {
                program: program.to_string(),
                reason,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| Error::CommandFailed {
            program: program.to_string(),
            reason: format!("non UTF-8 output: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let runner = CommandRunner::default();
        let err = runner
            .run("zwc-definitely-not-a-program", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = CommandRunner::default();
        let out = runner.run("echo", &["hello", "world"]).await.unwrap();
        assert_eq!(out, "hello world\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_an_error() {
        let runner = CommandRunner::default();
        let err = runner.run("false", &[]).await.unwrap_err();
        match err {
            Error::CommandFailed { program, reason } => {
                assert_eq!(program, "false");
                assert!(reason.contains("exit code 1"), "reason was {}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_program_times_out() {
        let runner = CommandRunner::new(Duration::from_millis(100));
        let started = std::time::Instant::now();
        let err = runner.run("sleep", &["5"]).await.unwrap_err();
        assert!(matches!(err, Error::CommandTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_in_sets_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::default();
        let out = runner.run_in(dir.path(), "pwd", &[]).await.unwrap();
        let reported = std::fs::canonicalize(out.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}
