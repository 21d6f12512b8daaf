//! Subprocess invocation of the git CLI
//!
//! Everything the tools do to a repository goes through [`GitRunner`],
//! so reconciler logic can be exercised against scripted outputs
//! instead of real checkouts.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Upper bound for a single git invocation.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Failure text reported when an invocation exceeds [`COMMAND_TIMEOUT`].
pub const TIMEOUT_MESSAGE: &str = "command execution timed out";

/// Normalized result of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutcome {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Trimmed stdout on success, trimmed stderr otherwise.
    pub output: String,
}

/// Runs git subcommands in a repository working directory.
pub trait GitRunner {
    fn run(&self, repo: &Path, args: &[&str]) -> CmdOutcome;
}

/// [`GitRunner`] backed by the real `git` executable.
pub struct CliRunner {
    timeout: Duration,
}

impl CliRunner {
    pub fn new() -> Self {
        Self {
            timeout: COMMAND_TIMEOUT,
        }
    }
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for CliRunner {
    fn run(&self, repo: &Path, args: &[&str]) -> CmdOutcome {
        debug!("git {} (in {})", args.join(" "), repo.display());

        let mut child = match Command::new("git")
            .args(args)
            .current_dir(repo)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return CmdOutcome {
                    success: false,
                    output: e.to_string(),
                };
            }
        };

        // Drain both pipes on background threads so a chatty command
        // cannot fill a pipe buffer and stall before it can exit.
        let stdout = child.stdout.take();
        let stdout_handle = thread::spawn(move || read_lines(stdout));
        let stderr = child.stderr.take();
        let stderr_handle = thread::spawn(move || read_lines(stderr));

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    let stdout = stdout_handle.join().unwrap_or_default();
                    let stderr = stderr_handle.join().unwrap_or_default();
                    return if status.success() {
                        CmdOutcome {
                            success: true,
                            output: stdout.trim().to_string(),
                        }
                    } else {
                        CmdOutcome {
                            success: false,
                            output: stderr.trim().to_string(),
                        }
                    };
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        warn!(
                            "git {} exceeded {}s, killing it",
                            args.join(" "),
                            self.timeout.as_secs()
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = stdout_handle.join();
                        let _ = stderr_handle.join();
                        return CmdOutcome {
                            success: false,
                            output: TIMEOUT_MESSAGE.to_string(),
                        };
                    }
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return CmdOutcome {
                        success: false,
                        output: e.to_string(),
                    };
                }
            }
        }
    }
}

fn read_lines(pipe: Option<impl Read>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let reader = BufReader::new(pipe);
    reader
        .lines()
        .map_while(Result::ok)
        .collect::<Vec<_>>()
        .join("\n")
}
