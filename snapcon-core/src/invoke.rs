//! Spawning external programs.
//!
//! Arguments always travel as a vector straight to `execve`; nothing here
//! goes through a shell, so spaces, globs and metacharacters in config names,
//! descriptions or paths reach snapper verbatim.

use crate::error::{Error, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Turns a non-zero exit into [`Error::CommandFailed`].
    pub fn into_success(self, program: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        let stderr = self.stderr_text();
        warn!(program, code = ?self.code, %stderr, "command failed");
        Err(Error::CommandFailed {
            program: program.to_string(),
            code: self.code,
            stderr,
        })
    }
}

/// Runs one external program to completion.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs programs on the host with [`std::process::Command`].
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills the child and fails with [`Error::TimedOut`] once `timeout` passes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn spawn_error(program: &str, source: std::io::Error) -> Error {
        Error::Spawn {
            program: program.to_string(),
            source,
        }
    }

    fn run_with_deadline(&self, program: &str, mut child: Child, limit: Duration) -> Result<CommandOutput> {
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let started = Instant::now();

        let timed_out = || Error::TimedOut {
            program: program.to_string(),
            after: limit,
        };

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= limit {
                // Whatever was printed so far is discarded: a killed snapper
                // may have written half a table.
                let _ = child.kill();
                let _ = child.wait();
                warn!(program, ?limit, "command timed out, killed");
                return Err(timed_out());
            }
            thread::sleep(POLL_INTERVAL);
        };

        // A process the child left behind can hold the pipes open after the
        // child exits; the deadline still applies to reading them.
        for reader in [&stdout, &stderr] {
            while !reader.is_finished() {
                if started.elapsed() >= limit {
                    warn!(program, ?limit, "command output still open at deadline");
                    return Err(timed_out());
                }
                thread::sleep(POLL_INTERVAL);
            }
        }

        Ok(CommandOutput {
            stdout: collect(stdout)?,
            stderr: collect(stderr)?,
            code: status.code(),
        })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");

        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());

        let output = match self.timeout {
            None => {
                let output = command
                    .output()
                    .map_err(|e| Self::spawn_error(program, e))?;
                CommandOutput {
                    stdout: output.stdout,
                    stderr: output.stderr,
                    code: output.status.code(),
                }
            }
            Some(limit) => {
                let child = command
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(|e| Self::spawn_error(program, e))?;
                self.run_with_deadline(program, child, limit)?
            }
        };

        debug!(
            program,
            code = ?output.code,
            stdout_bytes = output.stdout.len(),
            "command finished"
        );
        Ok(output)
    }
}

// Pipes are read on their own threads so a chatty child never blocks on a
// full pipe while we poll for its exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    let bytes = handle
        .join()
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "pipe reader panicked"))??;
    Ok(bytes)
}
