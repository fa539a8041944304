//! Bounded remote probe
//!
//! Runs `git ls-remote --heads <url>` with terminal prompts disabled and all
//! output discarded; only the exit status counts. The child is polled until
//! the deadline and killed if it is still running, so nothing outlives the
//! call.

use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Command used to decide whether a URL answers like a git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new("git", ["ls-remote", "--heads"])
    }
}

impl CommandProbe {
    /// The URL is appended as the final argument
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the probe; any failure, non-zero exit or timeout is `false`.
    ///
    /// A zero timeout gives the probe no time at all: unless the child has
    /// already exited on the first poll, it is killed.
    pub fn run(&self, url: &str, timeout: Duration) -> bool {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match child {
            Ok(child) => wait_with_deadline(child, timeout),
            Err(e) => {
                debug!(program = %self.program, error = %e, "remote probe could not start");
                false
            }
        }
    }
}

fn wait_with_deadline(mut child: Child, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) => {}
            Err(e) => {
                debug!(error = %e, "remote probe wait failed");
                reap(&mut child);
                return false;
            }
        }

        if Instant::now() >= deadline {
            debug!(timeout_ms = timeout.as_millis() as u64, "remote probe timed out");
            reap(&mut child);
            return false;
        }

        thread::sleep(POLL_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
