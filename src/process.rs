//! One seat's external process, wired for line exchanges.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::trace;

use crate::error::MatchError;

pub(crate) struct PlayerProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl PlayerProcess {
    /// Launches `command` through `/bin/sh -c`, so entrants may be whole
    /// shell commands. The seat's stderr goes to `stderr_log` when given
    /// and is discarded otherwise.
    pub(crate) fn launch(command: &str, stderr_log: Option<&Path>) -> anyhow::Result<PlayerProcess> {
        let stderr = match stderr_log {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("cannot create stderr log {}", path.display()))?;
                Stdio::from(file)
            }
            None => Stdio::null(),
        };
        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
            .with_context(|| format!("cannot launch player command {command:?}"))?;
        let stdin = child.stdin.take().expect("stdin was piped");
        let stdout = BufReader::new(child.stdout.take().expect("stdout was piped"));
        Ok(PlayerProcess {
            child,
            stdin,
            stdout,
        })
    }

    /// Writes one protocol line. Any write failure means the pipe is gone.
    pub(crate) fn send_line(&mut self, line: &str) -> Result<(), MatchError> {
        trace!(%line, "send");
        writeln!(self.stdin, "{line}").map_err(|_| MatchError::PipeClosed)?;
        self.stdin.flush().map_err(|_| MatchError::PipeClosed)
    }

    /// Reads one reply line, measuring how long the seat took to produce
    /// it. End of stream yields an empty line for the caller to reject.
    pub(crate) fn read_line_timed(&mut self) -> Result<(String, Duration), MatchError> {
        let start = Instant::now();
        let mut line = String::new();
        self.stdout
            .read_line(&mut line)
            .map_err(|_| MatchError::PipeClosed)?;
        let elapsed = start.elapsed();
        let line = line.trim().to_owned();
        trace!(%line, ?elapsed, "received");
        Ok((line, elapsed))
    }

    pub(crate) fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Waits for the process to exit. The write end of its stdin stays
    /// open, so entrants are expected to leave on the quit line.
    pub(crate) fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait()
    }
}

impl Drop for PlayerProcess {
    fn drop(&mut self) {
        // Zombie prevention when a match aborts before the wait phase.
        if self.is_running() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
