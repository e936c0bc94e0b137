//! Line input for the arena, fed from a dedicated reader thread.
//!
//! Stdin is read on a plain OS thread rather than tokio's blocking pool, so
//! runtime shutdown (Ctrl+C mid-prompt) never waits on a blocked `read`.

use std::io::BufRead;
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::debug;

/// Lines are consumed one prompt at a time; a small buffer is plenty.
const LINE_BUFFER: usize = 16;

/// Async stream of input lines, without their trailing newline.
pub struct InputLines {
    rx: mpsc::Receiver<std::io::Result<String>>,
}

impl InputLines {
    /// Forward stdin line by line from a thread named `stdin-reader`.
    pub fn spawn_stdin() -> Result<Self> {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);

        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let failed = line.is_err();
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
                debug!("stdin reader stopped");
            })
            .context("failed to spawn stdin reader thread")?;

        Ok(Self { rx })
    }

    /// Input that is already closed, for matches without a human seat.
    pub fn empty() -> Self {
        let (_, rx) = mpsc::channel(1);
        Self { rx }
    }

    #[cfg(test)]
    pub fn from_receiver(rx: mpsc::Receiver<std::io::Result<String>>) -> Self {
        Self { rx }
    }

    /// Fixed lines followed by end of input.
    #[cfg(test)]
    pub fn from_lines(lines: &[&str]) -> Self {
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            // Capacity covers every line
            let _ = tx.try_send(Ok(line.to_string()));
        }
        Self::from_receiver(rx)
    }

    /// Next line, or `None` once the input is closed.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        match self.rx.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(e).context("failed to read input"),
            None => Ok(None),
        }
    }
}
