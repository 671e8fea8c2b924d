//! JSONL event log
//!
//! [`EventLog`] is a listener that forwards every event over an unbounded
//! channel to a background task, which appends one JSON object per line to a
//! file. Sending never blocks the board lock. The writer drains the channel
//! and exits once every [`EventLog`] clone has been dropped.

use std::path::PathBuf;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::{GameEvent, GameListener};

#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<GameEvent>,
}

/// Handle to the background writer task.
#[derive(Debug)]
pub struct EventLogWriter {
    handle: JoinHandle<std::io::Result<u64>>,
}

impl EventLogWriter {
    /// Wait for the writer to flush and exit. Returns the number of lines written.
    ///
    /// Only completes after every [`EventLog`] sender is gone.
    pub async fn finish(self) -> std::io::Result<u64> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
        }
    }
}

impl EventLog {
    /// Open (append) `path` and start the writer on `runtime`.
    pub fn spawn(path: impl Into<PathBuf>, runtime: &Handle) -> (Self, EventLogWriter) {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<GameEvent>();

        let handle = runtime.spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;

            let mut buf: Vec<u8> = Vec::with_capacity(256);
            let mut written = 0u64;

            while let Some(event) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &event).is_err() {
                    continue;
                }
                buf.push(b'\n');
                file.write_all(&buf).await?;
                written += 1;
            }

            file.flush().await?;
            Ok::<u64, std::io::Error>(written)
        });

        (Self { tx }, EventLogWriter { handle })
    }
}

impl GameListener for EventLog {
    fn on_event(&self, event: &GameEvent) {
        // Writer gone (file error): drop the event.
        let _ = self.tx.send(event.clone());
    }
}
