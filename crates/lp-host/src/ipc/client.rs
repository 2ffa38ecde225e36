use std::collections::VecDeque;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use lp_app::ProjectionEvent;
use serde_json::Value;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;

use super::{read_frame, write_frame, RequestEnvelope};
use crate::commands::{Command, CommandResponse};

/// Client side of the host socket, used by tooling and tests.
///
/// Events pushed while waiting for a response are queued and handed out by
/// [`IpcClient::next_event`].
pub struct IpcClient {
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
    next_id: u64,
    pending_events: VecDeque<ProjectionEvent>,
}

impl IpcClient {
    pub async fn connect_to(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .await
            .with_context(|| format!("Failed to connect to host at {}", path.display()))?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader,
            writer,
            next_id: 1,
            pending_events: VecDeque::new(),
        })
    }

    /// Send `command` and wait for its response.
    pub async fn request(&mut self, command: Command) -> Result<CommandResponse> {
        let id = self.next_id;
        self.next_id += 1;

        let envelope = RequestEnvelope {
            id: Some(id),
            command,
        };
        write_frame(&mut self.writer, &envelope).await?;

        loop {
            let frame = self.read_value().await?;
            if let Some(event) = frame.get("event") {
                self.pending_events
                    .push_back(serde_json::from_value(event.clone()).context("Invalid event frame")?);
                continue;
            }
            if frame.get("id").and_then(Value::as_u64) == Some(id) {
                return serde_json::from_value(frame).context("Invalid response frame");
            }
        }
    }

    /// Next pushed event, waiting if none is queued.
    pub async fn next_event(&mut self) -> Result<ProjectionEvent> {
        if let Some(event) = self.pending_events.pop_front() {
            return Ok(event);
        }
        loop {
            let frame = self.read_value().await?;
            if let Some(event) = frame.get("event") {
                return serde_json::from_value(event.clone()).context("Invalid event frame");
            }
        }
    }

    async fn read_value(&mut self) -> Result<Value> {
        read_frame(&mut self.reader)
            .await?
            .ok_or_else(|| anyhow!("Host closed the connection"))
    }
}
