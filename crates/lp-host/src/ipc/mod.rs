//! IPC (Inter-Process Communication) via Unix sockets
//!
//! The control UI and the display windows talk to the host through
//! length-prefixed JSON frames (u32 little-endian length, then the payload)
//! over a Unix domain socket.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::Command;

mod client;
mod server;

pub use client::IpcClient;
pub use server::IpcServer;

/// Maximum frame size (10 MiB) to prevent memory exhaustion
pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

const SOCKET_RELATIVE_PATH: &str = "liveprojector/control.sock";

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Message too large: {len} bytes (max: {max})")]
    TooLarge { len: usize, max: usize },
}

/// A request as it arrives on the wire: the command plus an optional id the
/// response will echo back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub command: Command,
}

/// Get default socket path (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_socket_path() -> Result<PathBuf> {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(runtime_dir).join(SOCKET_RELATIVE_PATH));
    }

    let cache = dirs::cache_dir()
        .context("Failed to determine cache directory (no XDG_RUNTIME_DIR or HOME)")?;
    Ok(cache.join(SOCKET_RELATIVE_PATH))
}

/// Write one length-prefixed JSON frame.
pub async fn write_frame<W, T>(writer: &mut W, msg: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(msg).context("Failed to serialize message to JSON")?;
    if json.len() > MAX_MESSAGE_SIZE {
        return Err(FrameError::TooLarge {
            len: json.len(),
            max: MAX_MESSAGE_SIZE,
        }
        .into());
    }

    let len = json.len() as u32;
    writer
        .write_all(&len.to_le_bytes())
        .await
        .context("Failed to write message length")?;
    writer
        .write_all(&json)
        .await
        .context("Failed to write message payload")?;
    writer.flush().await.context("Failed to flush stream")?;

    Ok(())
}

/// Read one frame's raw payload. `Ok(None)` means the peer closed the
/// connection cleanly between frames.
pub async fn read_frame_bytes<R>(reader: &mut R) -> Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e).context("Failed to read message length"),
    }
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_MESSAGE_SIZE {
        return Err(FrameError::TooLarge {
            len,
            max: MAX_MESSAGE_SIZE,
        }
        .into());
    }

    let mut json_buf = vec![0u8; len];
    reader
        .read_exact(&mut json_buf)
        .await
        .context("Failed to read message payload")?;
    Ok(Some(json_buf))
}

/// Read and deserialize one frame.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<Option<T>>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    match read_frame_bytes(reader).await? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .context("Failed to deserialize message from JSON"),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn frames_survive_a_duplex_pipe() {
        let (mut a, mut b) = tokio::io::duplex(1024);

        write_frame(&mut a, &json!({ "command": "ping", "id": 1 }))
            .await
            .unwrap();
        drop(a);

        let value: Value = read_frame(&mut b).await.unwrap().unwrap();
        assert_eq!(value["command"], "ping");
        assert!(read_frame::<_, Value>(&mut b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oversized_length_prefix_is_rejected() {
        let (mut a, mut b) = tokio::io::duplex(64);
        let len = (MAX_MESSAGE_SIZE as u32) + 1;
        a.write_all(&len.to_le_bytes()).await.unwrap();

        let err = read_frame_bytes(&mut b).await.unwrap_err();
        assert!(err.downcast_ref::<FrameError>().is_some());
    }

    #[test]
    fn envelope_flattens_command_next_to_id() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "id": 3,
            "command": "set-locked",
            "payload": { "surface": "C", "locked": true }
        }))
        .unwrap();

        assert_eq!(envelope.id, Some(3));
        assert_eq!(envelope.command.name(), "set-locked");
    }
}
