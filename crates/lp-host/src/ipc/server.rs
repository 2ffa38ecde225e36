use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use lp_app::{SurfaceInfo, WindowRole};
use lp_core::{LiveState, ProjectionState, SurfaceKey};
use serde::Serialize;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use super::{read_frame_bytes, write_frame, RequestEnvelope};
use crate::bootstrap::HostRuntime;
use crate::commands::{dispatch, Command, CommandResponse};
use crate::events::OutboundFrame;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Listening socket of the host process.
pub struct IpcServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl IpcServer {
    /// Bind to `socket_path`, replacing a stale socket file.
    pub fn bind_to(socket_path: PathBuf) -> Result<Self> {
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {}", parent.display()))?;
        }

        if socket_path.exists() {
            std::fs::remove_file(&socket_path).with_context(|| {
                format!("Failed to remove stale socket: {}", socket_path.display())
            })?;
        }

        let listener = UnixListener::bind(&socket_path)
            .with_context(|| format!("Failed to bind socket at {}", socket_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&socket_path, std::fs::Permissions::from_mode(0o700))
                .context("Failed to set socket permissions")?;
        }

        info!(path = %socket_path.display(), "ipc server listening");
        Ok(Self {
            listener,
            socket_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.socket_path
    }

    /// Accept connections until `shutdown` resolves.
    pub async fn serve_until<F>(&self, host: Arc<HostRuntime>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("ipc server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _addr)) => {
                        let connection = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
                        let host = host.clone();
                        tokio::spawn(
                            async move {
                                if let Err(err) = handle_connection(stream, host).await {
                                    warn!(error = %format!("{err:#}"), "connection ended with error");
                                }
                            }
                            .instrument(info_span!("connection", id = connection)),
                        );
                    }
                    Err(err) => warn!(error = %err, "failed to accept IPC connection"),
                },
            }
        }
    }

    /// Accept connections forever.
    pub async fn serve(&self, host: Arc<HostRuntime>) -> Result<()> {
        self.serve_until(host, std::future::pending()).await
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Reply to `subscribe`: the full picture the new observer starts from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribeSnapshot {
    role: WindowRole,
    live: LiveState,
    surfaces: Vec<SurfaceInfo>,
    states: BTreeMap<SurfaceKey, ProjectionState>,
}

struct ActiveSubscription {
    role: WindowRole,
    forwarder: JoinHandle<()>,
}

/// Per-connection observer state. Dropping it withdraws the subscription.
struct ConnectionSession {
    host: Arc<HostRuntime>,
    outbound: mpsc::UnboundedSender<OutboundFrame>,
    active: Option<ActiveSubscription>,
}

impl ConnectionSession {
    fn subscribe(&mut self, role: WindowRole) -> CommandResponse {
        self.unsubscribe();

        let mut subscription = self.host.projection().subscribe(role);
        let outbound = self.outbound.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                if outbound.send(OutboundFrame::event(event)).is_err() {
                    break;
                }
            }
        });

        if let WindowRole::Display(surface) = role {
            if let Some(is_open) = self.host.windows().display_connected(surface) {
                self.host.projection().window_changed(surface, is_open);
            }
        }
        info!(role = ?role, "observer subscribed");
        self.active = Some(ActiveSubscription { role, forwarder });

        let projection = self.host.projection();
        CommandResponse::success(SubscribeSnapshot {
            role,
            live: projection.get_live(),
            surfaces: projection.list_surfaces(),
            states: SurfaceKey::ALL
                .into_iter()
                .map(|surface| (surface, projection.get_state(surface)))
                .collect(),
        })
    }

    fn unsubscribe(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        active.forwarder.abort();

        if let WindowRole::Display(surface) = active.role {
            if let Some(is_open) = self.host.windows().display_disconnected(surface) {
                self.host.projection().window_changed(surface, is_open);
            }
        }
        debug!(role = ?active.role, "observer unsubscribed");
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

async fn handle_connection(stream: UnixStream, host: Arc<HostRuntime>) -> Result<()> {
    debug!("connection accepted");
    let (mut reader, mut writer) = stream.into_split();
    let (outbound, mut outbox) = mpsc::unbounded_channel::<OutboundFrame>();

    let writer_task = tokio::spawn(async move {
        while let Some(frame) = outbox.recv().await {
            if let Err(err) = write_frame(&mut writer, &frame).await {
                debug!(error = %err, "peer stopped reading");
                break;
            }
        }
    });

    let mut session = ConnectionSession {
        host: host.clone(),
        outbound: outbound.clone(),
        active: None,
    };

    let result = loop {
        let bytes = match read_frame_bytes(&mut reader).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => break Ok(()),
            Err(err) => break Err(err),
        };

        let frame = match serde_json::from_slice::<RequestEnvelope>(&bytes) {
            Ok(RequestEnvelope {
                id,
                command: Command::Subscribe { role },
            }) => OutboundFrame::response(id, session.subscribe(role)),
            Ok(RequestEnvelope { id, command }) => {
                OutboundFrame::response(id, dispatch(&host, command).await)
            }
            Err(err) => {
                warn!(error = %err, "malformed request");
                OutboundFrame::response(
                    request_id(&bytes),
                    CommandResponse::failure(format!("Invalid request: {err}")),
                )
            }
        };

        if outbound.send(frame).is_err() {
            break Ok(());
        }
    };

    drop(session);
    drop(outbound);
    let _ = writer_task.await;
    debug!("connection closed");
    result
}

/// Best-effort id of a request that failed to parse, so the caller can still
/// match the error to its request.
fn request_id(bytes: &[u8]) -> Option<u64> {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()?
        .get("id")?
        .as_u64()
}
