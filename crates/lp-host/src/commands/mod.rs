//! Host commands: one per runtime operation.
//! 宿主命令：每个运行时操作对应一个命令。
//!
//! Requests arrive as `{"command": "<kebab-name>", "payload": {...}}`.
//! Responses are `{"ok": true, "data": ...}`, `{"ok": false, "reason": ...}`
//! for refusals, or `{"ok": false, "error": "..."}` for failures.

pub mod error;
pub mod live;
pub mod projection;

use lp_app::WindowRole;
use lp_core::{
    AppearancePatch, LivePatch, MediaPayload, MirrorMode, MutationOutcome, PlanId, PlanItem,
    ProjectionMode, ProjectionPatch, RefusalReason, SurfaceKey, TextPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use crate::bootstrap::HostRuntime;
use error::map_err;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "command", content = "payload", rename_all = "kebab-case")]
pub enum Command {
    // ----- projection -----
    GetState {
        surface: SurfaceKey,
    },
    SetState {
        surface: SurfaceKey,
        patch: ProjectionPatch,
    },
    SetContentText {
        surface: SurfaceKey,
        #[serde(flatten)]
        content: TextPayload,
    },
    SetContentMedia {
        surface: SurfaceKey,
        #[serde(flatten)]
        content: MediaPayload,
    },
    SetMode {
        surface: SurfaceKey,
        mode: ProjectionMode,
    },
    SetAppearance {
        surface: SurfaceKey,
        #[serde(flatten)]
        patch: AppearancePatch,
    },
    SetMirror {
        surface: SurfaceKey,
        mode: MirrorMode,
    },
    ListSurfaces,

    // ----- live -----
    GetLive,
    SetLive(LivePatch),
    Next,
    Prev,
    SetCursor {
        cursor: i64,
    },
    SetTarget {
        target: String,
    },
    Toggle,
    ToggleBlack,
    ToggleWhite,
    Resume,
    SetLocked {
        surface: SurfaceKey,
        locked: bool,
    },
    #[serde(rename_all = "camelCase")]
    GoLive {
        plan_id: PlanId,
        #[serde(default)]
        cursor: Option<i64>,
    },
    ProjectItem {
        #[serde(default)]
        target: Option<String>,
        item: PlanItem,
    },

    // ----- windows -----
    OpenSurface {
        surface: SurfaceKey,
    },
    CloseSurface {
        surface: SurfaceKey,
    },
    Subscribe {
        role: WindowRole,
    },
    Ping,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetState { .. } => "get-state",
            Command::SetState { .. } => "set-state",
            Command::SetContentText { .. } => "set-content-text",
            Command::SetContentMedia { .. } => "set-content-media",
            Command::SetMode { .. } => "set-mode",
            Command::SetAppearance { .. } => "set-appearance",
            Command::SetMirror { .. } => "set-mirror",
            Command::ListSurfaces => "list-surfaces",
            Command::GetLive => "get-live",
            Command::SetLive(_) => "set-live",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::SetCursor { .. } => "set-cursor",
            Command::SetTarget { .. } => "set-target",
            Command::Toggle => "toggle",
            Command::ToggleBlack => "toggle-black",
            Command::ToggleWhite => "toggle-white",
            Command::Resume => "resume",
            Command::SetLocked { .. } => "set-locked",
            Command::GoLive { .. } => "go-live",
            Command::ProjectItem { .. } => "project-item",
            Command::OpenSurface { .. } => "open-surface",
            Command::CloseSurface { .. } => "close-surface",
            Command::Subscribe { .. } => "subscribe",
            Command::Ping => "ping",
        }
    }
}

/// Wire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefusalReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                ok: true,
                data: Some(data),
                reason: None,
                error: None,
            },
            Err(err) => Self::failure(format!("Failed to serialize response: {err}")),
        }
    }

    pub fn refused(reason: RefusalReason) -> Self {
        Self {
            ok: false,
            data: None,
            reason: Some(reason),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            reason: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result<T: Serialize>(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(map_err(err)),
        }
    }
}

impl From<MutationOutcome> for CommandResponse {
    fn from(outcome: MutationOutcome) -> Self {
        match outcome.reason {
            Some(reason) if !outcome.ok => Self::refused(reason),
            _ => Self::success(outcome),
        }
    }
}

/// Run one command against the runtime.
///
/// `subscribe` needs a connection and is handled by the IPC layer; reaching
/// it here is a failure response.
pub async fn dispatch(host: &HostRuntime, command: Command) -> CommandResponse {
    let span = info_span!("command", name = command.name());
    async move {
        debug!("dispatching");
        match command {
            Command::GetState { surface } => projection::get_state(host, surface),
            Command::SetState { surface, patch } => projection::set_state(host, surface, patch),
            Command::SetContentText { surface, content } => {
                projection::set_content_text(host, surface, content)
            }
            Command::SetContentMedia { surface, content } => {
                projection::set_content_media(host, surface, content)
            }
            Command::SetMode { surface, mode } => projection::set_mode(host, surface, mode),
            Command::SetAppearance { surface, patch } => {
                projection::set_appearance(host, surface, patch)
            }
            Command::SetMirror { surface, mode } => projection::set_mirror(host, surface, mode),
            Command::ListSurfaces => projection::list_surfaces(host),
            Command::OpenSurface { surface } => projection::open_surface(host, surface).await,
            Command::CloseSurface { surface } => projection::close_surface(host, surface).await,

            Command::GetLive => live::get_live(host),
            Command::SetLive(patch) => live::set_live(host, patch),
            Command::Next => live::next(host).await,
            Command::Prev => live::prev(host).await,
            Command::SetCursor { cursor } => live::set_cursor(host, cursor).await,
            Command::SetTarget { target } => live::set_target(host, &target),
            Command::Toggle => live::toggle(host),
            Command::ToggleBlack => live::toggle_black(host),
            Command::ToggleWhite => live::toggle_white(host),
            Command::Resume => live::resume(host),
            Command::SetLocked { surface, locked } => live::set_locked(host, surface, locked),
            Command::GoLive { plan_id, cursor } => live::go_live(host, plan_id, cursor).await,
            Command::ProjectItem { target, item } => {
                live::project_item(host, target.as_deref(), item).await
            }

            Command::Subscribe { .. } => {
                CommandResponse::failure("subscribe is only available on an IPC connection")
            }
            Command::Ping => CommandResponse::success(serde_json::json!({
                "pong": true,
                "serverTime": chrono::Utc::now().to_rfc3339(),
            })),
        }
    }
    .instrument(span)
    .await
}
