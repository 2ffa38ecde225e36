//! Per-surface projection commands
//! 单画面投影命令

use lp_core::ports::SurfaceWindowPort;
use lp_core::{
    AppearancePatch, MediaPayload, MirrorMode, ProjectionMode, ProjectionPatch, SurfaceKey,
    TextPayload,
};

use super::error::map_err;
use super::CommandResponse;
use crate::bootstrap::HostRuntime;

pub fn get_state(host: &HostRuntime, surface: SurfaceKey) -> CommandResponse {
    CommandResponse::success(host.projection().get_state(surface))
}

pub fn set_state(host: &HostRuntime, surface: SurfaceKey, patch: ProjectionPatch) -> CommandResponse {
    host.projection().set_state(surface, patch).into()
}

pub fn set_content_text(
    host: &HostRuntime,
    surface: SurfaceKey,
    content: TextPayload,
) -> CommandResponse {
    host.projection().set_content_text(surface, content).into()
}

pub fn set_content_media(
    host: &HostRuntime,
    surface: SurfaceKey,
    content: MediaPayload,
) -> CommandResponse {
    host.projection().set_content_media(surface, content).into()
}

pub fn set_mode(host: &HostRuntime, surface: SurfaceKey, mode: ProjectionMode) -> CommandResponse {
    host.projection().set_mode(surface, mode).into()
}

pub fn set_appearance(
    host: &HostRuntime,
    surface: SurfaceKey,
    patch: AppearancePatch,
) -> CommandResponse {
    host.projection().set_appearance(surface, patch).into()
}

/// Mirror configuration errors are failures, not refusals: the request itself
/// is invalid.
pub fn set_mirror(host: &HostRuntime, surface: SurfaceKey, mode: MirrorMode) -> CommandResponse {
    match host.projection().set_mirror(surface, mode) {
        Ok(state) => CommandResponse::success(state),
        Err(err) => CommandResponse::failure(map_err(err.into())),
    }
}

pub fn list_surfaces(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().list_surfaces())
}

pub async fn open_surface(host: &HostRuntime, surface: SurfaceKey) -> CommandResponse {
    if let Err(err) = host.windows().open_surface(surface).await {
        return CommandResponse::failure(map_err(err));
    }
    host.projection().window_changed(surface, host.windows().is_surface_open(surface));
    CommandResponse::success(host.projection().list_surfaces())
}

pub async fn close_surface(host: &HostRuntime, surface: SurfaceKey) -> CommandResponse {
    if let Err(err) = host.windows().close_surface(surface).await {
        return CommandResponse::failure(map_err(err));
    }
    host.projection().window_changed(surface, host.windows().is_surface_open(surface));
    CommandResponse::success(host.projection().list_surfaces())
}
