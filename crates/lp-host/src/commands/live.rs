//! Live navigation commands
//! 直播导航命令

use lp_core::{LivePatch, PlanId, PlanItem, SurfaceKey};

use super::CommandResponse;
use crate::bootstrap::HostRuntime;

pub fn get_live(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().get_live())
}

pub fn set_live(host: &HostRuntime, patch: LivePatch) -> CommandResponse {
    CommandResponse::success(host.projection().merge_live(patch))
}

pub async fn next(host: &HostRuntime) -> CommandResponse {
    CommandResponse::from_result(host.navigation().next().await)
}

pub async fn prev(host: &HostRuntime) -> CommandResponse {
    CommandResponse::from_result(host.navigation().prev().await)
}

pub async fn set_cursor(host: &HostRuntime, cursor: i64) -> CommandResponse {
    CommandResponse::from_result(host.navigation().set_cursor(cursor).await)
}

/// Unknown targets fall back to the main surface.
pub fn set_target(host: &HostRuntime, target: &str) -> CommandResponse {
    let surface = SurfaceKey::parse_or_main(Some(target));
    CommandResponse::success(host.projection().set_target(surface))
}

pub fn toggle(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().toggle())
}

pub fn toggle_black(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().toggle_black())
}

pub fn toggle_white(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().toggle_white())
}

pub fn resume(host: &HostRuntime) -> CommandResponse {
    CommandResponse::success(host.projection().resume())
}

pub fn set_locked(host: &HostRuntime, surface: SurfaceKey, locked: bool) -> CommandResponse {
    CommandResponse::success(host.projection().set_locked(surface, locked))
}

pub async fn go_live(host: &HostRuntime, plan_id: PlanId, cursor: Option<i64>) -> CommandResponse {
    CommandResponse::from_result(host.navigation().go_live(plan_id, cursor).await)
}

/// Without a target, the item goes to the current live target.
pub async fn project_item(
    host: &HostRuntime,
    target: Option<&str>,
    item: PlanItem,
) -> CommandResponse {
    let surface = match target {
        Some(raw) => SurfaceKey::parse_or_main(Some(raw)),
        None => host.projection().get_live().target,
    };
    host.navigation().project_item(surface, &item).await.into()
}
