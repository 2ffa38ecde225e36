//! Projection runtime: the process-lifetime context owning all live state.
//!
//! 投影运行时：持有所有画面状态、镜像配置与直播游标的进程级上下文。
//!
//! Screens, mirrors and the live cursor sit behind one mutex. Each operation
//! takes the lock once, runs its whole transition (route, mutate, propagate to
//! mirrors, broadcast) and releases it, which gives the run-to-completion
//! semantics of a single-threaded event loop. Broadcasting inside the critical
//! section keeps the per-observer order identical to the mutation order.
//!
//! Asynchronous collaborator work (opening a display window) happens before
//! the lock is taken.

use std::sync::{Arc, Mutex, MutexGuard};

use lp_core::ports::{ClockPort, SurfaceWindowPort};
use lp_core::{
    AppearancePatch, LivePatch, LiveState, MediaPayload, MirrorConfigError, MirrorMode,
    MutationOutcome, ProjectionMode, ProjectionPatch, ProjectionState, SurfaceKey, TextPayload,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::broadcast::{BroadcastHub, Subscription, WindowRole};
use crate::live::LiveCursor;
use crate::mirror::MirrorRegistry;
use crate::plan_item::ProjectionPayload;
use crate::router::{self, RouteDecision, RoutePolicy};
use crate::screen_state::ScreenStateStore;

/// Entry of `list-surfaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceInfo {
    pub key: SurfaceKey,
    pub is_open: bool,
    pub mirror: MirrorMode,
}

struct ProjectionCore {
    screens: ScreenStateStore,
    mirrors: MirrorRegistry,
    live: LiveCursor,
}

/// A single requested change to one surface.
enum SurfaceMutation {
    Patch(ProjectionPatch),
    Text(TextPayload),
    Media(MediaPayload),
    Mode(ProjectionMode),
    Appearance(AppearancePatch),
}

impl From<ProjectionPayload> for SurfaceMutation {
    fn from(payload: ProjectionPayload) -> Self {
        match payload {
            ProjectionPayload::Text(text) => SurfaceMutation::Text(text),
            ProjectionPayload::Media(media) => SurfaceMutation::Media(media),
        }
    }
}

pub struct ProjectionRuntime {
    core: Mutex<ProjectionCore>,
    hub: BroadcastHub,
    clock: Arc<dyn ClockPort>,
    windows: Arc<dyn SurfaceWindowPort>,
}

impl ProjectionRuntime {
    pub fn new(
        initial: ProjectionState,
        clock: Arc<dyn ClockPort>,
        windows: Arc<dyn SurfaceWindowPort>,
    ) -> Self {
        Self {
            core: Mutex::new(ProjectionCore {
                screens: ScreenStateStore::new(initial),
                mirrors: MirrorRegistry::new(),
                live: LiveCursor::new(),
            }),
            hub: BroadcastHub::new(),
            clock,
            windows,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProjectionCore> {
        // Transitions swap whole records, so a poisoned lock still holds valid state.
        self.core
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    pub fn subscribe(&self, role: WindowRole) -> Subscription {
        self.hub.subscribe(role)
    }

    /// Report that a display window appeared or went away.
    pub fn window_changed(&self, surface: SurfaceKey, is_open: bool) {
        let _core = self.lock();
        info!(surface = %surface, is_open, "display window changed");
        self.hub.notify_window_changed(surface, is_open);
    }

    // ---------------------------------------------------------------------
    // Projection (per surface)
    // ---------------------------------------------------------------------

    pub fn get_state(&self, surface: SurfaceKey) -> ProjectionState {
        self.lock().screens.get_state(surface)
    }

    pub fn list_surfaces(&self) -> Vec<SurfaceInfo> {
        let core = self.lock();
        SurfaceKey::ALL
            .into_iter()
            .map(|key| SurfaceInfo {
                key,
                is_open: self.windows.is_surface_open(key),
                mirror: core.mirrors.mirror_of(key),
            })
            .collect()
    }

    pub fn set_state(&self, surface: SurfaceKey, patch: ProjectionPatch) -> MutationOutcome {
        self.mutate(surface, SurfaceMutation::Patch(patch), RoutePolicy::Refuse)
    }

    pub fn set_content_text(&self, surface: SurfaceKey, payload: TextPayload) -> MutationOutcome {
        self.mutate(surface, SurfaceMutation::Text(payload), RoutePolicy::Refuse)
    }

    pub fn set_content_media(&self, surface: SurfaceKey, payload: MediaPayload) -> MutationOutcome {
        self.mutate(surface, SurfaceMutation::Media(payload), RoutePolicy::Refuse)
    }

    pub fn set_mode(&self, surface: SurfaceKey, mode: ProjectionMode) -> MutationOutcome {
        self.mutate(surface, SurfaceMutation::Mode(mode), RoutePolicy::Refuse)
    }

    pub fn set_appearance(&self, surface: SurfaceKey, patch: AppearancePatch) -> MutationOutcome {
        self.mutate(surface, SurfaceMutation::Appearance(patch), RoutePolicy::Refuse)
    }

    // Main-surface shortcuts kept for single-screen callers.

    pub fn set_main_content_text(&self, payload: TextPayload) -> MutationOutcome {
        self.set_content_text(SurfaceKey::A, payload)
    }

    pub fn set_main_content_media(&self, payload: MediaPayload) -> MutationOutcome {
        self.set_content_media(SurfaceKey::A, payload)
    }

    pub fn set_main_mode(&self, mode: ProjectionMode) -> MutationOutcome {
        self.set_mode(SurfaceKey::A, mode)
    }

    pub fn set_mirror(
        &self,
        surface: SurfaceKey,
        mode: MirrorMode,
    ) -> Result<ProjectionState, MirrorConfigError> {
        let mut core = self.lock();
        let now = self.clock.now_ms();
        let ProjectionCore {
            screens, mirrors, ..
        } = &mut *core;

        let changed = mirrors.set_mirror(screens, surface, mode, now).map_err(|err| {
            warn!(surface = %surface, error = %err, "mirror configuration refused");
            err
        })?;
        for changed_surface in changed {
            self.hub
                .notify_surface_state(changed_surface, screens.state_ref(changed_surface));
        }
        Ok(screens.get_state(surface))
    }

    /// Deliver plan content to `target` the way the live path does: mirrored
    /// targets are redirected to their source, and the effective surface's
    /// window is opened first when needed.
    pub async fn project(&self, target: SurfaceKey, payload: ProjectionPayload) -> MutationOutcome {
        let decision = {
            let core = self.lock();
            router::resolve(
                target,
                &core.live.state().locked_screens,
                &core.mirrors,
                RoutePolicy::Redirect,
            )
        };

        if let RouteDecision::Apply(surface) = decision {
            if !self.windows.is_surface_open(surface) {
                match self.windows.open_surface(surface).await {
                    Ok(()) if self.windows.is_surface_open(surface) => {
                        self.window_changed(surface, true);
                    }
                    Ok(()) => {}
                    Err(err) => {
                        warn!(surface = %surface, error = %err, "failed to open display window");
                    }
                }
            }
        }

        // Re-resolved under the lock: locks may have changed while awaiting.
        self.mutate(target, payload.into(), RoutePolicy::Redirect)
    }

    fn mutate(
        &self,
        target: SurfaceKey,
        mutation: SurfaceMutation,
        policy: RoutePolicy,
    ) -> MutationOutcome {
        let mut core = self.lock();
        self.mutate_locked(&mut core, target, mutation, policy)
    }

    fn mutate_locked(
        &self,
        core: &mut ProjectionCore,
        target: SurfaceKey,
        mutation: SurfaceMutation,
        policy: RoutePolicy,
    ) -> MutationOutcome {
        let decision = router::resolve(
            target,
            &core.live.state().locked_screens,
            &core.mirrors,
            policy,
        );
        let surface = match decision {
            RouteDecision::Apply(surface) => surface,
            RouteDecision::Refused(reason) => {
                debug!(target = %target, reason = ?reason, "projection mutation refused");
                return MutationOutcome::refused(reason);
            }
        };

        let now = self.clock.now_ms();
        let ProjectionCore {
            screens, mirrors, ..
        } = core;

        let state = match mutation {
            SurfaceMutation::Patch(patch) => screens.set_state(surface, patch, now),
            SurfaceMutation::Text(text) => screens.set_content_text(surface, text, now),
            SurfaceMutation::Media(media) => screens.set_content_media(surface, media, now),
            SurfaceMutation::Mode(mode) => screens.set_mode(surface, mode, now),
            SurfaceMutation::Appearance(patch) => screens.set_appearance(surface, patch, now),
        };

        let mirrored = mirrors.propagate_from(screens, surface, now);
        self.hub.notify_surface_state(surface, &state);
        for mirror in mirrored {
            self.hub.notify_surface_state(mirror, screens.state_ref(mirror));
        }

        MutationOutcome::applied(surface, state)
    }

    // ---------------------------------------------------------------------
    // Live
    // ---------------------------------------------------------------------

    pub fn get_live(&self) -> LiveState {
        self.lock().live.state().clone()
    }

    /// Merge `patch` into the live state, push the derived blank mode to the
    /// live target, then broadcast the new live state.
    pub fn merge_live(&self, patch: LivePatch) -> LiveState {
        let mut core = self.lock();
        self.merge_live_locked(&mut core, patch)
    }

    fn merge_live_locked(&self, core: &mut ProjectionCore, patch: LivePatch) -> LiveState {
        let now = self.clock.now_ms();
        let state = core.live.merge(patch, now);
        debug!(
            enabled = state.enabled,
            cursor = state.cursor,
            target = %state.target,
            black = state.black,
            white = state.white,
            "live state merged"
        );

        self.apply_live_projection_mode(core, &state);
        self.hub.notify_live_state(&state);
        state
    }

    fn apply_live_projection_mode(&self, core: &mut ProjectionCore, state: &LiveState) {
        let mode = core.live.projection_mode();
        let decision = router::resolve(
            state.target,
            &state.locked_screens,
            &core.mirrors,
            RoutePolicy::Redirect,
        );
        match decision {
            RouteDecision::Apply(surface) if core.screens.state_ref(surface).mode != mode => {
                self.mutate_locked(core, surface, SurfaceMutation::Mode(mode), RoutePolicy::Redirect);
            }
            RouteDecision::Apply(_) => {}
            RouteDecision::Refused(reason) => {
                debug!(target = %state.target, reason = ?reason, "live mode not applied");
            }
        }
    }

    /// Merge a patch computed from the current live state, atomically.
    pub fn update_live(&self, build: impl FnOnce(&LiveCursor) -> LivePatch) -> LiveState {
        let mut core = self.lock();
        let patch = build(&core.live);
        self.merge_live_locked(&mut core, patch)
    }

    pub fn next(&self) -> LiveState {
        self.update_live(LiveCursor::next_patch)
    }

    pub fn prev(&self) -> LiveState {
        self.update_live(LiveCursor::prev_patch)
    }

    pub fn set_cursor(&self, cursor: i64) -> LiveState {
        self.merge_live(LivePatch {
            cursor: Some(cursor),
            ..LivePatch::default()
        })
    }

    pub fn set_target(&self, surface: SurfaceKey) -> LiveState {
        self.merge_live(LivePatch::target(surface))
    }

    pub fn toggle(&self) -> LiveState {
        self.update_live(LiveCursor::toggle_patch)
    }

    pub fn toggle_black(&self) -> LiveState {
        self.update_live(LiveCursor::toggle_black_patch)
    }

    pub fn toggle_white(&self) -> LiveState {
        self.update_live(LiveCursor::toggle_white_patch)
    }

    pub fn resume(&self) -> LiveState {
        self.merge_live(LiveCursor::resume_patch())
    }

    pub fn set_locked(&self, surface: SurfaceKey, locked: bool) -> LiveState {
        info!(surface = %surface, locked, "surface lock changed");
        self.update_live(|live| live.locked_patch(surface, locked))
    }
}
