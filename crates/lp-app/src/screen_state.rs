//! Per-surface projection state store.
//!
//! 每个输出画面的投影状态存储（唯一可信来源）。
//!
//! Every mutator, whether it comes from the per-surface API or from the legacy
//! main-surface shortcuts, funnels into [`ScreenStateStore::transition`], so the
//! two call styles can never diverge. The store itself knows nothing about
//! mirrors, locks or observers; [`crate::runtime::ProjectionRuntime`] wraps each
//! transition with routing, propagation and broadcast.

use lp_core::{
    AppearancePatch, MediaPayload, ProjectionMode, ProjectionPatch, ProjectionState, SurfaceKey,
    TextPayload,
};

pub struct ScreenStateStore {
    states: [ProjectionState; 3],
}

impl ScreenStateStore {
    /// Every surface starts from `initial` with `updated_at = 0`.
    pub fn new(initial: ProjectionState) -> Self {
        let initial = ProjectionState {
            updated_at: 0,
            ..initial
        };
        Self {
            states: [initial.clone(), initial.clone(), initial],
        }
    }

    pub fn get_state(&self, surface: SurfaceKey) -> ProjectionState {
        self.states[surface.index()].clone()
    }

    pub(crate) fn state_ref(&self, surface: SurfaceKey) -> &ProjectionState {
        &self.states[surface.index()]
    }

    pub fn set_state(
        &mut self,
        surface: SurfaceKey,
        patch: ProjectionPatch,
        now_ms: i64,
    ) -> ProjectionState {
        self.transition(surface, now_ms, |state| patch.apply_to(state))
    }

    /// Replace content with text and force `NORMAL`, so new text never stays
    /// hidden behind a leftover blank.
    pub fn set_content_text(
        &mut self,
        surface: SurfaceKey,
        payload: TextPayload,
        now_ms: i64,
    ) -> ProjectionState {
        self.transition(surface, now_ms, |state| {
            state.current = payload.into();
            state.mode = ProjectionMode::Normal;
        })
    }

    pub fn set_content_media(
        &mut self,
        surface: SurfaceKey,
        payload: MediaPayload,
        now_ms: i64,
    ) -> ProjectionState {
        self.transition(surface, now_ms, |state| {
            state.current = payload.into();
            state.mode = ProjectionMode::Normal;
        })
    }

    pub fn set_mode(
        &mut self,
        surface: SurfaceKey,
        mode: ProjectionMode,
        now_ms: i64,
    ) -> ProjectionState {
        self.transition(surface, now_ms, |state| state.mode = mode)
    }

    pub fn set_appearance(
        &mut self,
        surface: SurfaceKey,
        patch: AppearancePatch,
        now_ms: i64,
    ) -> ProjectionState {
        self.transition(surface, now_ms, |state| patch.apply_to(state))
    }

    /// Full overwrite of `target` with the state of `source`.
    ///
    /// The copy gets its own timestamp which is never older than the source's.
    pub(crate) fn copy_state(
        &mut self,
        source: SurfaceKey,
        target: SurfaceKey,
        now_ms: i64,
    ) -> ProjectionState {
        let source_state = self.get_state(source);
        let floor = now_ms.max(source_state.updated_at);
        self.transition(target, floor, |state| {
            *state = ProjectionState {
                updated_at: state.updated_at,
                ..source_state
            };
        })
    }

    fn transition(
        &mut self,
        surface: SurfaceKey,
        now_ms: i64,
        mutate: impl FnOnce(&mut ProjectionState),
    ) -> ProjectionState {
        let state = &mut self.states[surface.index()];
        let previous = state.updated_at;
        mutate(state);
        state.updated_at = now_ms.max(previous + 1);
        state.clone()
    }
}

impl Default for ScreenStateStore {
    fn default() -> Self {
        Self::new(ProjectionState::default())
    }
}
