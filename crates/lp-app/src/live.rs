//! Live cursor: the single coordinator for "what is live right now".
//!
//! The cursor holds the global [`LiveState`] and offers one transition,
//! [`LiveCursor::merge`]. The convenience operations only build patches
//! relative to the current state; applying the derived blank mode to the
//! target surface and broadcasting are done by the runtime around `merge`.

use lp_core::{LivePatch, LiveState, ProjectionMode, SurfaceKey};

pub struct LiveCursor {
    state: LiveState,
}

impl LiveCursor {
    pub fn new() -> Self {
        Self {
            state: LiveState::default(),
        }
    }

    pub fn state(&self) -> &LiveState {
        &self.state
    }

    /// Apply `patch`, normalise, stamp. `updated_at` strictly increases.
    pub fn merge(&mut self, patch: LivePatch, now_ms: i64) -> LiveState {
        let previous = self.state.updated_at;
        let mut next = self.state.merged(patch);
        next.updated_at = now_ms.max(previous + 1);
        self.state = next;
        self.state.clone()
    }

    /// Blank mode implied by the live flags.
    pub fn projection_mode(&self) -> ProjectionMode {
        ProjectionMode::from_blank_flags(self.state.black, self.state.white)
    }

    pub fn next_patch(&self) -> LivePatch {
        LivePatch {
            cursor: Some(self.state.cursor + 1),
            enabled: Some(true),
            ..LivePatch::default()
        }
    }

    pub fn prev_patch(&self) -> LivePatch {
        LivePatch {
            cursor: Some((self.state.cursor - 1).max(0)),
            enabled: Some(true),
            ..LivePatch::default()
        }
    }

    pub fn toggle_patch(&self) -> LivePatch {
        LivePatch {
            enabled: Some(!self.state.enabled),
            ..LivePatch::default()
        }
    }

    pub fn toggle_black_patch(&self) -> LivePatch {
        LivePatch {
            black: Some(!self.state.black),
            ..LivePatch::default()
        }
    }

    pub fn toggle_white_patch(&self) -> LivePatch {
        LivePatch {
            white: Some(!self.state.white),
            ..LivePatch::default()
        }
    }

    pub fn resume_patch() -> LivePatch {
        LivePatch {
            black: Some(false),
            white: Some(false),
            ..LivePatch::default()
        }
    }

    pub fn locked_patch(&self, surface: SurfaceKey, locked: bool) -> LivePatch {
        LivePatch {
            locked_screens: Some(self.state.locked_screens.with(surface, locked)),
            ..LivePatch::default()
        }
    }
}

impl Default for LiveCursor {
    fn default() -> Self {
        Self::new()
    }
}
