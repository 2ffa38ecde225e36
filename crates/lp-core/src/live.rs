//! Live navigation state.
//!
//! A single global record describing what is live right now: the active plan,
//! the cursor into it, the surface it drives, blanking flags and per-surface
//! locks. Every change goes through [`LiveState::merged`], which enforces the
//! invariants between fields in one place.
//!
//! 全局直播导航状态：所有字段的修改都经过 `merged`，集中保证字段间的约束。

use serde::{Deserialize, Serialize};

use crate::ids::PlanId;
use crate::surface::SurfaceKey;

/// Per-surface lock flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockedScreens {
    #[serde(rename = "A", default)]
    pub a: bool,
    #[serde(rename = "B", default)]
    pub b: bool,
    #[serde(rename = "C", default)]
    pub c: bool,
}

impl LockedScreens {
    pub fn is_locked(&self, surface: SurfaceKey) -> bool {
        match surface {
            SurfaceKey::A => self.a,
            SurfaceKey::B => self.b,
            SurfaceKey::C => self.c,
        }
    }

    pub fn with(mut self, surface: SurfaceKey, locked: bool) -> Self {
        match surface {
            SurfaceKey::A => self.a = locked,
            SurfaceKey::B => self.b = locked,
            SurfaceKey::C => self.c = locked,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveState {
    pub enabled: bool,
    pub plan_id: Option<PlanId>,
    pub cursor: i64,
    pub target: SurfaceKey,
    pub black: bool,
    pub white: bool,
    pub locked_screens: LockedScreens,
    pub updated_at: i64,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            enabled: false,
            plan_id: None,
            cursor: 0,
            target: SurfaceKey::A,
            black: false,
            white: false,
            locked_screens: LockedScreens::default(),
            updated_at: 0,
        }
    }
}

/// Partial update of [`LiveState`].
///
/// `target` stays a raw string so that malformed values coming off the wire
/// can fall back to the main surface instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LivePatch {
    pub enabled: Option<bool>,
    #[serde(
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub plan_id: Option<Option<PlanId>>,
    pub cursor: Option<i64>,
    pub target: Option<String>,
    pub black: Option<bool>,
    pub white: Option<bool>,
    pub locked_screens: Option<LockedScreens>,
}

impl LivePatch {
    pub fn target(surface: SurfaceKey) -> Self {
        Self {
            target: Some(surface.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn cursor(cursor: i64) -> Self {
        Self {
            cursor: Some(cursor),
            ..Self::default()
        }
    }
}

impl LiveState {
    /// Apply `patch`, then normalise.
    ///
    /// Order matters:
    /// 1. an explicit `black = true` clears white, an explicit `white = true`
    ///    clears black;
    /// 2. the cursor is clamped to `>= 0`;
    /// 3. an empty or unknown target falls back to A.
    ///
    /// `updated_at` is left untouched; the caller stamps it.
    pub fn merged(&self, patch: LivePatch) -> LiveState {
        let mut next = self.clone();

        if let Some(enabled) = patch.enabled {
            next.enabled = enabled;
        }
        if let Some(plan_id) = patch.plan_id {
            next.plan_id = plan_id;
        }
        if let Some(cursor) = patch.cursor {
            next.cursor = cursor;
        }
        if let Some(black) = patch.black {
            next.black = black;
        }
        if let Some(white) = patch.white {
            next.white = white;
        }
        if let Some(locked) = patch.locked_screens {
            next.locked_screens = locked;
        }

        if patch.black == Some(true) {
            next.white = false;
        }
        if patch.white == Some(true) {
            next.black = false;
        }
        // Both requested at once: the later rule wins, black is cleared.

        next.cursor = next.cursor.max(0);

        if let Some(raw) = patch.target.as_deref() {
            next.target = SurfaceKey::parse_or_main(Some(raw));
        }

        next
    }
}
