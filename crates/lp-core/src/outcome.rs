//! Results of policy-checked mutation attempts.
//!
//! Lock and mirror refusals are expected, user-actionable outcomes. They are
//! returned as values and never raised as errors.

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionState;
use crate::surface::SurfaceKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefusalReason {
    /// The surface is locked and rejects every mutation.
    Locked,
    /// The surface mirrors another one; write to the source instead.
    Mirror,
}

/// Outcome of a content/mode/appearance mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RefusalReason>,
    /// Surface that was actually mutated (may differ from the requested one
    /// after a mirror redirect).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ProjectionState>,
}

impl MutationOutcome {
    pub fn applied(surface: SurfaceKey, state: ProjectionState) -> Self {
        Self {
            ok: true,
            reason: None,
            surface: Some(surface),
            state: Some(state),
        }
    }

    pub fn refused(reason: RefusalReason) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            surface: None,
            state: None,
        }
    }

    pub fn is_refused_with(&self, reason: RefusalReason) -> bool {
        !self.ok && self.reason == Some(reason)
    }
}
