//! Mirror configuration of a surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::SurfaceKey;

/// Whether a surface shows its own content or passively copies another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MirrorMode {
    #[default]
    Free,
    Mirror { from: SurfaceKey },
}

impl MirrorMode {
    pub fn source(&self) -> Option<SurfaceKey> {
        match self {
            MirrorMode::Free => None,
            MirrorMode::Mirror { from } => Some(*from),
        }
    }

    pub fn is_mirror(&self) -> bool {
        matches!(self, MirrorMode::Mirror { .. })
    }
}

/// Rejected mirror configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorConfigError {
    #[error("surface {0} cannot mirror itself")]
    SelfReference(SurfaceKey),

    #[error("mirroring {surface} from {from} would create a cycle")]
    Cycle { surface: SurfaceKey, from: SurfaceKey },
}
