//! Surface keys.
//!
//! 输出画面标识（固定三个：A、B、C）。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three fixed output surfaces.
///
/// A is the main display, B and C are secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceKey {
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid surface key: {0:?}")]
pub struct SurfaceKeyError(pub String);

impl SurfaceKey {
    pub const ALL: [SurfaceKey; 3] = [SurfaceKey::A, SurfaceKey::B, SurfaceKey::C];

    /// Position of the surface in per-surface tables.
    pub const fn index(self) -> usize {
        match self {
            SurfaceKey::A => 0,
            SurfaceKey::B => 1,
            SurfaceKey::C => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SurfaceKey::A => "A",
            SurfaceKey::B => "B",
            SurfaceKey::C => "C",
        }
    }

    /// Lenient parsing for the live broadcast path.
    ///
    /// Missing, empty or unknown values fall back to the main surface so a
    /// malformed request can never take the live loop down.
    pub fn parse_or_main(raw: Option<&str>) -> SurfaceKey {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|_err| {
                #[cfg(feature = "tracing")]
                tracing::warn!(value, "unknown surface key, defaulting to A");
                SurfaceKey::A
            }),
            _ => SurfaceKey::A,
        }
    }
}

impl Default for SurfaceKey {
    fn default() -> Self {
        SurfaceKey::A
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurfaceKey {
    type Err = SurfaceKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(SurfaceKey::A),
            "B" => Ok(SurfaceKey::B),
            "C" => Ok(SurfaceKey::C),
            _ => Err(SurfaceKeyError(s.to_string())),
        }
    }
}
