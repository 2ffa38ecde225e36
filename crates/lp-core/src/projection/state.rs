use serde::{Deserialize, Serialize};

use super::content::ProjectionContent;

pub const DEFAULT_BACKGROUND: &str = "#050505";
pub const DEFAULT_FOREGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT_SCALE: f64 = 1.0;

/// Blanking mode of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionMode {
    #[default]
    Normal,
    Black,
    White,
}

impl ProjectionMode {
    /// Mode implied by the live black/white flags.
    pub fn from_blank_flags(black: bool, white: bool) -> Self {
        if black {
            ProjectionMode::Black
        } else if white {
            ProjectionMode::White
        } else {
            ProjectionMode::Normal
        }
    }
}

/// Full display state of one surface.
///
/// 单个画面的完整显示状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionState {
    pub mode: ProjectionMode,
    pub lower_third_enabled: bool,
    pub transition_enabled: bool,
    pub text_scale: f64,
    pub background: String,
    pub foreground: String,
    pub current: ProjectionContent,
    /// Milliseconds; strictly increases on every mutation of this surface.
    pub updated_at: i64,
}

impl Default for ProjectionState {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Normal,
            lower_third_enabled: false,
            transition_enabled: true,
            text_scale: DEFAULT_TEXT_SCALE,
            background: DEFAULT_BACKGROUND.to_string(),
            foreground: DEFAULT_FOREGROUND.to_string(),
            current: ProjectionContent::Empty,
            updated_at: 0,
        }
    }
}

impl ProjectionState {
    /// Compare everything a viewer can see, ignoring `updated_at`.
    pub fn same_display(&self, other: &ProjectionState) -> bool {
        self.mode == other.mode
            && self.lower_third_enabled == other.lower_third_enabled
            && self.transition_enabled == other.transition_enabled
            && self.text_scale == other.text_scale
            && self.background == other.background
            && self.foreground == other.foreground
            && self.current == other.current
    }
}
