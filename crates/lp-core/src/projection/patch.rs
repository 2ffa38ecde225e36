use serde::{Deserialize, Serialize};

use super::content::ProjectionContent;
use super::state::{ProjectionMode, ProjectionState};

/// Shallow patch over the top-level fields of a [`ProjectionState`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionPatch {
    pub mode: Option<ProjectionMode>,
    pub lower_third_enabled: Option<bool>,
    pub transition_enabled: Option<bool>,
    pub text_scale: Option<f64>,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub current: Option<ProjectionContent>,
}

impl ProjectionPatch {
    pub fn apply_to(self, state: &mut ProjectionState) {
        if let Some(mode) = self.mode {
            state.mode = mode;
        }
        if let Some(enabled) = self.lower_third_enabled {
            state.lower_third_enabled = enabled;
        }
        if let Some(enabled) = self.transition_enabled {
            state.transition_enabled = enabled;
        }
        if let Some(scale) = self.text_scale {
            state.text_scale = scale;
        }
        if let Some(background) = self.background {
            state.background = background;
        }
        if let Some(foreground) = self.foreground {
            state.foreground = foreground;
        }
        if let Some(current) = self.current {
            state.current = current;
        }
    }
}

/// Appearance-only patch. Unset fields keep the surface's existing values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearancePatch {
    pub text_scale: Option<f64>,
    pub background: Option<String>,
    pub foreground: Option<String>,
}

impl AppearancePatch {
    pub fn apply_to(self, state: &mut ProjectionState) {
        state.text_scale = self.text_scale.unwrap_or(state.text_scale);
        state.background = self.background.unwrap_or_else(|| state.background.clone());
        state.foreground = self.foreground.unwrap_or_else(|| state.foreground.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearance_patch_keeps_prior_customisation() {
        let mut state = ProjectionState {
            background: "#112233".into(),
            text_scale: 1.4,
            ..ProjectionState::default()
        };

        AppearancePatch {
            foreground: Some("#ffee00".into()),
            ..AppearancePatch::default()
        }
        .apply_to(&mut state);

        assert_eq!(state.background, "#112233");
        assert_eq!(state.text_scale, 1.4);
        assert_eq!(state.foreground, "#ffee00");
    }

    #[test]
    fn projection_patch_only_touches_present_fields() {
        let mut state = ProjectionState::default();
        ProjectionPatch {
            lower_third_enabled: Some(true),
            ..ProjectionPatch::default()
        }
        .apply_to(&mut state);

        assert!(state.lower_third_enabled);
        assert_eq!(state.mode, ProjectionMode::Normal);
        assert!(state.transition_enabled);
    }
}
