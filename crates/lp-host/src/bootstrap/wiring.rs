//! Dependency wiring: config in, ready-to-serve [`HostRuntime`] out.

use std::sync::Arc;

use anyhow::Result;
use lp_app::{App, AppDeps};
use lp_core::config::AppConfig;
use lp_core::{AppearancePatch, ProjectionState};
use lp_infra::{JsonBibleDataset, JsonLibraryStore, SystemClock};
use tracing::info;

use crate::adapters::DisplayWindowRegistry;
use crate::bootstrap::HostRuntime;

/// Initial surface state: built-in defaults overlaid with the configured
/// appearance. Empty colours and non-positive scales keep the defaults.
pub fn initial_projection_state(config: &AppConfig) -> ProjectionState {
    let non_empty = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    let mut state = ProjectionState::default();
    AppearancePatch {
        text_scale: (config.text_scale > 0.0).then_some(config.text_scale),
        background: non_empty(&config.background),
        foreground: non_empty(&config.foreground),
    }
    .apply_to(&mut state);
    state
}

pub async fn wire_dependencies(config: AppConfig) -> Result<HostRuntime> {
    let windows = Arc::new(DisplayWindowRegistry::new());
    let bible = JsonBibleDataset::open(&config.bible_dataset_path).await?;

    let deps = AppDeps {
        library: Arc::new(JsonLibraryStore::new(config.library_path.clone())),
        bible: Arc::new(bible),
        windows: windows.clone(),
        clock: Arc::new(SystemClock),
    };
    info!(
        library = %config.library_path.display(),
        bible = %config.bible_dataset_path.display(),
        "dependencies wired"
    );

    let app = App::new(deps, initial_projection_state(&config));
    Ok(HostRuntime::new(app, windows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::projection::DEFAULT_BACKGROUND;

    #[test]
    fn configured_appearance_overrides_defaults() {
        let config = AppConfig {
            foreground: "#eeeeee".into(),
            text_scale: 1.5,
            ..AppConfig::empty()
        };

        let state = initial_projection_state(&config);

        assert_eq!(state.foreground, "#eeeeee");
        assert_eq!(state.background, DEFAULT_BACKGROUND);
        assert_eq!(state.text_scale, 1.5);
    }

    #[tokio::test]
    async fn wires_with_missing_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::with_system_defaults(dir.path().to_path_buf());

        let host = wire_dependencies(config).await.unwrap();

        assert_eq!(host.projection().list_surfaces().len(), 3);
    }
}
