//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and maps it onto [`AppConfig`]. No validation: whatever
//! is in the file is a fact. Falling back to system paths when there is no
//! file at all is the only policy here.
//! 仅做纯数据加载，文件不存在时回退到系统目录。

use std::path::{Path, PathBuf};

use anyhow::Context;
use lp_core::config::AppConfig;
use tracing::info;

const APP_DIR_NAME: &str = "liveprojector";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Default config file location: `<config_dir>/liveprojector/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Default data directory: `<data_dir>/liveprojector`, or the working
/// directory when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Pick the config to run with.
///
/// An explicit path must load. Without one, the default location is used if
/// it exists; otherwise system defaults apply. Empty path entries in a loaded
/// file are filled from the system defaults as well.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::with_system_defaults(default_data_dir());

    let loaded = match explicit {
        Some(path) => Some(load_config(path)?),
        None => match default_config_path() {
            Some(path) if path.exists() => Some(load_config(&path)?),
            _ => None,
        },
    };

    let Some(config) = loaded else {
        info!("no config file, using system defaults");
        return Ok(defaults);
    };

    Ok(fill_empty_paths(config, defaults))
}

fn fill_empty_paths(mut config: AppConfig, defaults: AppConfig) -> AppConfig {
    if config.library_path.as_os_str().is_empty() {
        config.library_path = defaults.library_path;
    }
    if config.bible_dataset_path.as_os_str().is_empty() {
        config.bible_dataset_path = defaults.bible_dataset_path;
    }
    if config.logs_dir.as_os_str().is_empty() {
        config.logs_dir = defaults.logs_dir;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r##"
            [ipc]
            socket_path = "/tmp/lp.sock"

            [library]
            path = "/srv/library.json"

            [appearance]
            background = "#101010"
            text_scale = 2
        "##;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.socket_path, PathBuf::from("/tmp/lp.sock"));
        assert_eq!(config.library_path, PathBuf::from("/srv/library.json"));
        assert_eq!(config.background, "#101010");
        assert_eq!(config.text_scale, 2.0);
        assert!(config.logs_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[ipc\nsocket_path = ").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(resolve_config(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn test_empty_paths_are_filled_from_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[bible]\ndataset_path = \"/srv/kjv.json\"\n")
            .unwrap();

        let config = resolve_config(Some(temp_file.path())).unwrap();

        assert_eq!(config.bible_dataset_path, PathBuf::from("/srv/kjv.json"));
        assert!(config.library_path.ends_with("library.json"));
        assert!(config.logs_dir.ends_with("logs"));
    }
}
