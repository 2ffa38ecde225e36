//! # Pure Data Module - Configuration DTO
//!
//! Maps the TOML configuration file onto [`AppConfig`]. No validation and no
//! defaulting happens here: an empty string or zero is a fact from the file,
//! and the host decides what to do with it.
//!
//! 纯数据模块：只做 TOML → DTO 映射，不做校验、不计算默认值。

use std::path::PathBuf;

/// Host configuration (pure data, no logic).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// IPC socket path (empty = use the runtime directory default)
    pub socket_path: PathBuf,

    /// JSON library file holding songs and plans
    pub library_path: PathBuf,

    /// Local Bible dataset (JSON array of verses)
    pub bible_dataset_path: PathBuf,

    /// Directory for rolling log files
    pub logs_dir: PathBuf,

    /// Initial surface background colour (empty = built-in default)
    pub background: String,

    /// Initial surface foreground colour (empty = built-in default)
    pub foreground: String,

    /// Initial text scale (0 = built-in default)
    pub text_scale: f64,
}

fn path_at(value: &toml::Value, section: &str, key: &str) -> PathBuf {
    PathBuf::from(str_at(value, section, key))
}

fn str_at(value: &toml::Value, section: &str, key: &str) -> String {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Must NOT contain validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            socket_path: path_at(toml_value, "ipc", "socket_path"),
            library_path: path_at(toml_value, "library", "path"),
            bible_dataset_path: path_at(toml_value, "bible", "dataset_path"),
            logs_dir: path_at(toml_value, "logging", "dir"),
            background: str_at(toml_value, "appearance", "background"),
            foreground: str_at(toml_value, "appearance", "foreground"),
            text_scale: toml_value
                .get("appearance")
                .and_then(|a| a.get("text_scale"))
                .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
                .unwrap_or(0.0),
        })
    }

    /// Create empty AppConfig (all empty/zero values).
    pub fn empty() -> Self {
        Self {
            socket_path: PathBuf::new(),
            library_path: PathBuf::new(),
            bible_dataset_path: PathBuf::new(),
            logs_dir: PathBuf::new(),
            background: String::new(),
            foreground: String::new(),
            text_scale: 0.0,
        }
    }

    /// AppConfig with file paths laid out under `data_dir`.
    ///
    /// `data_dir` is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            library_path: data_dir.join("library.json"),
            bible_dataset_path: data_dir.join("bible.json"),
            logs_dir: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r##"
            [ipc]
            socket_path = "/run/user/1000/liveprojector.sock"

            [library]
            path = "/srv/church/library.json"

            [bible]
            dataset_path = "/srv/church/kjv.json"

            [logging]
            dir = "/var/log/liveprojector"

            [appearance]
            background = "#000000"
            foreground = "#fafafa"
            text_scale = 1.25
        "##;
        let value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.socket_path, PathBuf::from("/run/user/1000/liveprojector.sock"));
        assert_eq!(config.library_path, PathBuf::from("/srv/church/library.json"));
        assert_eq!(config.bible_dataset_path, PathBuf::from("/srv/church/kjv.json"));
        assert_eq!(config.logs_dir, PathBuf::from("/var/log/liveprojector"));
        assert_eq!(config.background, "#000000");
        assert_eq!(config.foreground, "#fafafa");
        assert_eq!(config.text_scale, 1.25);
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let value: Value = toml::from_str("[appearance]\ntext_scale = 2").unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        // Empty values are valid facts, integers are accepted as scales
        assert_eq!(config.library_path, PathBuf::new());
        assert_eq!(config.background, "");
        assert_eq!(config.text_scale, 2.0);
    }

    #[test]
    fn test_with_system_defaults_creates_paths_under_data_dir() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/lp"));

        assert_eq!(config.library_path, PathBuf::from("/tmp/lp/library.json"));
        assert_eq!(config.bible_dataset_path, PathBuf::from("/tmp/lp/bible.json"));
        assert_eq!(config.logs_dir, PathBuf::from("/tmp/lp/logs"));
        assert_eq!(config.socket_path, PathBuf::new());
    }
}
