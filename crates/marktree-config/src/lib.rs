//! `~/.config/marktree/config.toml`
//!
//! ```toml
//! log_level = "debug"
//! script_dir = "$HOME/marktree-scripts"
//!
//! [editor]
//! source_mode = true
//! ```
//!
//! Every key is optional; a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter names understood by `env_logger`.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown log_level '{level}' in {config_path}, expected one of: {}", LOG_LEVELS.join(", "))]
    InvalidLogLevel { config_path: PathBuf, level: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Where relative `--edit` script paths are looked up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<PathBuf>,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Allow editing html block tag text.
    #[serde(default)]
    pub source_mode: bool,
}

impl Config {
    /// `~/.config/marktree/config.toml` with the tilde expanded.
    pub fn config_path() -> PathBuf {
        let dir = shellexpand::tilde("~/.config/marktree");
        Path::new(dir.as_ref()).join("config.toml")
    }

    /// Load the user's config file. `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
            config_path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path).map(Some)
    }

    /// Parse and check config text; `origin` only names the file in errors.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(text).map_err(|source| ConfigError::ConfigParseError {
                config_path: origin.to_path_buf(),
                source,
            })?;

        if let Some(level) = &config.log_level {
            let level = level.to_ascii_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidLogLevel {
                    config_path: origin.to_path_buf(),
                    level,
                });
            }
            config.log_level = Some(level);
        }
        // $VARS and ~ in script_dir; left alone when expansion fails
        config.script_dir = config.script_dir.map(|dir| expand(&dir).unwrap_or(dir));
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// Write the config as TOML, creating missing parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve a script path given on the command line. A relative path
    /// that does not exist as given is looked up in `script_dir`.
    pub fn resolve_script(&self, script: &Path) -> PathBuf {
        match &self.script_dir {
            Some(dir) if script.is_relative() && !script.exists() => dir.join(script),
            _ => script.to_path_buf(),
        }
    }
}

fn expand(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        Config::from_toml(text, Path::new("test.toml"))
    }

    #[test]
    fn config_lives_under_dot_config() {
        let path = Config::config_path();
        let path = path.to_string_lossy();
        assert!(!path.starts_with('~'));
        assert!(path.ends_with(".config/marktree/config.toml"));
    }

    #[test]
    fn every_key_is_optional() {
        assert_eq!(parse("").unwrap(), Config::default());
        assert_eq!(parse("[editor]").unwrap(), Config::default());
    }

    #[test]
    fn editor_section() {
        let config = parse("log_level = \"debug\"\n\n[editor]\nsource_mode = true\n").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.editor.source_mode);
    }

    #[rstest]
    #[case("INFO", "info")]
    #[case("Trace", "trace")]
    #[case("off", "off")]
    fn log_level_is_lowercased(#[case] written: &str, #[case] stored: &str) {
        let config = parse(&format!("log_level = \"{written}\"")).unwrap();
        assert_eq!(config.log_level.as_deref(), Some(stored));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = parse("log_level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { ref level, .. } if level == "loud"));
        assert!(err.to_string().contains("off, error, warn, info, debug, trace"));
    }

    #[test]
    fn broken_toml_names_the_file() {
        let err = parse("[editor\nsource_mode = ").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_path(dir.path().join("absent.toml")).unwrap().is_none());
    }

    #[test]
    fn save_creates_directories_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        let config = Config {
            log_level: Some("warn".into()),
            script_dir: Some(PathBuf::from("/srv/scripts")),
            editor: EditorConfig { source_mode: true },
        };

        config.save_to_path(&path).unwrap();

        assert_eq!(Config::load_from_path(&path).unwrap(), Some(config));
    }

    #[test]
    fn default_config_saves_only_the_editor_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to_path(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("log_level"));
        assert!(text.contains("[editor]"));
    }

    #[test]
    fn script_dir_expands_variables() {
        unsafe {
            std::env::set_var("MARKTREE_TEST_SCRIPTS", "/custom/scripts");
        }

        let config = parse("script_dir = \"$MARKTREE_TEST_SCRIPTS/edits\"").unwrap();

        assert_eq!(config.script_dir, Some(PathBuf::from("/custom/scripts/edits")));
        assert_eq!(
            config.resolve_script(Path::new("no-such-script.txt")),
            PathBuf::from("/custom/scripts/edits/no-such-script.txt")
        );
        assert_eq!(
            config.resolve_script(Path::new("/abs/script.txt")),
            PathBuf::from("/abs/script.txt")
        );

        unsafe {
            std::env::remove_var("MARKTREE_TEST_SCRIPTS");
        }
    }

    #[test]
    fn unexpandable_script_dir_is_kept() {
        let config = parse("script_dir = \"$MARKTREE_SURELY_UNSET_VAR/x\"").unwrap();
        assert_eq!(
            config.script_dir,
            Some(PathBuf::from("$MARKTREE_SURELY_UNSET_VAR/x"))
        );
    }

    #[test]
    fn tilde_expands() {
        let expanded = expand(Path::new("~/notes")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("notes"));
    }
}
