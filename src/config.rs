//! Configuration file parser for ~/.config/feedcraft/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Every key has a default, so any subset may be given.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::model::FeedOptions;
use crate::xml::{EncodeOptions, DEFAULT_INDENT};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indent nested elements. `false` writes the document on a single line.
    pub pretty: bool,

    /// Spaces per nesting level when `pretty` is on.
    pub indent: usize,

    /// `generator` for feeds that do not set their own.
    pub generator: Option<String>,

    /// `docs` for feeds that do not set their own.
    pub docs: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: DEFAULT_INDENT,
            generator: None,
            docs: None,
        }
    }
}

impl Config {
    /// Largest config file accepted (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] = ["pretty", "indent", "generator", "docs"];

    /// Load configuration from a TOML file.
    ///
    /// A missing or blank file yields the defaults. Keys this version does
    /// not know are logged and otherwise ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let Some(content) = Self::read(path)? else {
            tracing::debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        let table: toml::Table = content.parse()?;
        for key in table.keys() {
            if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            }
        }

        let config: Config = toml::Value::Table(table).try_into()?;
        tracing::info!(path = %path.display(), pretty = config.pretty, "Loaded configuration");
        Ok(config)
    }

    /// File contents, or `None` when there is no file.
    fn read(path: &Path) -> Result<Option<String>, ConfigError> {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if size > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "Config file is {size} bytes (max {} bytes)",
                Self::MAX_FILE_SIZE
            )));
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writer options described by this configuration.
    pub fn encode_options(&self) -> EncodeOptions {
        if self.pretty {
            EncodeOptions::pretty(self.indent)
        } else {
            EncodeOptions::compact()
        }
    }

    /// Fills `generator` and `docs` on feeds that leave them unset.
    pub fn apply_defaults(&self, options: &mut FeedOptions) {
        if options.generator.as_deref().map_or(true, str::is_empty) {
            if let Some(generator) = &self.generator {
                options.generator = Some(generator.clone());
            }
        }
        if options.docs.as_deref().map_or(true, str::is_empty) {
            if let Some(docs) = &self.docs {
                options.docs = Some(docs.clone());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.pretty);
        assert_eq!(config.indent, 4);
        assert!(config.generator.is_none());
        assert!(config.docs.is_none());
        assert_eq!(config.encode_options(), EncodeOptions::pretty(4));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedcraft_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  ").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
pretty = false
indent = 2
generator = "my-site"
docs = "https://example.com/rss-docs"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.indent, 2);
        assert_eq!(config.generator.as_deref(), Some("my-site"));
        assert_eq!(config.docs.as_deref(), Some("https://example.com/rss-docs"));
        assert_eq!(config.encode_options(), EncodeOptions::compact());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "indent = 2\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.pretty);
        assert_eq!(config.encode_options(), EncodeOptions::pretty(2));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_wrongtype");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "pretty = \"yes\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "indent = 3\ntotally_fake_key = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.indent, 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("feedcraft_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_apply_defaults_only_fills_gaps() {
        let config = Config {
            generator: Some("site".to_string()),
            docs: Some("https://example.com/docs".to_string()),
            ..Default::default()
        };

        let mut unset = FeedOptions::default();
        config.apply_defaults(&mut unset);
        assert_eq!(unset.generator.as_deref(), Some("site"));
        assert_eq!(unset.docs.as_deref(), Some("https://example.com/docs"));

        let mut set = FeedOptions {
            generator: Some("own".to_string()),
            docs: Some(String::new()),
            ..Default::default()
        };
        config.apply_defaults(&mut set);
        assert_eq!(set.generator.as_deref(), Some("own"));
        assert_eq!(set.docs.as_deref(), Some("https://example.com/docs"));
    }
}
