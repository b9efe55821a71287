use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::builder::BuildOptions;
use crate::error::{CorpusError, Result};
use crate::segmenter::SegmenterOptions;

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where raw dumps are read from
    pub input: InputConfig,
    /// Where the corpus is appended
    pub corpus: CorpusConfig,
    /// Record filters beyond the emoji gate
    pub filter: FilterConfig,
    /// Logging setup
    pub logging: LoggingConfig,
}

/// Raw dump input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding the dated dump files
    pub directory: String,
    /// File name glob, `*` and `?` supported
    pub file_pattern: String,
    /// Keep the unterminated last record of each file
    pub emit_trailing_record: bool,
}

/// Corpus store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path of the semicolon-delimited store
    pub path: String,
}

/// Optional record filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Drop records detected as another language
    pub require_english: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Optional rolling JSON log file
    pub file_path: Option<String>,
    /// Console format, "json" or "text"
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                directory: "../streaming".to_string(),
                file_pattern: "tweets*.txt".to_string(),
                emit_trailing_record: false,
            },
            corpus: CorpusConfig {
                path: "corpus.csv".to_string(),
            },
            filter: FilterConfig {
                require_english: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default.*`, `config/local.*` and
    /// `emotion-corpus.*` if present, then `EMOTION_CORPUS__SECTION__KEY`
    /// environment variables.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .add_source(Config::try_from(&Self::default())?)
            // Add config files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("emotion-corpus").required(false))
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix("EMOTION_CORPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.input.directory.trim().is_empty() {
            return Err(CorpusError::InvalidConfig("input.directory must not be empty".to_string()));
        }
        if self.input.file_pattern.trim().is_empty() {
            return Err(CorpusError::InvalidConfig("input.file_pattern must not be empty".to_string()));
        }
        if self.input.file_pattern.contains('/') {
            return Err(CorpusError::InvalidConfig(format!(
                "input.file_pattern must be a file name pattern, got: {}",
                self.input.file_pattern
            )));
        }
        if self.corpus.path.trim().is_empty() {
            return Err(CorpusError::InvalidConfig("corpus.path must not be empty".to_string()));
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(CorpusError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(CorpusError::InvalidConfig(format!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format, valid_formats
            )));
        }

        Ok(())
    }

    /// Pipeline options derived from this configuration
    #[must_use]
    pub const fn build_options(&self) -> BuildOptions {
        BuildOptions {
            segmenter: SegmenterOptions {
                emit_trailing: self.input.emit_trailing_record,
            },
            require_english: self.filter.require_english,
        }
    }

    /// Input directory as a path
    #[must_use]
    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(&self.input.directory)
    }

    /// Corpus store as a path
    #[must_use]
    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.corpus.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.input.file_pattern, "tweets*.txt");
        assert_eq!(config.corpus.path, "corpus.csv");
        assert!(!config.input.emit_trailing_record);
    }

    #[test]
    fn test_config_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.corpus.path = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
