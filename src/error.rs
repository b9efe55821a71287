//! Error types for the emotion-corpus library.
//!
//! Only file-level failures surface as errors. Per-record anomalies (a block
//! without an identifier, a record without target emoji, a glyph with no
//! emotion) are recovered inside the pipeline and show up in the metrics.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or reading a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// File I/O errors, including invalid UTF-8 in a raw dump
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus store read/write errors
    #[error("Corpus store error: {0}")]
    Csv(#[from] csv::Error),

    /// A corpus row that does not hold a valid (label, text) pair
    #[error("Invalid corpus row at line {line}: {reason}")]
    InvalidRow {
        /// 1-based line of the row in the store
        line: u64,
        /// What was wrong with it
        reason: String,
    },

    /// A label outside the closed emotion set
    #[error("Unknown emotion label: {0}")]
    UnknownEmotion(String),

    /// Pattern compilation errors
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Malformed input file name pattern
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Input directory that cannot be scanned
    #[error("Input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Result with CorpusError
pub type Result<T> = std::result::Result<T, CorpusError>;

impl From<config::ConfigError> for CorpusError {
    fn from(err: config::ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
