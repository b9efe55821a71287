use std::path::Path;

use crate::error::{CorpusError, Result};

/// Validation utilities for command-line and configuration input
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate the directory raw dumps are read from
    pub fn validate_input_dir(path: &Path) -> Result<()> {
        Self::validate_path_string(path)?;
        if !path.is_dir() {
            return Err(CorpusError::MissingInputDir(path.to_path_buf()));
        }
        Ok(())
    }

    /// Validate a file name glob such as `tweets*.txt`
    pub fn validate_file_pattern(pattern: &str) -> Result<()> {
        if pattern.trim().is_empty() {
            return Err(CorpusError::InvalidInput("File pattern cannot be empty".to_string()));
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(CorpusError::InvalidInput(format!(
                "File pattern must not contain path separators: {pattern}"
            )));
        }
        glob::Pattern::new(pattern)?;
        Ok(())
    }

    /// Validate the corpus store path
    ///
    /// The store may not exist yet, but it must not be a directory.
    pub fn validate_corpus_path(path: &Path) -> Result<()> {
        Self::validate_path_string(path)?;
        if path.is_dir() {
            return Err(CorpusError::InvalidInput(format!(
                "Corpus path is a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Validate a dataset row limit
    pub fn validate_limit(limit: Option<usize>) -> Result<()> {
        if limit == Some(0) {
            return Err(CorpusError::InvalidInput("Row limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    fn validate_path_string(path: &Path) -> Result<()> {
        let path_str = path.to_string_lossy();
        if path_str.trim().is_empty() {
            return Err(CorpusError::InvalidInput("Path cannot be empty".to_string()));
        }
        if path_str.contains('\0') {
            return Err(CorpusError::InvalidInput("Path contains a null byte".to_string()));
        }
        // Check path length
        if path_str.len() > 4096 {
            return Err(CorpusError::InvalidInput("Path too long (max 4096 characters)".to_string()));
        }
        Ok(())
    }
}
