//! Emotion Corpus - Emoji-labelled Tweet Corpus Builder
//!
//! A Rust library for turning raw Twitter streaming dumps into an
//! emotion-labelled text corpus, using emoji as weak labels.
//!
//! # Features
//!
//! - Reconstruct multi-line tweets from line-oriented dumps
//! - Strip mentions, retweet markers, URLs and non-ASCII noise
//! - Map emoji to six emotions through a fixed table
//! - Append `label;text` rows to a corpus store and read them back

/// Corpus building pipeline
pub mod builder;
/// Configuration management
pub mod config;
/// Corpus store reading and writing
pub mod corpus;
/// Emoji whitelist and emotion table
pub mod emoji;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Text cleaning
pub mod sanitizer;
/// Raw dump record segmentation
pub mod segmenter;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use builder::{BuildOptions, CorpusBuilder};
pub use corpus::{CorpusReader, CorpusSink, CorpusWriter};
pub use error::{CorpusError, Result};
pub use models::{BuildSummary, CorpusRow, Dataset, EmotionLabel, RawRecord};
pub use sanitizer::TextSanitizer;
pub use segmenter::{RecordSegmenter, SegmenterOptions};
