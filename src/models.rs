//! Data models for the corpus pipeline
//!
//! Raw records as reconstructed from a dump, the closed emotion taxonomy,
//! corpus rows and the per-run summary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Format of the leading timestamp field written by the stream collector
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One of the six emotions a corpus row can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    /// 😨 😱
    Fear,
    /// 😍 ❤
    Happiness,
    /// 😳 😮
    Surprise,
    /// 😡 😠
    Anger,
    /// 😢 😔
    Sadness,
    /// 😖 🤢
    Disgust,
}

impl EmotionLabel {
    /// Every label, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Fear,
        Self::Happiness,
        Self::Surprise,
        Self::Anger,
        Self::Sadness,
        Self::Disgust,
    ];

    /// Name as written to the corpus store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fear => "fear",
            Self::Happiness => "happiness",
            Self::Surprise => "surprise",
            Self::Anger => "anger",
            Self::Sadness => "sadness",
            Self::Disgust => "disgust",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CorpusError::UnknownEmotion(s.to_string()))
    }
}

/// A captured message as reconstructed from consecutive dump lines
///
/// `text` keeps the original line terminators. The first line of a record
/// normally looks like `"2017-08-16 19:10:26","897898364787978241","...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Full block text
    pub text: String,
    /// First 18-digit run of the block, if any
    pub identifier: Option<String>,
    /// Capture time from the leading quoted field, if parseable
    pub timestamp: Option<NaiveDateTime>,
}

impl RawRecord {
    /// Build a record from its block text, locating identifier and timestamp
    #[must_use]
    pub fn new(text: String, identifier: Option<String>) -> Self {
        let timestamp = parse_leading_timestamp(&text);
        Self {
            text,
            identifier,
            timestamp,
        }
    }
}

fn parse_leading_timestamp(text: &str) -> Option<NaiveDateTime> {
    let rest = text.strip_prefix('"')?;
    let end = rest.find('"')?;
    NaiveDateTime::parse_from_str(&rest[..end], TIMESTAMP_FORMAT).ok()
}

/// A persisted (label, cleaned text) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRow {
    /// Emotion implied by the record's emoji
    pub label: EmotionLabel,
    /// Cleaned text with emoji removed
    pub text: String,
}

impl CorpusRow {
    /// Create a new row
    pub fn new(label: EmotionLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// Labels and texts as two aligned sequences, the shape classifiers consume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Cleaned texts
    pub texts: Vec<String>,
    /// Label of each text, same index
    pub labels: Vec<EmotionLabel>,
}

impl Dataset {
    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if no samples were read
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// What one corpus-building run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    /// Raw dump files read
    pub files_processed: usize,
    /// Records reconstructed by the segmenter
    pub records_seen: u64,
    /// Records without any target emoji
    pub records_without_target_emoji: u64,
    /// Records dropped by the English filter
    pub records_not_english: u64,
    /// Records that passed the gate but produced no label
    pub records_unlabeled: u64,
    /// Rows appended to the store
    pub rows_written: u64,
    /// Rows appended per label
    pub rows_by_label: BTreeMap<EmotionLabel, u64>,
    /// Earliest record timestamp seen
    pub earliest_record: Option<NaiveDateTime>,
    /// Latest record timestamp seen
    pub latest_record: Option<NaiveDateTime>,
    /// Wall time for the whole run
    pub elapsed_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_names() {
        for label in EmotionLabel::ALL {
            assert_eq!(label.as_str().parse::<EmotionLabel>().unwrap(), label);
        }
        assert!("joy".parse::<EmotionLabel>().is_err());
    }

    #[test]
    fn test_raw_record_timestamp() {
        let record = RawRecord::new(
            "\"2017-08-16 19:10:26\",\"897898364787978241\",\"hi\"\n".to_string(),
            Some("897898364787978241".to_string()),
        );
        let ts = record.timestamp.unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), "2017-08-16 19:10:26");
    }

    #[test]
    fn test_raw_record_without_timestamp() {
        let record = RawRecord::new("continuation line\n".to_string(), None);
        assert!(record.timestamp.is_none());
    }
}
