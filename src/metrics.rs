//! Pipeline counters.
//!
//! Counts are kept locally (they feed the [`BuildSummary`]) and mirrored to
//! the `metrics` facade, which does nothing unless the host installs a
//! recorder.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDateTime;
use metrics::{counter, histogram};

use crate::models::{BuildSummary, EmotionLabel};

/// Counters for one corpus-building run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Dump files fully processed
    pub files_processed: usize,
    /// Records produced by the segmenter
    pub records_seen: u64,
    /// Records dropped by the presence gate
    pub records_without_target_emoji: u64,
    /// Records dropped by the English filter
    pub records_not_english: u64,
    /// Records that passed the gate but produced no label
    pub records_unlabeled: u64,
    /// Rows handed to the sink
    pub rows_written: u64,
    /// Rows handed to the sink, per label
    pub rows_by_label: BTreeMap<EmotionLabel, u64>,
    /// Earliest record timestamp seen
    pub earliest_record: Option<NaiveDateTime>,
    /// Latest record timestamp seen
    pub latest_record: Option<NaiveDateTime>,
}

impl PipelineMetrics {
    /// Record a segmented record and widen the observed time span
    pub fn record_seen(&mut self, timestamp: Option<NaiveDateTime>) {
        self.records_seen += 1;
        if let Some(ts) = timestamp {
            self.earliest_record = Some(self.earliest_record.map_or(ts, |t| t.min(ts)));
            self.latest_record = Some(self.latest_record.map_or(ts, |t| t.max(ts)));
        }
        counter!("emotion_corpus_records_total").increment(1);
    }

    /// Record a record without any target emoji
    pub fn record_without_target_emoji(&mut self) {
        self.records_without_target_emoji += 1;
        counter!("emotion_corpus_records_dropped_total", "reason" => "no_target_emoji").increment(1);
    }

    /// Record a record dropped as non-English
    pub fn record_not_english(&mut self) {
        self.records_not_english += 1;
        counter!("emotion_corpus_records_dropped_total", "reason" => "not_english").increment(1);
    }

    /// Record a record whose glyphs mapped to no emotion
    pub fn record_unlabeled(&mut self) {
        self.records_unlabeled += 1;
        counter!("emotion_corpus_records_dropped_total", "reason" => "unlabeled").increment(1);
    }

    /// Record a row written with `label`
    pub fn record_row(&mut self, label: EmotionLabel) {
        self.rows_written += 1;
        *self.rows_by_label.entry(label).or_default() += 1;
        counter!("emotion_corpus_rows_written_total", "emotion" => label.as_str()).increment(1);
    }

    /// Record a finished dump file
    pub fn record_file(&mut self, duration: Duration) {
        self.files_processed += 1;
        counter!("emotion_corpus_files_processed_total").increment(1);
        histogram!("emotion_corpus_file_duration_seconds").record(duration.as_secs_f64());
    }

    /// Fill the counting fields of a run summary
    #[must_use]
    pub fn to_summary(&self) -> BuildSummary {
        BuildSummary {
            files_processed: self.files_processed,
            records_seen: self.records_seen,
            records_without_target_emoji: self.records_without_target_emoji,
            records_not_english: self.records_not_english,
            records_unlabeled: self.records_unlabeled,
            rows_written: self.rows_written,
            rows_by_label: self.rows_by_label.clone(),
            earliest_record: self.earliest_record,
            latest_record: self.latest_record,
            elapsed_ms: 0,
        }
    }
}
