//! Corpus building: segment raw dumps, keep records carrying a target emoji,
//! clean them, and append one row per implied emotion.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};
use whatlang::Lang;

use crate::corpus::{CorpusSink, CorpusWriter};
use crate::emoji::{contains_target_emoji, extract_emojis, identify_emotions};
use crate::error::Result;
use crate::logging::OperationTimer;
use crate::metrics::PipelineMetrics;
use crate::models::{BuildSummary, CorpusRow, RawRecord};
use crate::sanitizer::TextSanitizer;
use crate::segmenter::{RecordSegmenter, SegmenterOptions};
use crate::validation::InputValidator;

/// Knobs for a corpus-building run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// End-of-file handling of the segmenter
    pub segmenter: SegmenterOptions,
    /// Drop records reliably detected as a language other than English
    pub require_english: bool,
}

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// None of the labelling glyphs is present
    NoTargetEmoji,
    /// Text detected as another language
    NotEnglish,
    /// Glyphs present but none mapped to an emotion
    Unlabeled,
    /// One row per distinct emotion, all with the same text
    Rows(Vec<CorpusRow>),
}

/// Turns raw dumps into corpus rows
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    sanitizer: TextSanitizer,
    options: BuildOptions,
}

impl CorpusBuilder {
    /// Create a builder
    pub fn new(options: BuildOptions) -> Result<Self> {
        Ok(Self {
            sanitizer: TextSanitizer::new()?,
            options,
        })
    }

    /// Options this builder runs with
    #[must_use]
    pub const fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Decide what a single record contributes to the corpus
    #[must_use]
    pub fn classify_record(&self, record: &RawRecord) -> RecordOutcome {
        // Cheap gate before any regex work
        if !contains_target_emoji(&record.text) {
            return RecordOutcome::NoTargetEmoji;
        }

        let cleaned = self.sanitizer.clean(&record.text);
        let (text, emojis) = extract_emojis(&cleaned);

        if self.options.require_english && !is_english(&text) {
            return RecordOutcome::NotEnglish;
        }

        let emotions = identify_emotions(&emojis);
        if emotions.is_empty() {
            return RecordOutcome::Unlabeled;
        }

        RecordOutcome::Rows(
            emotions
                .into_iter()
                .map(|label| CorpusRow::new(label, text.clone()))
                .collect(),
        )
    }

    /// Rows a record contributes, empty if it is dropped
    #[must_use]
    pub fn rows_for_record(&self, record: &RawRecord) -> Vec<CorpusRow> {
        match self.classify_record(record) {
            RecordOutcome::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }

    /// Run every record of `reader` through the pipeline into `sink`.
    ///
    /// Returns the number of rows written.
    pub fn process_reader<R: BufRead>(
        &self,
        reader: R,
        sink: &mut dyn CorpusSink,
        metrics: &mut PipelineMetrics,
    ) -> Result<u64> {
        let mut rows_written = 0;

        for record in RecordSegmenter::with_options(reader, self.options.segmenter)? {
            let record = record?;
            metrics.record_seen(record.timestamp);

            match self.classify_record(&record) {
                RecordOutcome::NoTargetEmoji => metrics.record_without_target_emoji(),
                RecordOutcome::NotEnglish => {
                    debug!(identifier = record.identifier.as_deref(), "dropping non-English record");
                    metrics.record_not_english();
                },
                RecordOutcome::Unlabeled => {
                    debug!(identifier = record.identifier.as_deref(), "record has emoji but no emotion");
                    metrics.record_unlabeled();
                },
                RecordOutcome::Rows(rows) => {
                    for row in &rows {
                        sink.write_row(row)?;
                        metrics.record_row(row.label);
                        rows_written += 1;
                    }
                },
            }
        }

        Ok(rows_written)
    }

    /// Process one dump file
    pub fn process_file(&self, path: &Path, sink: &mut dyn CorpusSink, metrics: &mut PipelineMetrics) -> Result<u64> {
        info!("Writing the tweets from {} into the corpus", path.display());
        let timer = OperationTimer::new("process_file");

        let file = File::open(path)?;
        let rows = self.process_reader(BufReader::new(file), sink, metrics)?;

        metrics.record_file(timer.elapsed());
        timer.finish();
        debug!(path = %path.display(), rows, "file done");
        Ok(rows)
    }

    /// Process `files` in order, appending everything to one sink
    pub fn build(&self, files: &[PathBuf], sink: &mut dyn CorpusSink) -> Result<BuildSummary> {
        let timer = OperationTimer::new("build_corpus");
        let mut metrics = PipelineMetrics::default();

        for path in files {
            self.process_file(path, sink, &mut metrics)?;
        }
        sink.flush()?;

        let mut summary = metrics.to_summary();
        summary.elapsed_ms = timer.finish();
        info!(
            files = summary.files_processed,
            rows = summary.rows_written,
            "Corpus-building completed in {:.2} seconds",
            summary.elapsed_ms as f64 / 1000.0
        );
        Ok(summary)
    }

    /// Process every file in `dir` matching `pattern`
    pub fn build_from_dir(&self, dir: &Path, pattern: &str, sink: &mut dyn CorpusSink) -> Result<BuildSummary> {
        let files = discover_inputs(dir, pattern)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), pattern, "no raw dump files found");
        }
        self.build(&files, sink)
    }

    /// Append every file in `dir` matching `pattern` to the store at `corpus_path`.
    ///
    /// The store is only opened once at least one input file matched, so an
    /// empty input directory leaves no empty store behind.
    pub fn build_into_store(&self, dir: &Path, pattern: &str, corpus_path: &Path) -> Result<BuildSummary> {
        let files = discover_inputs(dir, pattern)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), pattern, "no raw dump files found");
            return Ok(BuildSummary::default());
        }

        let mut writer = CorpusWriter::open_append(corpus_path)?;
        self.build(&files, &mut writer)
    }
}

/// False only when the text is reliably detected as another language
fn is_english(text: &str) -> bool {
    whatlang::detect(text).map_or(true, |info| info.lang() == Lang::Eng || !info.is_reliable())
}

/// Files in `dir` whose name matches the glob `pattern`, sorted by name
pub fn discover_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    InputValidator::validate_input_dir(dir)?;
    let matcher = Pattern::new(pattern)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if matcher.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort();

    debug!(dir = %dir.display(), count = files.len(), "discovered raw dump files");
    Ok(files)
}
