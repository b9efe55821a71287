//! Corpus store: an append-only, semicolon-delimited `label;text` file.
//!
//! No header row. Texts are written with minimal quoting, so a text that
//! happens to contain `;`, `"` or a line break is quoted instead of breaking
//! the two-column layout.

use std::collections::HashMap;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::models::{CorpusRow, Dataset, EmotionLabel};
use crate::validation::InputValidator;

/// Field delimiter of the corpus store
pub const DELIMITER: u8 = b';';

/// Destination for corpus rows
pub trait CorpusSink {
    /// Append one row
    fn write_row(&mut self, row: &CorpusRow) -> Result<()>;

    /// Push buffered rows to the underlying store
    fn flush(&mut self) -> Result<()>;
}

impl CorpusSink for Vec<CorpusRow> {
    fn write_row(&mut self, row: &CorpusRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Appends rows to a corpus file, held open for the writer's lifetime
pub struct CorpusWriter {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
    rows_written: u64,
}

impl CorpusWriter {
    /// Open `path` for appending, creating it and its parent directories
    pub fn open_append(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        debug!(path = %path.display(), "opened corpus store for appending");
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows_written: 0,
        })
    }

    /// Rows appended through this writer
    #[must_use]
    pub const fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Path of the store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSink for CorpusWriter {
    fn write_row(&mut self, row: &CorpusRow) -> Result<()> {
        self.writer.write_record([row.label.as_str(), row.text.as_str()])?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads a corpus file back as typed rows
pub struct CorpusReader {
    reader: csv::Reader<BufReader<File>>,
}

impl CorpusReader {
    /// Open an existing store
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));
        Ok(Self { reader })
    }

    /// Iterate over the rows in file order
    pub fn rows(&mut self) -> impl Iterator<Item = Result<CorpusRow>> + '_ {
        self.reader
            .records()
            .map(|record| parse_row(&record?))
    }

    /// Read up to `limit` rows as aligned text and label sequences
    pub fn into_dataset(mut self, limit: Option<usize>) -> Result<Dataset> {
        let mut dataset = Dataset::default();
        for row in self.rows().take(limit.unwrap_or(usize::MAX)) {
            let row = row?;
            dataset.labels.push(row.label);
            dataset.texts.push(row.text);
        }
        Ok(dataset)
    }
}

fn parse_row(record: &StringRecord) -> Result<CorpusRow> {
    let line = record.position().map_or(0, csv::Position::line);
    let invalid = |reason: String| CorpusError::InvalidRow { line, reason };

    let label = record
        .get(0)
        .ok_or_else(|| invalid("empty row".to_string()))?
        .parse::<EmotionLabel>()
        .map_err(|e| invalid(e.to_string()))?;
    let text = record
        .get(1)
        .ok_or_else(|| invalid("missing text column".to_string()))?;

    Ok(CorpusRow::new(label, text))
}

/// Read every row of a store
pub fn read_rows(path: &Path) -> Result<Vec<CorpusRow>> {
    CorpusReader::open(path)?.rows().collect()
}

/// Read a store as a dataset, optionally only the first `limit` rows
pub fn read_dataset(path: &Path, limit: Option<usize>) -> Result<Dataset> {
    InputValidator::validate_limit(limit)?;
    CorpusReader::open(path)?.into_dataset(limit)
}

/// Row count per emotion, most common first
pub fn emotion_frequency(path: &Path) -> Result<Vec<(EmotionLabel, usize)>> {
    let mut counts: HashMap<EmotionLabel, usize> = HashMap::new();
    for row in CorpusReader::open(path)?.rows() {
        *counts.entry(row?.label).or_default() += 1;
    }

    let mut frequency: Vec<_> = counts.into_iter().collect();
    frequency.sort_by(|(a_label, a_count), (b_label, b_count)| {
        b_count.cmp(a_count).then(a_label.cmp(b_label))
    });

    info!(path = %path.display(), labels = frequency.len(), "computed emotion frequency");
    Ok(frequency)
}
