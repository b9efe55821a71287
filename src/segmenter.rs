//! Record segmentation for raw stream dumps.
//!
//! The collector writes one CSV-ish line per tweet, but tweet text can hold
//! newlines, so a logical record may span several physical lines. A line that
//! contains an 18-digit run starts a new record; every other line continues
//! the current one.

use std::io::BufRead;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::models::RawRecord;
use crate::sanitizer::IDENTIFIER_PATTERN;

/// How the segmenter treats the end of its input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Yield the record still open at end of input.
    ///
    /// Off by default: the collector may be mid-write when a dump is read, so
    /// the last record of a file counts as unterminated and is dropped.
    pub emit_trailing: bool,
}

/// Single forward pass over a line source, yielding completed records
#[derive(Debug)]
pub struct RecordSegmenter<R> {
    reader: R,
    options: SegmenterOptions,
    identifier_regex: Regex,
    current: String,
    current_id: Option<String>,
    started: bool,
    finished: bool,
    line_number: u64,
    skipped_lines: u64,
}

impl<R: BufRead> RecordSegmenter<R> {
    /// Segment `reader` with default options
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, SegmenterOptions::default())
    }

    /// Segment `reader` with explicit options
    pub fn with_options(reader: R, options: SegmenterOptions) -> Result<Self> {
        Ok(Self {
            reader,
            options,
            identifier_regex: Regex::new(IDENTIFIER_PATTERN)?,
            current: String::new(),
            current_id: None,
            started: false,
            finished: false,
            line_number: 0,
            skipped_lines: 0,
        })
    }

    /// Lines consumed so far
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Lines skipped before the first identifier line
    #[must_use]
    pub const fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    /// Close the open record and start a new one with `line`.
    ///
    /// Returns the closed record, or nothing for the first identifier line.
    fn start_record(&mut self, line: String, identifier: String) -> Option<RawRecord> {
        let previous = std::mem::replace(&mut self.current, line);
        let previous_id = self.current_id.replace(identifier);

        if !self.started {
            self.started = true;
            if self.skipped_lines > 0 {
                debug!(
                    lines = self.skipped_lines,
                    "discarded text before the first record identifier"
                );
            }
            return None;
        }
        Some(RawRecord::new(previous, previous_id))
    }

    fn finish(&mut self) -> Option<RawRecord> {
        self.finished = true;
        if !self.started {
            if self.skipped_lines > 0 {
                debug!(lines = self.skipped_lines, "no record identifier found in input");
            }
            return None;
        }
        let text = std::mem::take(&mut self.current);
        let identifier = self.current_id.take();
        if self.options.emit_trailing {
            Some(RawRecord::new(text, identifier))
        } else {
            debug!(
                identifier = identifier.as_deref().unwrap_or(""),
                "dropping unterminated trailing record"
            );
            None
        }
    }
}

impl<R: BufRead> Iterator for RecordSegmenter<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return self.finish().map(Ok),
                Ok(_) => {},
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                },
            }
            self.line_number += 1;

            let identifier = self
                .identifier_regex
                .find(&line)
                .map(|m| m.as_str().to_string());

            match identifier {
                Some(id) => {
                    trace!(line = self.line_number, identifier = %id, "record boundary");
                    if let Some(record) = self.start_record(line, id) {
                        return Some(Ok(record));
                    }
                },
                None if self.started => self.current.push_str(&line),
                None => self.skipped_lines += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"one\"\n\
                        \"2017-08-16 19:10:27\",\"897898364787978242\",\"two\n\
                        still two\"\n\
                        \"2017-08-16 19:10:28\",\"897898364787978243\",\"three\"\n";

    #[test]
    fn test_segments_multiline_records() {
        let records: Vec<_> = RecordSegmenter::new(DUMP.as_bytes())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "\"2017-08-16 19:10:27\",\"897898364787978242\",\"two\nstill two\"\n");
        assert_eq!(records[1].identifier.as_deref(), Some("897898364787978242"));
    }

    #[test]
    fn test_trailing_record_can_be_kept() {
        let options = SegmenterOptions { emit_trailing: true };
        let records: Vec<_> = RecordSegmenter::with_options(DUMP.as_bytes(), options)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[2].text.contains("three"));
    }

    #[test]
    fn test_header_lines_are_not_buffered() {
        let dump = format!("collector started\nconnecting\n{DUMP}");
        let mut segmenter = RecordSegmenter::new(dump.as_bytes()).unwrap();

        let first = segmenter.next().unwrap().unwrap();
        assert_eq!(first.text, "\"2017-08-16 19:10:26\",\"897898364787978241\",\"one\"\n");
        assert_eq!(segmenter.skipped_lines(), 2);
    }

    #[test]
    fn test_input_without_identifiers_holds_nothing() {
        let mut segmenter = RecordSegmenter::new("no ids here\nnor here\n".as_bytes()).unwrap();

        assert!(segmenter.next().is_none());
        assert_eq!(segmenter.skipped_lines(), 2);
        assert!(segmenter.current.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(RecordSegmenter::new("".as_bytes()).unwrap().count(), 0);
    }
}
