//! Index rebuild from an enriched JSONL file.

use super::lines::{for_each_line, open, parse_line, ParsedLine, SNIPPET_CHARS};
use super::RecordIndex;
use crate::domain::{FieldNames, Record};
use crate::error::Result;
use crate::utils::snippet;
use std::path::Path;

/// Counters for one load pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines_read: usize,
    pub records_indexed: usize,
    /// Valid JSON lacking one of the identifier fields.
    pub skipped: usize,
    pub malformed_lines: usize,
}

impl RecordIndex {
    /// Build a fresh index from `path`.
    pub fn open(path: &Path, names: FieldNames) -> Result<Self> {
        let mut index = Self::new(names);
        index.load(path)?;
        Ok(index)
    }

    /// Rebuild both indices from scratch out of an enriched file.
    ///
    /// Lines that parse but lack an identifier are skipped quietly; lines that
    /// fail to parse are logged and skipped.
    pub fn load(&mut self, path: &Path) -> Result<LoadStats> {
        let file = open(path)?;
        self.clear();

        let mut stats = LoadStats::default();
        for_each_line(path, file, |line_no, bytes| {
            stats.lines_read += 1;
            match parse_line(bytes) {
                ParsedLine::Blank => {}
                ParsedLine::Object(map) => {
                    if self.insert(Record::from_map(map)) {
                        stats.records_indexed += 1;
                    } else {
                        stats.skipped += 1;
                        tracing::debug!(
                            "{}:{}: no identifier fields, skipping",
                            path.display(),
                            line_no
                        );
                    }
                }
                ParsedLine::Other(_) => {
                    stats.skipped += 1;
                    tracing::debug!("{}:{}: not a JSON object, skipping", path.display(), line_no);
                }
                ParsedLine::Malformed(err) => {
                    stats.malformed_lines += 1;
                    tracing::warn!(
                        "{}:{}: error parsing JSON line: {} ({})",
                        path.display(),
                        line_no,
                        err,
                        snippet(&String::from_utf8_lossy(bytes), SNIPPET_CHARS)
                    );
                }
            }
            Ok(())
        })?;

        tracing::debug!(
            "Loaded {} records in {} groups from {} ({} skipped, {} malformed)",
            self.len(),
            self.group_count(),
            path.display(),
            stats.skipped,
            stats.malformed_lines
        );
        Ok(stats)
    }
}
