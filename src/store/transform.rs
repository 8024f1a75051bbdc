//! Enrichment pass: raw JSONL in, identified JSONL out.

use super::lines::{for_each_line, open, parse_line, ParsedLine, SNIPPET_CHARS};
use super::RecordIndex;
use crate::domain::Record;
use crate::error::{Result, StoreError};
use crate::utils::{ensure_parent_dir, new_identifier, snippet};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Counters for one transform pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub lines_read: usize,
    pub records_written: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
}

impl RecordIndex {
    /// Enrich every JSON object in `input` with a fresh record id and group
    /// id, write the result to `output` and index it.
    ///
    /// Output goes to a temporary file beside `output` that is renamed into
    /// place once every line is written, so `input` and `output` may be the
    /// same file and a failed pass leaves no partial output behind. The index
    /// is replaced only when the pass succeeds.
    ///
    /// Lines that are not JSON objects are logged and skipped. Only failing to
    /// open, read or write a file aborts the pass.
    pub fn transform(&mut self, input: &Path, output: &Path) -> Result<TransformStats> {
        let mut stats = TransformStats::default();

        // Fail on a missing input before touching the output path.
        let source_file = open(input)?;

        let output_dir = ensure_parent_dir(output).map_err(|e| StoreError::io(output, e))?;
        let staging = NamedTempFile::new_in(output_dir).map_err(|e| StoreError::io(output, e))?;
        let mut writer = BufWriter::new(staging);

        let names = self.field_names().clone();
        let mut enriched = Vec::new();
        for_each_line(input, source_file, |line_no, bytes| {
            stats.lines_read += 1;
            let source = match parse_line(bytes) {
                ParsedLine::Blank => {
                    stats.blank_lines += 1;
                    return Ok(());
                }
                ParsedLine::Object(map) => map,
                ParsedLine::Other(value) => {
                    stats.malformed_lines += 1;
                    tracing::warn!(
                        "{}:{}: expected a JSON object, found {}; skipping",
                        input.display(),
                        line_no,
                        json_kind(&value)
                    );
                    return Ok(());
                }
                ParsedLine::Malformed(err) => {
                    stats.malformed_lines += 1;
                    tracing::warn!(
                        "{}:{}: error parsing JSON line: {} ({})",
                        input.display(),
                        line_no,
                        err,
                        snippet(&String::from_utf8_lossy(bytes), SNIPPET_CHARS)
                    );
                    return Ok(());
                }
            };

            let record = Record::enriched(&names, new_identifier(), new_identifier(), source);
            serde_json::to_writer(&mut writer, &record)
                .map_err(|source| StoreError::Serialize { path: output.to_path_buf(), source })?;
            writer.write_all(b"\n").map_err(|e| StoreError::io(output, e))?;

            enriched.push(record);
            stats.records_written += 1;
            Ok(())
        })?;

        let staging = writer.into_inner().map_err(|e| StoreError::io(output, e.into_error()))?;
        // An existing output keeps its permissions across the rename.
        if let Ok(meta) = std::fs::metadata(output) {
            staging.as_file().set_permissions(meta.permissions()).map_err(|e| StoreError::io(output, e))?;
        }
        staging.as_file().sync_all().map_err(|e| StoreError::io(output, e))?;
        staging.persist(output).map_err(|e| StoreError::io(output, e.error))?;

        self.clear();
        for record in enriched {
            self.insert(record);
        }

        tracing::info!(
            "Enriched {} of {} lines from {} into {} ({} malformed)",
            stats.records_written,
            stats.lines_read,
            input.display(),
            output.display(),
            stats.malformed_lines
        );
        Ok(stats)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
