//! Line-level JSONL reading shared by transform and load.

use crate::error::{Result, StoreError};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Max chars of an offending line echoed into a warning.
pub(crate) const SNIPPET_CHARS: usize = 120;

pub(crate) enum ParsedLine {
    Blank,
    Object(Map<String, Value>),
    /// Valid JSON, but not an object.
    Other(Value),
    Malformed(serde_json::Error),
}

pub(crate) fn parse_line(bytes: &[u8]) -> ParsedLine {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ParsedLine::Blank;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => ParsedLine::Object(map),
        Ok(other) => ParsedLine::Other(other),
        Err(err) => ParsedLine::Malformed(err),
    }
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| StoreError::io(path, e))
}

/// Visit every line of `file` (opened from `path`) with its 1-based line number.
///
/// Lines are split on raw bytes so invalid UTF-8 surfaces as a malformed line
/// rather than aborting the pass.
pub(crate) fn for_each_line<F>(path: &Path, file: File, mut visit: F) -> Result<()>
where
    F: FnMut(usize, &[u8]) -> Result<()>,
{
    let reader = BufReader::new(file);
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| StoreError::io(path, e))?;
        visit(idx + 1, &line)?;
    }
    Ok(())
}
