//! Human-readable rendering of lookup results.

use crate::domain::{DisplayOptions, Record, MAX_INDENT};
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

/// What a lookup produced.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    One(&'a Record),
    Many(&'a [&'a Record]),
}

/// Render records as indented JSON, with `options.elide_fields` replaced by the
/// placeholder. A list is prefixed with a match count and each entry is
/// followed by a blank line.
///
/// Elision happens on a copy; the records passed in are never modified.
pub fn format_for_display(selection: Selection<'_>, options: &DisplayOptions) -> Result<String> {
    match selection {
        Selection::One(record) => {
            let mut out = render_record(record, options)?;
            out.push('\n');
            Ok(out)
        }
        Selection::Many(records) => {
            let mut out = format!("Found {} bugs:\n", records.len());
            for record in records {
                out.push_str(&render_record(record, options)?);
                out.push_str("\n\n");
            }
            Ok(out)
        }
    }
}

fn render_record(record: &Record, options: &DisplayOptions) -> Result<String> {
    let display = elided_copy(record, options);
    let indent = " ".repeat(options.indent.min(MAX_INDENT));
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    display.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Copy of the record's fields, in order, with elided values swapped out.
fn elided_copy(record: &Record, options: &DisplayOptions) -> Value {
    let fields = record
        .as_map()
        .iter()
        .map(|(key, value)| {
            let value = if options.elide_fields.contains(key) {
                Value::String(options.placeholder.clone())
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect::<Map<String, Value>>();
    Value::Object(fields)
}
