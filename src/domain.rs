//! Core domain types shared by the store, renderer and CLI.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Default name of the per-record identifier field.
pub const DEFAULT_RECORD_ID_FIELD: &str = "record_id";

/// Default name of the group identifier field.
pub const DEFAULT_GROUP_ID_FIELD: &str = "group_id";

/// Default placeholder substituted for elided fields.
pub const DEFAULT_PLACEHOLDER: &str = "...";

/// Widest indent `lookup` will render with.
pub const MAX_INDENT: usize = 16;

/// Effective settings after merging defaults, config file, environment and CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fields: FieldNames,
    pub display: DisplayOptions,
}

/// How `lookup` renders matched records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Fields replaced by `placeholder` in rendered output.
    #[serde(deserialize_with = "string_or_list")]
    pub elide_fields: BTreeSet<String>,
    pub placeholder: String,
    /// Spaces per nesting level, at most [`MAX_INDENT`].
    pub indent: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            elide_fields: BTreeSet::from(["code".to_string()]),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            indent: 2,
        }
    }
}

/// Accept either `["a", "b"]` or `"a, b"`.
fn string_or_list<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let parts = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::Many(v) => v,
    };
    Ok(parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).map(str::to_string).collect())
}

/// Names of the two identifier fields written by `update` and read by `lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub record_id: String,
    pub group_id: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            record_id: DEFAULT_RECORD_ID_FIELD.to_string(),
            group_id: DEFAULT_GROUP_ID_FIELD.to_string(),
        }
    }
}

/// One JSON object from the store.
///
/// Field order is insertion order (serde_json is built with `preserve_order`),
/// so an enriched record serializes with its identifiers first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build an enriched record: the two identifiers first, then every source
    /// field in its original order.
    ///
    /// Source fields that collide with an identifier field name are dropped so
    /// identifiers are never carried over from an earlier pass.
    pub fn enriched(
        names: &FieldNames,
        record_id: String,
        group_id: String,
        source: Map<String, Value>,
    ) -> Self {
        let mut fields = Map::with_capacity(source.len() + 2);
        fields.insert(names.record_id.clone(), Value::String(record_id));
        fields.insert(names.group_id.clone(), Value::String(group_id));
        for (key, value) in source {
            if key == names.record_id || key == names.group_id {
                tracing::debug!("Dropping stale identifier field '{}' from source record", key);
                continue;
            }
            fields.insert(key, value);
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Non-empty string value of `key`, if present.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn record_id(&self, names: &FieldNames) -> Option<&str> {
        self.str_field(&names.record_id)
    }

    pub fn group_id(&self, names: &FieldNames) -> Option<&str> {
        self.str_field(&names.group_id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}
