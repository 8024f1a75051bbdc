//! In-memory record-id and group-id indices.

use crate::domain::{FieldNames, Record};
use std::collections::HashMap;

/// Owned lookup state for one session.
///
/// Records are kept in file order; both maps hold positions into `records`.
/// A repeated `record_id` points at its last occurrence, while the group list
/// keeps every occurrence in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordIndex {
    names: FieldNames,
    records: Vec<Record>,
    by_id: HashMap<String, usize>,
    by_group: HashMap<String, Vec<usize>>,
}

impl RecordIndex {
    pub fn new(names: FieldNames) -> Self {
        Self { names, ..Self::default() }
    }

    pub fn field_names(&self) -> &FieldNames {
        &self.names
    }

    /// Add a record to both indices.
    ///
    /// Returns `false` (and leaves the index untouched) when either identifier
    /// is missing or empty.
    pub fn insert(&mut self, record: Record) -> bool {
        let (Some(record_id), Some(group_id)) =
            (record.record_id(&self.names), record.group_id(&self.names))
        else {
            return false;
        };
        let record_id = record_id.to_string();
        let group_id = group_id.to_string();

        let position = self.records.len();
        self.records.push(record);
        self.by_id.insert(record_id, position);
        self.by_group.entry(group_id).or_default().push(position);
        true
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.by_id.clear();
        self.by_group.clear();
    }

    /// The record with this id, or `None` if it was never assigned.
    pub fn find_by_id(&self, record_id: &str) -> Option<&Record> {
        self.by_id.get(record_id).map(|&pos| &self.records[pos])
    }

    /// Every record in the group, in file order. Unknown groups yield an empty list.
    pub fn find_by_group(&self, group_id: &str) -> Vec<&Record> {
        self.by_group
            .get(group_id)
            .map(|positions| positions.iter().map(|&pos| &self.records[pos]).collect())
            .unwrap_or_default()
    }

    /// All indexed records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of distinct record ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.by_group.len()
    }
}
