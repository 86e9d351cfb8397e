use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One conversation object from the export document.
///
/// The export has no stable schema, so the record keeps the full JSON object tree
/// as parsed. Keys are stored in sorted order, which makes the canonical form
/// independent of the key order in the source document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationRecord(Map<String, Value>);

impl ConversationRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Compact re-encoding of the record, the text surface that pattern matching,
    /// facet scanning and attachment lookup all run against.
    pub fn canonical_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}

impl From<Map<String, Value>> for ConversationRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Ordered sequence of records parsed from `conversations.json`.
///
/// Input order and duplicates are preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<ConversationRecord>,
}

impl RecordStore {
    /// Parse a top-level JSON array of objects. `null` elements become empty records.
    pub fn from_slice(raw: &[u8]) -> serde_json::Result<Self> {
        let records: Vec<Option<ConversationRecord>> = serde_json::from_slice(raw)?;
        Ok(Self { records: records.into_iter().map(Option::unwrap_or_default).collect() })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConversationRecord> {
        self.records.iter()
    }
}

impl From<Vec<ConversationRecord>> for RecordStore {
    fn from(records: Vec<ConversationRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a ConversationRecord;
    type IntoIter = std::slice::Iter<'a, ConversationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
