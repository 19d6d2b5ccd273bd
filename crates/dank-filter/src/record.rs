//! Catalog record type.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Identifier of a record. The catalog uses both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    /// Numeric id.
    Number(Number),
    /// String id.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One entity decoded from a catalog collection.
///
/// Fields beyond `id` and `name` are untyped; read them through the typed
/// accessors, which return `None` when the field is missing or holds a value
/// of another type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter, mostly useful in tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// The record id, when it is a string or a number.
    pub fn id(&self) -> Option<RecordId> {
        match self.fields.get("id")? {
            Value::Number(n) => Some(RecordId::Number(n.clone())),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    /// The display name, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Raw field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value if it is a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Field value if it is a JSON number. Numeric strings do not count.
    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Check if the field is present, whatever its type.
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over field names in their stored order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
