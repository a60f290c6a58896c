//! The flat metadata record produced by the directory walker.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// ASCII text, trimmed
    Text(String),
    /// Byte, Short or Long
    Integer(u32),
    /// A single rational, already divided
    Float(f64),
    /// Three rationals, e.g. GPS degrees/minutes/seconds
    Triplet([f64; 3]),
}

impl TagValue {
    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content for integer and rational values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Integer(v) => Some(*v as f64),
            TagValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TagValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Triplet content, if this is a triplet value.
    pub fn as_triplet(&self) -> Option<[f64; 3]> {
        match self {
            TagValue::Triplet(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) => f.write_str(s),
            TagValue::Integer(v) => write!(f, "{v}"),
            TagValue::Float(v) => write!(f, "{v}"),
            TagValue::Triplet([a, b, c]) => write!(f, "{a}, {b}, {c}"),
        }
    }
}

/// Mapping from canonical field name to decoded value.
///
/// Keys are the names from the tag catalog (`Make`, `GPSLatitude`, ...).
/// Inserting an existing key overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<String, TagValue>,
}

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.fields.get(name)
    }

    /// Text value of a field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TagValue::as_text)
    }

    /// Numeric value of a field.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(TagValue::as_f64)
    }

    /// Integer value of a field.
    pub fn integer(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(TagValue::as_u32)
    }

    /// Triplet value of a field.
    pub fn triplet(&self, name: &str) -> Option<[f64; 3]> {
        self.get(name).and_then(TagValue::as_triplet)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into this record. Fields of `other` win on collision.
    pub fn merge(&mut self, other: MetadataRecord) {
        self.fields.extend(other.fields);
    }
}
