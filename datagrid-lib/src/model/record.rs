//! Dynamic row record

use std::collections::HashMap;

use serde::Serialize;

use super::Value;

/// A row of grid data.
///
/// Records hold field values as a `HashMap<String, Value>`, keyed by the
/// column accessor. The optional `id` is used as the row's identity; rows
/// without one are identified by position.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Record, Value};
///
/// let record = Record::with_id("2")
///     .set("name", "Jane Smith")
///     .set("age", 28i64);
///
/// assert_eq!(record.get("name"), Some(&Value::from("Jane Smith")));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// Explicit row identity, if the data carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    /// The field values.
    #[serde(flatten)]
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record without an explicit id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty record with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: HashMap::new(),
        }
    }

    /// Returns the explicit id, if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or `Value::Null` when absent.
    pub fn value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value in place, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_defaults_to_null() {
        let record = Record::new().set("name", "Bob");
        assert_eq!(record.value("name"), Value::from("Bob"));
        assert_eq!(record.value("missing"), Value::Null);
    }

    #[test]
    fn test_to_json_includes_id_and_fields() {
        let record = Record::with_id("7").set("active", true);
        let json: serde_json::Value = serde_json::from_str(&record.to_json()).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["active"], true);
    }
}
