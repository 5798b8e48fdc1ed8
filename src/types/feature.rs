use std::collections::HashMap;

use super::Value;

/// One data record to classify: a unique id plus a flat map of field values.
///
/// Features are read-only during evaluation; the engine never mutates them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    id: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: HashMap<String, Value>,
}

impl Feature {
    /// Create a feature with the given id and no fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Set a field value, consuming and returning the feature for chaining.
    #[must_use]
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Insert a field value (mutable reference version).
    pub fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_owned(), value);
    }

    /// Look up a field value. Absent fields return `None`; the evaluators
    /// treat that the same as an explicit null.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The feature's unique id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Iterate over field name/value pairs in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
