//! Field-grouped validation messages.
//!
//! The backend rejects form submissions with a JSON object mapping field
//! names to lists of messages. Client-side form checks reuse the same shape
//! so the CLI renders both identically.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

/// Validation messages grouped by the field they refer to.
///
/// Field order is alphabetical; message order within a field is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the list recorded for `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Every message, ordered by field name.
    pub fn messages(&self) -> Vec<&str> {
        self.0
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// Messages for the listed fields only, in the order the fields are given.
    ///
    /// # Examples
    /// ```
    /// use mycollegebook::domain::FieldErrors;
    ///
    /// let mut errors = FieldErrors::new();
    /// errors.push("username", "taken");
    /// errors.push("email", "invalid");
    /// errors.push("first_name", "ignored");
    /// assert_eq!(errors.messages_for(&["email", "username"]), vec!["invalid", "taken"]);
    /// ```
    pub fn messages_for(&self, fields: &[&str]) -> Vec<&str> {
        fields
            .iter()
            .filter_map(|field| self.0.get(*field))
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// First message found among `fields`, in the order given.
    pub fn first_of(&self, fields: &[&str]) -> Option<&str> {
        self.messages_for(fields).into_iter().next()
    }

    /// Render as a JSON object of string arrays.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(field, messages)| {
                let values = messages.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(values))
            })
            .collect();
        Value::Object(map)
    }

    /// Parse a backend rejection body.
    ///
    /// Accepts an object whose values are strings or arrays of strings.
    /// Non-string array members are skipped; any other shape yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut errors = Self::new();
        for (field, entry) in object {
            match entry {
                Value::String(message) => errors.push(field.clone(), message.clone()),
                Value::Array(items) => {
                    for message in items.iter().filter_map(Value::as_str) {
                        errors.push(field.clone(), message);
                    }
                }
                _ => return None,
            }
        }
        Some(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.0 {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}
