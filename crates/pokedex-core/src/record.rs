//! Resource record type.
//!
//! This module provides [`Record`], a type that guarantees the value is a
//! JSON object: a field-name to value mapping. Two fields are reserved for
//! the server, `id` and `createdAt`; everything else is opaque client data.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};
use crate::types::PokemonId;

/// Field holding the server-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Field holding the server-assigned creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A semi-structured resource record.
///
/// # Example
///
/// ```
/// use pokedex_core::{PokemonId, Record};
/// use serde_json::json;
///
/// let mut record = Record::new(json!({ "name": "Pikachu" })).unwrap();
/// record.set_id(PokemonId::new(1));
///
/// assert_eq!(record.id(), Some(PokemonId::new(1)));
/// assert_eq!(record.get("name"), Some(&json!("Pikachu")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(InvalidInputError::Record {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            }
            .into()),
        }
    }

    /// Parse a record from JSON text, as carried in a form field.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(s).map_err(|e| InvalidInputError::Record {
            reason: e.to_string(),
        })?;
        Self::new(value)
    }

    /// The embedded `id`, if it is present and a non-negative integer.
    pub fn id(&self) -> Option<PokemonId> {
        self.0.get(ID_FIELD).and_then(Value::as_u64).map(PokemonId::new)
    }

    /// The embedded `createdAt`, if it is present and a string.
    pub fn created_at(&self) -> Option<&str> {
        self.0.get(CREATED_AT_FIELD).and_then(Value::as_str)
    }

    /// Set the `id` field, replacing any client-supplied value.
    pub fn set_id(&mut self, id: PokemonId) {
        self.0.insert(ID_FIELD.to_string(), Value::from(id.get()));
    }

    /// Set the `createdAt` field, replacing any client-supplied value.
    pub fn set_created_at(&mut self, created_at: impl Into<String>) {
        self.0
            .insert(CREATED_AT_FIELD.to_string(), Value::String(created_at.into()));
    }

    /// Get a field from the record.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a reference to the inner JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the record as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::new(value).map_err(serde::de::Error::custom)
    }
}
