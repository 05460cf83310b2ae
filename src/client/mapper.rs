//! JSON mapper held by a [`super::ClientHandle`]

use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Serializes values printed or loaded by the tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mapper;

impl Mapper {
    /// Create a mapper
    pub fn new() -> Self {
        Self
    }

    /// Compact JSON
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Indented JSON, for terminal output
    pub fn to_pretty_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Parse JSON text
    pub fn from_json<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a JSON tree
    pub fn to_value<T: Serialize>(&self, value: &T) -> Result<Value> {
        Ok(serde_json::to_value(value)?)
    }

    /// Convert from a JSON tree
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Vertex {
        id: String,
        label: String,
    }

    #[test]
    fn test_to_json_and_back() {
        let mapper = Mapper::new();
        let vertex = Vertex {
            id: "1:marko".into(),
            label: "person".into(),
        };

        let json = mapper.to_json(&vertex).unwrap();
        assert_eq!(json, r#"{"id":"1:marko","label":"person"}"#);
        let back: Vertex = mapper.from_json(&json).unwrap();
        assert_eq!(back, vertex);
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let json = Mapper::new()
            .to_pretty_json(&serde_json::json!({"name": "hugegraph"}))
            .unwrap();
        assert!(json.contains("\n  \"name\""));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Mapper::new().from_json::<Vertex>("{").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_value_conversion() {
        let mapper = Mapper::new();
        let value = serde_json::json!({"id": "2:vadas", "label": "person"});
        let vertex: Vertex = mapper.from_value(value.clone()).unwrap();
        assert_eq!(mapper.to_value(&vertex).unwrap(), value);
    }
}
