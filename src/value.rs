//! Semantic values produced by decoding a field
//!
//! A [`Value`] mirrors the shape of the field it came from: integers and
//! names at the leaves, lists for arrays and ordered records for composite
//! fields. Records keep their entries in schema order so that the JSON form
//! is reproducible byte for byte.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
    List(Vec<Value>),
    Record(Vec<(String, Value)>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a record entry by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(entries) => entries
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Mutable lookup of a record entry, for editing decoded mappings
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self {
            Value::Record(entries) => entries
                .iter_mut()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Follow a `/`-separated path of record names and list indices
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |value, part| match value {
                Value::List(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => value.get(part),
            })
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, string, array or object")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(n), &self))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Text(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(de::Error::custom(format!("duplicate field {:?}", key)));
            }
            entries.push((key, value));
        }
        Ok(Value::Record(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_document_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": [2, "X"]}"#).unwrap();
        assert_eq!(
            value,
            Value::Record(vec![
                ("b".to_string(), Value::Int(1)),
                (
                    "a".to_string(),
                    Value::List(vec![Value::Int(2), Value::text("X")])
                ),
            ])
        );
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":[2,"X"]}"#);
    }

    #[test]
    fn test_rejects_floats_and_booleans() {
        assert!(serde_json::from_str::<Value>("1.5").is_err());
        assert!(serde_json::from_str::<Value>("true").is_err());
        assert!(serde_json::from_str::<Value>("null").is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        assert!(serde_json::from_str::<Value>(r#"{"a": 1, "a": 2}"#).is_err());
    }

    #[test]
    fn test_pointer() {
        let value: Value =
            serde_json::from_str(r#"{"DPI": {"DPI1": 1200}, "map": [{"k": "A"}]}"#).unwrap();
        assert_eq!(value.pointer("DPI/DPI1"), Some(&Value::Int(1200)));
        assert_eq!(value.pointer("map/0/k"), Some(&Value::text("A")));
        assert_eq!(value.pointer("map/3"), None);
    }
}
