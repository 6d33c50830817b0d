//! Typed decoding of a configuration sub-tree.
//!
//! Responsibilities:
//! - Deserialize a `toml::Value` into any `DeserializeOwned` type.
//! - Match struct field names against table keys ignoring ASCII case, so
//!   `rename` and `rename_all` names bind from lower-cased source keys.
//!
//! Does NOT handle:
//! - Key normalization in the store (see `store.rs`).
//!
//! Invariants:
//! - An exact field-name match wins over a case-insensitive one.
//! - Keys that match no field are passed through unchanged.
//! - Enum variant names are matched case-sensitively.

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, SeqAccess,
    Visitor,
};
use serde::forward_to_deserialize_any;
use toml::{Table, Value};

type Error = toml::de::Error;

/// Deserialize `value` into `T`, matching struct fields case-insensitively.
pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    T::deserialize(CaseInsensitive(value))
}

struct CaseInsensitive(Value);

impl<'de> Deserializer<'de> for CaseInsensitive {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.0 {
            Value::Table(table) => visitor.visit_map(TableAccess::new(table, &[])),
            Value::Array(items) => visitor.visit_seq(ArrayAccess(items.into_iter())),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.0 {
            Value::Table(table) => visitor.visit_map(TableAccess::new(table, fields)),
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.0.deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
        ignored_any
    }
}

struct TableAccess {
    entries: <Table as IntoIterator>::IntoIter,
    fields: &'static [&'static str],
    value: Option<Value>,
}

impl TableAccess {
    fn new(table: Table, fields: &'static [&'static str]) -> Self {
        Self {
            entries: table.into_iter(),
            fields,
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for TableAccess {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        self.value = Some(value);

        let key = match_field(self.fields, key);
        let key: de::value::StringDeserializer<Error> = key.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        match self.value.take() {
            Some(value) => seed.deserialize(CaseInsensitive(value)),
            None => Err(de::Error::custom("table value requested before its key")),
        }
    }
}

struct ArrayAccess(std::vec::IntoIter<Value>);

impl<'de> SeqAccess<'de> for ArrayAccess {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        self.0
            .next()
            .map(|value| seed.deserialize(CaseInsensitive(value)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

fn match_field(fields: &[&str], key: String) -> String {
    if fields.contains(&key.as_str()) {
        return key;
    }
    match fields.iter().find(|field| field.eq_ignore_ascii_case(&key)) {
        Some(field) => (*field).to_string(),
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Pool {
        max_conns: u32,
        #[serde(rename = "IdleTimeoutSecs")]
        idle: u64,
        #[serde(default)]
        labels: Vec<Label>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Label {
        #[serde(rename = "Name")]
        name: String,
    }

    fn table(text: &str) -> Value {
        Value::Table(toml::from_str(text).unwrap())
    }

    #[test]
    fn test_renamed_fields_match_lowercase_keys() {
        let pool: Pool = from_value(table(
            "maxconns = 5\nidletimeoutsecs = 30\n[[labels]]\nname = \"primary\"\n",
        ))
        .unwrap();

        assert_eq!(
            pool,
            Pool {
                max_conns: 5,
                idle: 30,
                labels: vec![Label {
                    name: "primary".to_string()
                }],
            }
        );
    }

    #[test]
    fn test_exact_field_name_wins() {
        #[derive(Debug, Deserialize)]
        struct Both {
            #[serde(default)]
            port: u16,
            #[serde(rename = "Port", default)]
            upper: u16,
        }

        let both: Both = from_value(table("port = 1\nPort = 2\n")).unwrap();
        assert_eq!(both.port, 1);
        assert_eq!(both.upper, 2);
    }

    #[test]
    fn test_options_and_unknown_keys() {
        #[derive(Debug, Deserialize)]
        struct Limits {
            max: Option<u32>,
            min: Option<u32>,
        }

        let limits: Limits = from_value(table("max = 3\nunused = true\n")).unwrap();
        assert_eq!(limits.max, Some(3));
        assert_eq!(limits.min, None);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Limits {
            max: u32,
        }

        assert!(from_value::<Limits>(table("max = \"many\"\n")).is_err());
    }
}
