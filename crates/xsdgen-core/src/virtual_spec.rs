use std::collections::BTreeMap;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::de::Error as DeError;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Shape of a virtual (added) element.
///
/// `Scalar` is rendered as a plain string field; `List` as a repeating group
/// of named members; `Map` as a nested object, recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualSpec {
    Scalar,
    List(Vec<String>),
    Map(BTreeMap<String, VirtualSpec>),
}

impl VirtualSpec {
    /// Interpret a JSON value as a virtual-element spec.
    ///
    /// `null` maps to scalar, an array of strings to a repeating group, an
    /// object to a nested mapping. Any other shape is a configuration error.
    pub fn from_value(name: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Scalar),
            Value::Array(items) => {
                let mut members = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(member) => members.push(member.clone()),
                        other => {
                            return Err(Error::InvalidConfiguration(format!(
                                "virtual element '{name}' has a non-string list member: {other}"
                            )))
                        }
                    }
                }
                Ok(Self::List(members))
            }
            Value::Object(entries) => {
                let mut nested = BTreeMap::new();
                for (key, nested_value) in entries {
                    nested.insert(key.clone(), Self::from_value(key, nested_value)?);
                }
                Ok(Self::Map(nested))
            }
            other => Err(Error::InvalidConfiguration(format!(
                "virtual element '{name}' must be null, a list, or a mapping, got: {other}"
            ))),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar)
    }
}

impl Serialize for VirtualSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar => serializer.serialize_unit(),
            Self::List(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
            Self::Map(nested) => {
                let mut map = serializer.serialize_map(Some(nested.len()))?;
                for (key, value) in nested {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for VirtualSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value("<virtual element>", &value).map_err(D::Error::custom)
    }
}

impl JsonSchema for VirtualSpec {
    fn schema_name() -> String {
        "VirtualSpec".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        // Null, array-of-strings, or nested object; enforced at parse time.
        gen.subschema_for::<Value>()
    }
}
