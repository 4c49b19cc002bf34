use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primitive kind of a scalar field, as reported by the host model layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Float,
    Decimal,
    String,
    Text,
    Datetime,
    Date,
    Boolean,
    Uuid,
}

/// A scalar, named, typed unit of data on an entity.
///
/// Immutable once obtained from the host model. Virtual fields added through
/// the sandbox are synthesized as [`FieldKind::String`] descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
