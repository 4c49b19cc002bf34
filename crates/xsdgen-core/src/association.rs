use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cardinality of an association as seen from the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

/// A declared reference from one entity to another.
///
/// Targets are named, not linked: the generation engine resolves them through
/// the model registry, which is what allows cyclic association graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Association {
    pub name: String,
    /// Entity name of the association target.
    pub target: String,
    pub cardinality: Cardinality,
    /// A polymorphic association has no statically-knowable concrete target
    /// and is never expanded as a nested structure.
    #[serde(default)]
    pub polymorphic: bool,
}
