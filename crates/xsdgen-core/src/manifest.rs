use std::collections::BTreeMap;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::association::Association;
use crate::error::Result;
use crate::field::FieldDescriptor;
use crate::model::Model;
use crate::registry::ModelRegistry;
use crate::rules::ValidationRule;
use crate::sandbox::Sandbox;
use crate::virtual_spec::VirtualSpec;

/// One entity declared in a model-set manifest.
///
/// This is the serde contract for describing a model outside the host
/// process; it implements [`Model`] so manifest-driven and code-driven
/// entities go through the same generation path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Validation rules keyed by field name.
    #[serde(default)]
    pub validations: BTreeMap<String, Vec<ValidationRule>>,
    #[serde(default)]
    pub associations: Vec<Association>,
    /// Association names with a bulk-assignment affordance.
    #[serde(default)]
    pub nested_attributes: Vec<String>,
    /// Virtual elements the model always serializes.
    #[serde(default)]
    pub virtual_elements: BTreeMap<String, VirtualSpec>,
    /// Element names the model always suppresses.
    #[serde(default)]
    pub ignored_elements: Vec<String>,
    /// Static enumeration fallbacks keyed by field name.
    #[serde(default)]
    pub enumerations: BTreeMap<String, Vec<String>>,
    /// Per-entity configuration block.
    #[serde(default)]
    pub config: Sandbox,
}

impl Model for ModelDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    fn validations(&self, field: &str) -> Vec<ValidationRule> {
        self.validations.get(field).cloned().unwrap_or_default()
    }

    fn associations(&self) -> Vec<Association> {
        self.associations.clone()
    }

    fn accepts_nested_attributes_for(&self, association: &str) -> bool {
        self.nested_attributes.iter().any(|name| name == association)
    }

    fn virtual_elements(&self) -> BTreeMap<String, VirtualSpec> {
        self.virtual_elements.clone()
    }

    fn ignored_elements(&self) -> Vec<String> {
        self.ignored_elements.clone()
    }

    fn enumeration_values(&self, field: &str) -> Option<Vec<String>> {
        self.enumerations.get(field).cloned()
    }

    fn superclass_name(&self) -> Option<&str> {
        self.superclass.as_deref()
    }
}

/// A manifest describing a set of interrelated entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModelSet {
    pub models: Vec<ModelDefinition>,
}

impl ModelSet {
    /// Attach every declared model, carrying each one's configuration block.
    pub fn into_registry(self) -> Result<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        for definition in self.models {
            let sandbox = definition.config.clone();
            registry.attach_sandboxed(Arc::new(definition), sandbox)?;
        }
        Ok(registry)
    }
}
