use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::sandbox::Sandbox;

/// One attached entity: the host model plus its evaluated configuration.
#[derive(Clone)]
pub struct ModelEntry {
    pub model: Arc<dyn Model>,
    pub sandbox: Sandbox,
}

/// Explicit cache of attached entities, keyed by entity name.
///
/// Attachment performs the capability check once; generation then resolves
/// association targets through the registry without ever mutating it, so a
/// registry can be shared across concurrent generation runs.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a model with an empty sandbox.
    pub fn attach(&mut self, model: Arc<dyn Model>) -> Result<()> {
        self.attach_with(model, |_| {})
    }

    /// Attach a model, evaluating its configuration block once.
    pub fn attach_with(
        &mut self,
        model: Arc<dyn Model>,
        configure: impl FnOnce(&mut Sandbox),
    ) -> Result<()> {
        self.attach_sandboxed(model, {
            let mut sandbox = Sandbox::new();
            configure(&mut sandbox);
            sandbox
        })
    }

    /// Attach a model with an already-built sandbox (manifest path).
    pub fn attach_sandboxed(&mut self, model: Arc<dyn Model>, sandbox: Sandbox) -> Result<()> {
        if !model.supports_xml_serialization() {
            return Err(Error::MissingXmlSerializer(model.name().to_string()));
        }
        if !model.exposes_attribute_bag() {
            return Err(Error::MissingAttributes(model.name().to_string()));
        }
        self.entries
            .insert(model.name().to_string(), ModelEntry { model, sandbox });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
