//! Core contracts for xsdgen.
//!
//! This crate defines the descriptor types, validation-rule model, host-model
//! contract, configuration sandbox, and model registry shared by the
//! generation engine and the CLI.

pub mod association;
pub mod error;
pub mod field;
pub mod manifest;
pub mod model;
pub mod registry;
pub mod rules;
pub mod sandbox;
pub mod validation;
pub mod virtual_spec;

pub use association::{Association, Cardinality};
pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldKind};
pub use manifest::{ModelDefinition, ModelSet};
pub use model::Model;
pub use registry::{ModelEntry, ModelRegistry};
pub use rules::{InclusionValues, RuleGuard, ValidationRule};
pub use sandbox::{IgnoreRule, Sandbox};
pub use validation::validate_model_set;
pub use virtual_spec::VirtualSpec;
