//! Schema generation engine for xsdgen.
//!
//! Walks a model's field set, validation rules, and association graph and
//! emits a nested, deduplicated, cycle-safe XSD whose structural constraints
//! are derived from the model's validation rules.

pub mod errors;
pub mod field;
pub mod names;
pub mod namespaces;
pub mod restrictions;
pub mod types;
pub mod uniqueness;
pub mod wsdl;
pub mod xml;
pub mod xsd;

pub use errors::GenerationError;
pub use names::Names;
pub use restrictions::{Restriction, RestrictionDeriver, RestrictionPipeline};
pub use wsdl::Wsdl;
pub use xml::XmlWriter;
pub use xsd::{GenerateOptions, XsdGenerator};
