use thiserror::Error;

/// Core error type shared across xsdgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The model does not support XML serialization, so no schema can
    /// describe its serialized form. Raised at attach time only.
    #[error("model '{0}' does not support XML serialization; cannot generate an XSD from it")]
    MissingXmlSerializer(String),
    /// The model does not expose an attribute bag. Raised at attach time only.
    #[error("model '{0}' does not expose an attribute bag; cannot generate an XSD from it")]
    MissingAttributes(String),
    /// A sandbox or manifest entry is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The model set violates internal invariants.
    #[error("invalid model set: {0}")]
    InvalidModelSet(String),
}

/// Convenience alias for results returned by xsdgen crates.
pub type Result<T> = std::result::Result<T, Error>;
