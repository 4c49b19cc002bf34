use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The requested entity, or an association target reached during
    /// expansion, was never attached to the registry.
    #[error("model '{0}' is not attached to the registry")]
    UnregisteredModel(String),
    #[error(transparent)]
    Model(#[from] xsdgen_core::Error),
}
