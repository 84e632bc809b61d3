//! Registry failure taxonomy.

use thiserror::Error;
use validator::ValidationErrors;

use crate::registry::product::ProductId;

/// Typed failure of a registry operation.
///
/// Every variant is scoped to the single request that produced it; none of
/// them leave the registry in a modified state.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The id could not be parsed as an integer.
    #[error("malformed product id: {0:?}")]
    MalformedId(String),

    /// The payload failed the name rule.
    #[error("product validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No entry carries the requested id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A name filter was supplied to List. The filter path is reserved but
    /// switched off.
    #[error("name query param was disabled")]
    FilterDisabled,
}

impl RegistryError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::MalformedId(_) => "malformed_input",
            RegistryError::Validation(_) => "validation_failed",
            RegistryError::NotFound(_) => "not_found",
            RegistryError::FilterDisabled => "filter_disabled",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
