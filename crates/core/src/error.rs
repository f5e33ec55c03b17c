use crate::types::EntryId;

/// Domain-level error type shared across crates.
///
/// The API layer maps these onto HTTP statuses; see `atelier-api`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A requested entity does not exist (or is soft-deleted and therefore
    /// invisible).
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Human-readable entity name, e.g. `"History entry"`.
        entity: &'static str,
        /// The id that failed to resolve.
        id: EntryId,
    },

    /// A request field was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An external API call failed or returned an unusable response.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// Upstream HTTP status, or 500 when the failure had no status.
        status: u16,
        /// Best-effort message extracted from the upstream response.
        message: String,
    },

    /// An unexpected internal fault (persistence, serialization).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for an upstream failure with no usable status code.
    pub fn upstream_opaque(message: impl Into<String>) -> Self {
        CoreError::Upstream {
            status: 500,
            message: message.into(),
        }
    }
}
