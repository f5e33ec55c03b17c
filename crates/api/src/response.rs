//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "message": ... }` envelope for mutations whose only payload is an
/// acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
