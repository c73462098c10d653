use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by JSON API endpoints.
///
/// Carries a human-readable message only; underlying persistence faults are
/// logged server-side and never embedded in the response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}
