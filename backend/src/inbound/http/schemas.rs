//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for the reason tag of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorReasonSchema {
    /// The request body, query or a field fails validation.
    #[schema(rename = "INVALID_REQUEST")]
    InvalidRequest,
    /// A path identifier has the wrong type.
    #[schema(rename = "INVALID_IDENTIFIER")]
    InvalidIdentifier,
    /// The requested record does not exist.
    #[schema(rename = "NONEXISTENT_RESOURCE")]
    NonexistentResource,
    /// The backing store failed.
    #[schema(rename = "EXCEPTION")]
    Exception,
}

/// OpenAPI schema for the error envelope rendered from [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// HTTP status code repeated in the body.
    #[schema(example = 404)]
    error_code: u16,
    /// Human-readable description of the failure.
    #[schema(example = "Requested book does not exist.")]
    error_source: String,
    /// Stable machine-readable reason.
    error_reason: ErrorReasonSchema,
    /// Offending field for validation failures.
    details: Option<serde_json::Value>,
}
