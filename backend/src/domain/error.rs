//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde_json::Value;

use super::ports::StoreFailure;
use super::validation::FieldError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body or query is malformed or fails validation.
    InvalidRequest,
    /// A path identifier could not be coerced to the identifier's type.
    InvalidIdentifier,
    /// The requested resource does not exist.
    NotFound,
    /// The backing store raised a failure while running a unit of work.
    InternalError,
}

impl ErrorCode {
    /// Reason tag reported to clients alongside the error.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidIdentifier => "INVALID_IDENTIFIER",
            Self::NotFound => "NONEXISTENT_RESOURCE",
            Self::InternalError => "EXCEPTION",
        }
    }

    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Request is invalid.",
            Self::InvalidIdentifier => "Identifier is invalid.",
            Self::NotFound => "Requested resource does not exist.",
            Self::InternalError => "Internal server error.",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use bookshelf::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Requested book does not exist.");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.code().reason(), "NONEXISTENT_RESOURCE");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error.
    ///
    /// Blank messages are replaced with a generic message for the code so
    /// the invariant holds without panicking.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.fallback_message().to_owned(),
            details: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad")
    ///     .with_details(json!({ "field": "title" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidIdentifier`].
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidIdentifier, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<StoreFailure> for Error {
    fn from(failure: StoreFailure) -> Self {
        Self::internal(failure.to_string())
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self::invalid_request(err.to_string()).with_details(serde_json::json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}
