//! Field constraints shared by the catalogue entities.
//!
//! The relational schema stores every text attribute as `VARCHAR(100)` and
//! rejects empty values, so inbound adapters check the same bounds before a
//! request reaches the data access layer.

/// Upper bound, in characters, for every text attribute.
pub const MAX_TEXT_LENGTH: usize = 100;

/// A single field that failed its length or presence constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field was present but empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// The field exceeds [`MAX_TEXT_LENGTH`] characters.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// The field is required for this operation but was not supplied.
    #[error("{field} is required")]
    Missing { field: &'static str },
}

impl FieldError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Missing { field } => field,
        }
    }

    /// Stable machine-readable code for the violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty_field",
            Self::TooLong { .. } => "field_too_long",
            Self::Missing { .. } => "missing_field",
        }
    }
}

/// Check that `value` holds between 1 and [`MAX_TEXT_LENGTH`] characters.
///
/// # Examples
/// ```
/// use bookshelf::domain::validation::{FieldError, check_text};
///
/// assert!(check_text("title", "Dune").is_ok());
/// assert_eq!(
///     check_text("title", ""),
///     Err(FieldError::Empty { field: "title" })
/// );
/// ```
pub fn check_text(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(FieldError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}

/// Check an optional text value, accepting `None`.
pub fn check_optional_text(field: &'static str, value: Option<&str>) -> Result<(), FieldError> {
    value.map_or(Ok(()), |text| check_text(field, text))
}

/// Unwrap a value required for an insert, naming the field when absent.
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or(FieldError::Missing { field })
}
