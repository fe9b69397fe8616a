//! Uniform result of a data access operation.
//!
//! Every operation reports one of three outcomes: it completed (possibly
//! with data), its target record does not exist, or the backing store
//! failed. Callers branch on the variant instead of catching errors.

use super::ports::StoreFailure;

/// Tri-state result returned by every [`EntityStore`](super::ports::EntityStore)
/// operation.
///
/// The accessors expose the same information as a `payload` / `error` /
/// `completed_operation` triple.
///
/// # Examples
/// ```
/// use bookshelf::domain::Outcome;
///
/// let found: Outcome<u32> = Outcome::Completed(7);
/// assert_eq!(found.payload(), Some(&7));
/// assert!(found.completed_operation());
///
/// let missing: Outcome<u32> = Outcome::NotFound;
/// assert!(!missing.completed_operation());
/// assert!(missing.error().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation ran to completion.
    Completed(T),
    /// No record matched the identifier.
    NotFound,
    /// The unit of work failed and was rolled back.
    Failed(StoreFailure),
}

impl<T> Outcome<T> {
    /// The entity or collection produced by the operation, if any.
    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Completed(payload) => Some(payload),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// Consume the outcome and return its payload, if any.
    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Completed(payload) => Some(payload),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// The captured failure, if the unit of work failed.
    pub fn error(&self) -> Option<&StoreFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Completed(_) | Self::NotFound => None,
        }
    }

    /// True unless the target was missing or the operation failed.
    pub const fn completed_operation(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Build an outcome from a lookup where `None` means "no such record".
    pub fn from_lookup(result: Result<Option<T>, StoreFailure>) -> Self {
        match result {
            Ok(Some(payload)) => Self::Completed(payload),
            Ok(None) => Self::NotFound,
            Err(failure) => Self::Failed(failure),
        }
    }
}

impl<T> From<Result<T, StoreFailure>> for Outcome<T> {
    fn from(result: Result<T, StoreFailure>) -> Self {
        match result {
            Ok(payload) => Self::Completed(payload),
            Err(failure) => Self::Failed(failure),
        }
    }
}
