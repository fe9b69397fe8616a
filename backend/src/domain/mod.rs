//! Domain primitives and aggregates.
//!
//! Purpose: Define the catalogue entities, the capability trait the generic
//! data access operations are written against, and the outcome and error
//! types shared by every adapter.
//!
//! Public surface:
//! - Entity (alias to `entity::Entity`) — capability trait for stored records.
//! - Outcome (alias to `outcome::Outcome`) — tri-state operation result.
//! - Catalogue (alias to `catalogue::Catalogue`) — entity-specific bindings.
//! - Book, Author, BookAuthor — the catalogue entities.
//! - Error (alias to `error::Error`) — transport agnostic error payload.

pub mod author;
pub mod book;
pub mod book_author;
pub mod catalogue;
pub mod entity;
pub mod error;
pub mod outcome;
pub mod ports;
pub mod validation;

pub use self::author::{Author, AuthorChanges, AuthorDraft, AuthorFilter, AuthorId};
pub use self::book::{Book, BookChanges, BookDraft, BookFilter, Isbn};
pub use self::book_author::{
    BookAuthor, BookAuthorChanges, BookAuthorDraft, BookAuthorFilter, BookAuthorId,
};
pub use self::catalogue::Catalogue;
pub use self::entity::Entity;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::outcome::Outcome;
pub use self::validation::FieldError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bookshelf::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Requested book does not exist."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
