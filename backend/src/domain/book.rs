//! Book entity.

use std::fmt;

use super::author::AuthorId;
use super::entity::{Entity, criterion_matches, overwrite};
use super::validation::{FieldError, check_text};

/// International Standard Book Number used as the book's primary key.
///
/// ## Invariants
/// - Between 1 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Validate and wrap an ISBN.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::Isbn;
    ///
    /// let isbn = Isbn::new("978-0441013593").expect("valid isbn");
    /// assert_eq!(isbn.as_str(), "978-0441013593");
    /// assert!(Isbn::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        check_text("isbn", &value)?;
        Ok(Self(value))
    }

    /// Wrap a value read back from the store, which enforces the same
    /// column bounds.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Borrow the ISBN text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published book and its primary (credited) author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub year_of_publishing: i32,
    pub authors_fk: AuthorId,
}

/// Values for a new book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub isbn: Isbn,
    pub title: String,
    pub year_of_publishing: i32,
    pub authors_fk: AuthorId,
}

/// Partial book update. The ISBN is the identifier and cannot change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub year_of_publishing: Option<i32>,
    pub authors_fk: Option<AuthorId>,
}

impl BookChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.year_of_publishing.is_none() && self.authors_fk.is_none()
    }
}

/// Equality criteria for listing books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub year_of_publishing: Option<i32>,
    pub authors_fk: Option<i32>,
}

impl Entity for Book {
    type Id = Isbn;
    type Draft = BookDraft;
    type Changes = BookChanges;
    type Filter = BookFilter;

    const NAME: &'static str = "book";
    const COLLECTION: &'static str = "books";
    const IDENTIFIER: &'static str = "isbn";

    fn id(&self) -> &Self::Id {
        &self.isbn
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        criterion_matches(filter.isbn.as_deref(), self.isbn.as_str())
            && criterion_matches(filter.title.as_deref(), self.title.as_str())
            && criterion_matches(filter.year_of_publishing.as_ref(), &self.year_of_publishing)
            && criterion_matches(filter.authors_fk.as_ref(), &self.authors_fk.get())
    }

    fn apply(&mut self, changes: &Self::Changes) {
        overwrite(&mut self.title, changes.title.as_ref());
        overwrite(&mut self.year_of_publishing, changes.year_of_publishing.as_ref());
        overwrite(&mut self.authors_fk, changes.authors_fk.as_ref());
    }

    fn from_draft(draft: &Self::Draft, _generated: i32) -> Self {
        Self {
            isbn: draft.isbn.clone(),
            title: draft.title.clone(),
            year_of_publishing: draft.year_of_publishing,
            authors_fk: draft.authors_fk,
        }
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.isbn == other.isbn {
            return Some(format!(
                "duplicate key value violates unique constraint \"books_pkey\": isbn {} already exists",
                self.isbn
            ));
        }
        (self.title == other.title && self.year_of_publishing == other.year_of_publishing).then(
            || {
                format!(
                    "duplicate key value violates unique constraint \"books_un_1\": ({}, {}) already exists",
                    self.title, self.year_of_publishing
                )
            },
        )
    }
}
