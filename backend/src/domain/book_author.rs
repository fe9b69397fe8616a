//! Association between a book and one of its contributing authors.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::author::AuthorId;
use super::book::Isbn;
use super::entity::{Entity, criterion_matches, overwrite};

/// Store-assigned association identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookAuthorId(i32);

impl BookAuthorId {
    /// Wrap a raw identifier value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookAuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookAuthorId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Links a book to a contributing author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAuthor {
    pub id: BookAuthorId,
    pub isbn: Isbn,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAuthorDraft {
    pub id: Option<BookAuthorId>,
    pub isbn: Isbn,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookAuthorChanges {
    pub isbn: Option<Isbn>,
    pub author_id: Option<AuthorId>,
}

impl BookAuthorChanges {
    pub fn is_empty(&self) -> bool {
        self.isbn.is_none() && self.author_id.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookAuthorFilter {
    pub id: Option<i32>,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
}

impl Entity for BookAuthor {
    type Id = BookAuthorId;
    type Draft = BookAuthorDraft;
    type Changes = BookAuthorChanges;
    type Filter = BookAuthorFilter;

    const NAME: &'static str = "books_authors";
    const COLLECTION: &'static str = "books_authors";
    const IDENTIFIER: &'static str = "id";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        criterion_matches(filter.id.as_ref(), &self.id.get())
            && criterion_matches(filter.isbn.as_deref(), self.isbn.as_str())
            && criterion_matches(filter.author_id.as_ref(), &self.author_id.get())
    }

    fn apply(&mut self, changes: &Self::Changes) {
        overwrite(&mut self.isbn, changes.isbn.as_ref());
        overwrite(&mut self.author_id, changes.author_id.as_ref());
    }

    fn from_draft(draft: &Self::Draft, generated: i32) -> Self {
        Self {
            id: draft.id.unwrap_or(BookAuthorId(generated)),
            isbn: draft.isbn.clone(),
            author_id: draft.author_id,
        }
    }

    fn generated_key(&self) -> Option<i32> {
        Some(self.id.get())
    }
}
