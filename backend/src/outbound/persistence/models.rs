//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use crate::domain::{
    Author, AuthorChanges, AuthorDraft, AuthorId, Book, BookAuthor, BookAuthorChanges,
    BookAuthorDraft, BookAuthorId, BookChanges, BookDraft, Isbn,
};

use super::schema::{authors, books, books_authors};

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub isbn: String,
    pub title: String,
    pub year_of_publishing: i32,
    pub authors_fk: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub isbn: &'a str,
    pub title: &'a str,
    pub year_of_publishing: i32,
    pub authors_fk: i32,
}

/// Changeset for partial book updates. `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
pub(crate) struct BookChangeset<'a> {
    pub title: Option<&'a str>,
    pub year_of_publishing: Option<i32>,
    pub authors_fk: Option<i32>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            isbn: Isbn::from_stored(row.isbn),
            title: row.title,
            year_of_publishing: row.year_of_publishing,
            authors_fk: AuthorId::new(row.authors_fk),
        }
    }
}

impl<'a> From<&'a BookDraft> for NewBookRow<'a> {
    fn from(draft: &'a BookDraft) -> Self {
        Self {
            isbn: draft.isbn.as_str(),
            title: draft.title.as_str(),
            year_of_publishing: draft.year_of_publishing,
            authors_fk: draft.authors_fk.get(),
        }
    }
}

impl<'a> From<&'a BookChanges> for BookChangeset<'a> {
    fn from(changes: &'a BookChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            year_of_publishing: changes.year_of_publishing,
            authors_fk: changes.authors_fk.map(AuthorId::get),
        }
    }
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// Row struct for reading from the authors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub author_id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Insertable author. A `None` identifier lets the serial default apply.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = authors)]
pub(crate) struct NewAuthorRow<'a> {
    pub author_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = authors)]
pub(crate) struct AuthorChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            author_id: AuthorId::new(row.author_id),
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

impl<'a> From<&'a AuthorDraft> for NewAuthorRow<'a> {
    fn from(draft: &'a AuthorDraft) -> Self {
        Self {
            author_id: draft.author_id.map(AuthorId::get),
            first_name: draft.first_name.as_str(),
            last_name: draft.last_name.as_str(),
        }
    }
}

impl<'a> From<&'a AuthorChanges> for AuthorChangeset<'a> {
    fn from(changes: &'a AuthorChanges) -> Self {
        Self {
            first_name: changes.first_name.as_deref(),
            last_name: changes.last_name.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Book/author links
// ---------------------------------------------------------------------------

/// Row struct for reading from the books_authors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books_authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookAuthorRow {
    pub id: i32,
    pub isbn: String,
    pub author_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books_authors)]
pub(crate) struct NewBookAuthorRow<'a> {
    pub id: Option<i32>,
    pub isbn: &'a str,
    pub author_id: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books_authors)]
pub(crate) struct BookAuthorChangeset<'a> {
    pub isbn: Option<&'a str>,
    pub author_id: Option<i32>,
}

impl From<BookAuthorRow> for BookAuthor {
    fn from(row: BookAuthorRow) -> Self {
        Self {
            id: BookAuthorId::new(row.id),
            isbn: Isbn::from_stored(row.isbn),
            author_id: AuthorId::new(row.author_id),
        }
    }
}

impl<'a> From<&'a BookAuthorDraft> for NewBookAuthorRow<'a> {
    fn from(draft: &'a BookAuthorDraft) -> Self {
        Self {
            id: draft.id.map(BookAuthorId::get),
            isbn: draft.isbn.as_str(),
            author_id: draft.author_id.get(),
        }
    }
}

impl<'a> From<&'a BookAuthorChanges> for BookAuthorChangeset<'a> {
    fn from(changes: &'a BookAuthorChanges) -> Self {
        Self {
            isbn: changes.isbn.as_ref().map(Isbn::as_str),
            author_id: changes.author_id.map(AuthorId::get),
        }
    }
}
