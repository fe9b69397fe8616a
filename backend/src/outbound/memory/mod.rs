//! In-process store adapter.
//!
//! [`InMemoryEntityStore`] keeps records in a mutex-guarded ordered map. It
//! backs the handler tests and lets the service run with `in_memory`
//! enabled when no database is available. Key and uniqueness constraints are
//! enforced through [`Entity::conflicts_with`](crate::domain::Entity::conflicts_with),
//! foreign keys through [`References`].

mod in_memory_entity_store;

use std::sync::Arc;

use crate::domain::{Author, Book, BookAuthor, Catalogue};

pub use in_memory_entity_store::{ForeignKey, InMemoryEntityStore, References};

/// Empty catalogue with the same foreign keys as the relational schema.
pub fn catalogue() -> Catalogue {
    let authors = Arc::new(InMemoryEntityStore::<Author>::new());
    let books = Arc::new(
        InMemoryEntityStore::<Book>::new().with_foreign_key(References::<Book, Author>::new(
            "books_authors_fk_fkey",
            "authors_fk",
            Arc::clone(&authors),
            |book: &Book| book.authors_fk,
        )),
    );
    let book_authors = InMemoryEntityStore::<BookAuthor>::new()
        .with_foreign_key(References::<BookAuthor, Book>::new(
            "books_authors_isbn_fkey",
            "isbn",
            Arc::clone(&books),
            |link: &BookAuthor| link.isbn.clone(),
        ))
        .with_foreign_key(References::<BookAuthor, Author>::new(
            "books_authors_author_id_fkey",
            "author_id",
            Arc::clone(&authors),
            |link: &BookAuthor| link.author_id,
        ));
    Catalogue::new(books, authors, Arc::new(book_authors))
}
