//! Entity-specific bindings of the generic store operations.
//!
//! [`Catalogue`] fixes the entity type and identifier for each generic
//! [`EntityStore`] operation so callers never name a type parameter. The
//! bindings add no logic of their own.

use std::sync::Arc;

use super::author::{Author, AuthorChanges, AuthorDraft, AuthorFilter, AuthorId};
use super::book::{Book, BookChanges, BookDraft, BookFilter, Isbn};
use super::book_author::{
    BookAuthor, BookAuthorChanges, BookAuthorDraft, BookAuthorFilter, BookAuthorId,
};
use super::outcome::Outcome;
use super::ports::EntityStore;

/// Stores for every catalogue entity.
#[derive(Clone)]
pub struct Catalogue {
    books: Arc<dyn EntityStore<Book>>,
    authors: Arc<dyn EntityStore<Author>>,
    book_authors: Arc<dyn EntityStore<BookAuthor>>,
}

impl Catalogue {
    /// Bind one store per table.
    pub fn new(
        books: Arc<dyn EntityStore<Book>>,
        authors: Arc<dyn EntityStore<Author>>,
        book_authors: Arc<dyn EntityStore<BookAuthor>>,
    ) -> Self {
        Self {
            books,
            authors,
            book_authors,
        }
    }

    pub async fn list_books(&self, filter: &BookFilter) -> Outcome<Vec<Book>> {
        self.books.list(filter).await
    }

    pub async fn get_book_by_isbn(&self, isbn: &Isbn) -> Outcome<Book> {
        self.books.get_by_identifier(isbn).await
    }

    pub async fn delete_book_by_isbn(&self, isbn: &Isbn) -> Outcome<()> {
        self.books.delete_by_identifier(isbn).await
    }

    pub async fn update_book(&self, isbn: &Isbn, changes: &BookChanges) -> Outcome<Book> {
        self.books.update_by_identifier(isbn, changes).await
    }

    pub async fn insert_book(&self, draft: &BookDraft) -> Outcome<Book> {
        self.books.insert(draft).await
    }

    pub async fn list_authors(&self, filter: &AuthorFilter) -> Outcome<Vec<Author>> {
        self.authors.list(filter).await
    }

    pub async fn get_author_by_author_id(&self, id: &AuthorId) -> Outcome<Author> {
        self.authors.get_by_identifier(id).await
    }

    pub async fn delete_author_by_author_id(&self, id: &AuthorId) -> Outcome<()> {
        self.authors.delete_by_identifier(id).await
    }

    pub async fn update_author(&self, id: &AuthorId, changes: &AuthorChanges) -> Outcome<Author> {
        self.authors.update_by_identifier(id, changes).await
    }

    pub async fn insert_author(&self, draft: &AuthorDraft) -> Outcome<Author> {
        self.authors.insert(draft).await
    }

    pub async fn list_book_authors(&self, filter: &BookAuthorFilter) -> Outcome<Vec<BookAuthor>> {
        self.book_authors.list(filter).await
    }

    pub async fn get_book_author_by_id(&self, id: &BookAuthorId) -> Outcome<BookAuthor> {
        self.book_authors.get_by_identifier(id).await
    }

    pub async fn delete_book_author_by_id(&self, id: &BookAuthorId) -> Outcome<()> {
        self.book_authors.delete_by_identifier(id).await
    }

    pub async fn update_book_author(
        &self,
        id: &BookAuthorId,
        changes: &BookAuthorChanges,
    ) -> Outcome<BookAuthor> {
        self.book_authors.update_by_identifier(id, changes).await
    }

    pub async fn insert_book_author(&self, draft: &BookAuthorDraft) -> Outcome<BookAuthor> {
        self.book_authors.insert(draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreFailure;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use rstest::rstest;

    mock! {
        BookStore {}
        #[async_trait]
        impl EntityStore<Book> for BookStore {
            async fn list(&self, filter: &BookFilter) -> Outcome<Vec<Book>>;
            async fn get_by_identifier(&self, id: &Isbn) -> Outcome<Book>;
            async fn delete_by_identifier(&self, id: &Isbn) -> Outcome<()>;
            async fn update_by_identifier(&self, id: &Isbn, changes: &BookChanges) -> Outcome<Book>;
            async fn insert(&self, draft: &BookDraft) -> Outcome<Book>;
        }
    }

    mock! {
        AuthorStore {}
        #[async_trait]
        impl EntityStore<Author> for AuthorStore {
            async fn list(&self, filter: &AuthorFilter) -> Outcome<Vec<Author>>;
            async fn get_by_identifier(&self, id: &AuthorId) -> Outcome<Author>;
            async fn delete_by_identifier(&self, id: &AuthorId) -> Outcome<()>;
            async fn update_by_identifier(&self, id: &AuthorId, changes: &AuthorChanges) -> Outcome<Author>;
            async fn insert(&self, draft: &AuthorDraft) -> Outcome<Author>;
        }
    }

    mock! {
        LinkStore {}
        #[async_trait]
        impl EntityStore<BookAuthor> for LinkStore {
            async fn list(&self, filter: &BookAuthorFilter) -> Outcome<Vec<BookAuthor>>;
            async fn get_by_identifier(&self, id: &BookAuthorId) -> Outcome<BookAuthor>;
            async fn delete_by_identifier(&self, id: &BookAuthorId) -> Outcome<()>;
            async fn update_by_identifier(&self, id: &BookAuthorId, changes: &BookAuthorChanges) -> Outcome<BookAuthor>;
            async fn insert(&self, draft: &BookAuthorDraft) -> Outcome<BookAuthor>;
        }
    }

    fn catalogue(books: MockBookStore, authors: MockAuthorStore, links: MockLinkStore) -> Catalogue {
        Catalogue::new(Arc::new(books), Arc::new(authors), Arc::new(links))
    }

    fn dune() -> Book {
        Book {
            isbn: Isbn::new("123").expect("valid isbn"),
            title: "Dune".to_owned(),
            year_of_publishing: 1965,
            authors_fk: AuthorId::new(1),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn book_lookups_are_delegated_by_isbn() {
        let mut books = MockBookStore::new();
        let isbn = Isbn::new("123").expect("valid isbn");
        books
            .expect_get_by_identifier()
            .with(eq(isbn.clone()))
            .times(1)
            .return_once(|_| Outcome::Completed(dune()));

        let catalogue = catalogue(books, MockAuthorStore::new(), MockLinkStore::new());
        let outcome = catalogue.get_book_by_isbn(&isbn).await;
        assert_eq!(outcome, Outcome::Completed(dune()));
    }

    #[rstest]
    #[tokio::test]
    async fn author_failures_pass_through_untouched() {
        let mut authors = MockAuthorStore::new();
        authors
            .expect_delete_by_identifier()
            .with(eq(AuthorId::new(999)))
            .times(1)
            .return_once(|_| Outcome::Failed(StoreFailure::query("boom")));

        let catalogue = catalogue(MockBookStore::new(), authors, MockLinkStore::new());
        let outcome = catalogue.delete_author_by_author_id(&AuthorId::new(999)).await;
        assert_eq!(outcome.error().map(ToString::to_string), Some("boom".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn association_updates_forward_their_changes() {
        let changes = BookAuthorChanges {
            author_id: Some(AuthorId::new(2)),
            ..BookAuthorChanges::default()
        };
        let mut links = MockLinkStore::new();
        links
            .expect_update_by_identifier()
            .with(eq(BookAuthorId::new(5)), eq(changes.clone()))
            .times(1)
            .return_once(|_, _| Outcome::NotFound);

        let catalogue = catalogue(MockBookStore::new(), MockAuthorStore::new(), links);
        let outcome = catalogue
            .update_book_author(&BookAuthorId::new(5), &changes)
            .await;
        assert_eq!(outcome, Outcome::NotFound);
    }
}
