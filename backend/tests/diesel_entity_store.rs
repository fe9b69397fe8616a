//! `DieselEntityStore` against a live PostgreSQL database.
//!
//! Set `BOOKSHELF_TEST_DATABASE_URL` to a disposable database to run this
//! suite; the catalogue tables are dropped and recreated from the migration
//! SQL. Without the variable every test returns early.
//!
//! The scenarios share tables, so they run in sequence inside one test.

use bookshelf::domain::ports::{EntityStore, StoreFailure};
use bookshelf::domain::{
    Author, AuthorChanges, AuthorDraft, AuthorFilter, AuthorId, Book, BookAuthor, BookAuthorDraft,
    BookAuthorFilter, BookChanges, BookDraft, BookFilter, Isbn, Outcome,
};
use bookshelf::outbound::persistence::{DbPool, DieselEntityStore, PoolConfig};
use diesel_async::{AsyncConnection, AsyncPgConnection, SimpleAsyncConnection};

const DATABASE_URL_VAR: &str = "BOOKSHELF_TEST_DATABASE_URL";
const CREATE_CATALOGUE: &str =
    include_str!("../migrations/2025-06-01-000000_create_catalogue/up.sql");

struct Stores {
    books: DieselEntityStore<Book>,
    authors: DieselEntityStore<Author>,
    links: DieselEntityStore<BookAuthor>,
}

async fn fresh_stores(database_url: &str) -> Stores {
    let mut conn = AsyncPgConnection::establish(database_url)
        .await
        .expect("connect to test database");
    conn.batch_execute("DROP TABLE IF EXISTS books_authors, books, authors;")
        .await
        .expect("drop catalogue tables");
    conn.batch_execute(CREATE_CATALOGUE)
        .await
        .expect("create catalogue tables");

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(2)
            .with_min_idle(Some(1)),
    )
    .await
    .expect("build pool");
    Stores {
        books: DieselEntityStore::new(pool.clone()),
        authors: DieselEntityStore::new(pool.clone()),
        links: DieselEntityStore::new(pool),
    }
}

fn author_draft(first: &str, last: &str) -> AuthorDraft {
    AuthorDraft {
        author_id: None,
        first_name: first.to_owned(),
        last_name: last.to_owned(),
    }
}

fn dune(isbn: &str, author: AuthorId) -> BookDraft {
    BookDraft {
        isbn: Isbn::new(isbn).expect("valid isbn"),
        title: "Dune".to_owned(),
        year_of_publishing: 1965,
        authors_fk: author,
    }
}

async fn authors_round_trip(stores: &Stores) -> AuthorId {
    let inserted = stores
        .authors
        .insert(&author_draft("Frank", "Herbert"))
        .await
        .into_payload()
        .expect("author inserted");
    let fetched = stores.authors.get_by_identifier(&inserted.author_id).await;
    assert_eq!(fetched.payload(), Some(&inserted));

    let renamed = stores
        .authors
        .update_by_identifier(
            &inserted.author_id,
            &AuthorChanges {
                first_name: Some("Franklin".to_owned()),
                last_name: None,
            },
        )
        .await
        .into_payload()
        .expect("author updated");
    assert_eq!(renamed.first_name, "Franklin");
    assert_eq!(renamed.last_name, "Herbert");

    let unchanged = stores
        .authors
        .update_by_identifier(&inserted.author_id, &AuthorChanges::default())
        .await;
    assert_eq!(unchanged.payload(), Some(&renamed));

    let missing = AuthorId::new(inserted.author_id.get() + 1000);
    assert!(matches!(
        stores.authors.get_by_identifier(&missing).await,
        Outcome::NotFound
    ));
    assert!(matches!(
        stores
            .authors
            .update_by_identifier(&missing, &AuthorChanges::default())
            .await,
        Outcome::NotFound
    ));
    inserted.author_id
}

async fn books_enforce_constraints(stores: &Stores, author: AuthorId) {
    assert!(
        stores
            .books
            .insert(&dune("123", author))
            .await
            .completed_operation()
    );

    let duplicate = stores.books.insert(&dune("456", author)).await;
    assert!(matches!(
        duplicate.error(),
        Some(StoreFailure::Constraint { message }) if message.contains("books_un_1")
    ));

    let orphan = stores.books.insert(&dune("789", AuthorId::new(-1))).await;
    assert!(matches!(orphan.error(), Some(StoreFailure::Constraint { .. })));

    let moved = stores
        .books
        .update_by_identifier(
            &Isbn::new("123").expect("valid isbn"),
            &BookChanges {
                year_of_publishing: Some(1966),
                ..BookChanges::default()
            },
        )
        .await
        .into_payload()
        .expect("book updated");
    assert_eq!(moved.title, "Dune");
    assert_eq!(moved.year_of_publishing, 1966);
}

async fn lists_are_ordered_and_filtered(stores: &Stores) {
    for (first, last) in [("Ursula", "Le Guin"), ("Iain", "Banks"), ("Octavia", "Butler")] {
        assert!(
            stores
                .authors
                .insert(&author_draft(first, last))
                .await
                .completed_operation()
        );
    }

    let all = stores
        .authors
        .list(&AuthorFilter::default())
        .await
        .into_payload()
        .expect("authors listed");
    let ids: Vec<i32> = all.iter().map(|author| author.author_id.get()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(all.len(), 4);

    let banks = stores
        .authors
        .list(&AuthorFilter {
            last_name: Some("Banks".to_owned()),
            ..AuthorFilter::default()
        })
        .await
        .into_payload()
        .expect("filtered list");
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].first_name, "Iain");

    let none = stores
        .books
        .list(&BookFilter {
            title: Some("Neuromancer".to_owned()),
            ..BookFilter::default()
        })
        .await;
    assert_eq!(none.payload(), Some(&Vec::new()));
}

async fn links_delete_cleanly(stores: &Stores, author: AuthorId) {
    let link = stores
        .links
        .insert(&BookAuthorDraft {
            id: None,
            isbn: Isbn::new("123").expect("valid isbn"),
            author_id: author,
        })
        .await
        .into_payload()
        .expect("link inserted");

    let by_book = stores
        .links
        .list(&BookAuthorFilter {
            isbn: Some("123".to_owned()),
            ..BookAuthorFilter::default()
        })
        .await;
    assert_eq!(by_book.payload().map(Vec::len), Some(1));

    assert!(
        stores
            .links
            .delete_by_identifier(&link.id)
            .await
            .completed_operation()
    );
    assert!(matches!(
        stores.links.get_by_identifier(&link.id).await,
        Outcome::NotFound
    ));
    assert!(matches!(
        stores.links.delete_by_identifier(&link.id).await,
        Outcome::NotFound
    ));
}

async fn explicit_keys_advance_the_sequence(stores: &Stores) {
    let explicit = stores
        .authors
        .insert(&AuthorDraft {
            author_id: Some(AuthorId::new(50)),
            ..author_draft("Stanislaw", "Lem")
        })
        .await
        .into_payload()
        .expect("explicit key inserted");
    assert_eq!(explicit.author_id, AuthorId::new(50));

    let generated = stores
        .authors
        .insert(&author_draft("Gene", "Wolfe"))
        .await
        .into_payload()
        .expect("generated key inserted after an explicit one");
    assert_eq!(generated.author_id, AuthorId::new(51));
}

#[tokio::test]
async fn diesel_store_honours_the_entity_store_contract() {
    let Ok(database_url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("{DATABASE_URL_VAR} not set; skipping PostgreSQL store tests");
        return;
    };
    let stores = fresh_stores(&database_url).await;

    let author = authors_round_trip(&stores).await;
    books_enforce_constraints(&stores, author).await;
    lists_are_ordered_and_filtered(&stores).await;
    links_delete_cleanly(&stores, author).await;
    explicit_keys_advance_the_sequence(&stores).await;
}
