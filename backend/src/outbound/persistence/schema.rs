//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `migrations/*_create_catalogue/up.sql`
//! exactly. `diesel print-schema` against a migrated database regenerates
//! them.

diesel::table! {
    /// People credited on books. `author_id` is a serial primary key.
    authors (author_id) {
        author_id -> Int4,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
    }
}

diesel::table! {
    /// Books keyed by ISBN. `(title, year_of_publishing)` is unique
    /// (`books_un_1`).
    books (isbn) {
        #[max_length = 100]
        isbn -> Varchar,
        #[max_length = 100]
        title -> Varchar,
        year_of_publishing -> Int4,
        /// Primary (credited) author.
        authors_fk -> Int4,
    }
}

diesel::table! {
    /// Contributor links between books and authors.
    books_authors (id) {
        id -> Int4,
        #[max_length = 100]
        isbn -> Varchar,
        author_id -> Int4,
    }
}

diesel::joinable!(books -> authors (authors_fk));
diesel::joinable!(books_authors -> authors (author_id));
diesel::joinable!(books_authors -> books (isbn));

diesel::allow_tables_to_appear_in_same_query!(authors, books, books_authors);
