//! Table bindings that let the generic store run queries for each entity.
//!
//! [`DieselEntity`] is the per-table half of the Diesel adapter: one query
//! per store operation, run on a connection the caller already holds inside
//! a transaction. The bodies are identical up to table, key column and row
//! types, so `impl_diesel_entity!` generates them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::{Author, Book, BookAuthor, Entity};

use super::models::{
    AuthorChangeset, AuthorRow, BookAuthorChangeset, BookAuthorRow, BookChangeset, BookRow,
    NewAuthorRow, NewBookAuthorRow, NewBookRow,
};
use super::schema::{authors, books, books_authors};

/// Queries for one entity's table.
///
/// Each method runs a single statement on `conn` and leaves transaction
/// control to the caller.
#[async_trait]
pub trait DieselEntity: Entity {
    /// Rows matching every criterion in `filter`, ordered by key.
    async fn load_matching(
        conn: &mut AsyncPgConnection,
        filter: &Self::Filter,
    ) -> QueryResult<Vec<Self>>;

    async fn fetch(conn: &mut AsyncPgConnection, id: &Self::Id) -> QueryResult<Option<Self>>;

    /// Delete by key, returning the number of rows removed.
    async fn remove(conn: &mut AsyncPgConnection, id: &Self::Id) -> QueryResult<usize>;

    /// Apply `changes` and return the updated row, or `None` when the key
    /// is absent. Empty changes read the current row instead.
    async fn modify(
        conn: &mut AsyncPgConnection,
        id: &Self::Id,
        changes: &Self::Changes,
    ) -> QueryResult<Option<Self>>;

    async fn create(conn: &mut AsyncPgConnection, draft: &Self::Draft) -> QueryResult<Self>;
}

/// Move the serial sequence behind `table.column` to at least `key`.
///
/// Rows inserted with an explicit key bypass the sequence; without this the
/// next generated key could collide with them.
async fn advance_sequence(
    conn: &mut AsyncPgConnection,
    table: &str,
    column: &str,
    key: i32,
) -> QueryResult<()> {
    let sequence = format!("pg_get_serial_sequence('{table}', '{column}')::regclass");
    diesel::sql_query(format!(
        "SELECT setval({sequence}, GREATEST($1, pg_sequence_last_value({sequence})))"
    ))
    .bind::<Integer, _>(key)
    .execute(conn)
    .await?;
    Ok(())
}

/// Generate a [`DieselEntity`] impl from table metadata.
///
/// `key` names the primary key column and a closure turning the domain
/// identifier into its column value. Entities with a
/// [`generated_key`](Entity::generated_key) must key on a `SERIAL` column. Every name in `filters` must be both a
/// column of `table` and an `Option` field of the entity's filter type.
macro_rules! impl_diesel_entity {
    (
        impl DieselEntity for $entity:ty {
            table: $table:ident,
            key: $key:ident => $key_value:expr,
            row: $row:ident,
            new_row: $new_row:ident,
            changeset: $changeset:ident,
            filters: [$($field:ident),+ $(,)?] $(,)?
        }
    ) => {
        #[async_trait]
        impl DieselEntity for $entity {
            async fn load_matching(
                conn: &mut AsyncPgConnection,
                filter: &<$entity as Entity>::Filter,
            ) -> QueryResult<Vec<Self>> {
                let mut query = $table::table.select($row::as_select()).into_boxed();
                $(
                    if let Some(value) = filter.$field.clone() {
                        query = query.filter($table::$field.eq(value));
                    }
                )+
                let rows: Vec<$row> = query.order_by($table::$key).load(conn).await?;
                Ok(rows.into_iter().map(Self::from).collect())
            }

            async fn fetch(
                conn: &mut AsyncPgConnection,
                id: &<$entity as Entity>::Id,
            ) -> QueryResult<Option<Self>> {
                let key = ($key_value)(id);
                let row: Option<$row> = $table::table
                    .filter($table::$key.eq(key))
                    .select($row::as_select())
                    .first(conn)
                    .await
                    .optional()?;
                Ok(row.map(Self::from))
            }

            async fn remove(
                conn: &mut AsyncPgConnection,
                id: &<$entity as Entity>::Id,
            ) -> QueryResult<usize> {
                let key = ($key_value)(id);
                diesel::delete($table::table.filter($table::$key.eq(key)))
                    .execute(conn)
                    .await
            }

            async fn modify(
                conn: &mut AsyncPgConnection,
                id: &<$entity as Entity>::Id,
                changes: &<$entity as Entity>::Changes,
            ) -> QueryResult<Option<Self>> {
                if changes.is_empty() {
                    return Self::fetch(conn, id).await;
                }
                let key = ($key_value)(id);
                let changeset = $changeset::from(changes);
                let row: Option<$row> = diesel::update($table::table.filter($table::$key.eq(key)))
                    .set(&changeset)
                    .returning($row::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                Ok(row.map(Self::from))
            }

            async fn create(
                conn: &mut AsyncPgConnection,
                draft: &<$entity as Entity>::Draft,
            ) -> QueryResult<Self> {
                let row: $row = diesel::insert_into($table::table)
                    .values($new_row::from(draft))
                    .returning($row::as_returning())
                    .get_result(conn)
                    .await?;
                let created = Self::from(row);
                if let Some(key) = created.generated_key() {
                    advance_sequence(conn, stringify!($table), stringify!($key), key).await?;
                }
                Ok(created)
            }
        }
    };
}

impl_diesel_entity! {
    impl DieselEntity for Book {
        table: books,
        key: isbn => |id: &crate::domain::Isbn| id.as_str().to_owned(),
        row: BookRow,
        new_row: NewBookRow,
        changeset: BookChangeset,
        filters: [isbn, title, year_of_publishing, authors_fk],
    }
}

impl_diesel_entity! {
    impl DieselEntity for Author {
        table: authors,
        key: author_id => |id: &crate::domain::AuthorId| id.get(),
        row: AuthorRow,
        new_row: NewAuthorRow,
        changeset: AuthorChangeset,
        filters: [author_id, first_name, last_name],
    }
}

impl_diesel_entity! {
    impl DieselEntity for BookAuthor {
        table: books_authors,
        key: id => |id: &crate::domain::BookAuthorId| id.get(),
        row: BookAuthorRow,
        new_row: NewBookAuthorRow,
        changeset: BookAuthorChangeset,
        filters: [id, isbn, author_id],
    }
}
