//! PostgreSQL-backed [`EntityStore`] shared by every catalogue entity.

use std::marker::PhantomData;

use async_trait::async_trait;
use diesel::QueryResult;
use diesel_async::scoped_futures::{ScopedBoxFuture, ScopedFutureExt as _};
use diesel_async::{AsyncConnection as _, AsyncPgConnection};
use tracing::warn;

use crate::domain::ports::{EntityStore, StoreFailure};
use crate::domain::Outcome;

use super::diesel_entity::DieselEntity;
use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// Diesel adapter for the [`EntityStore`] port.
///
/// Every operation is one unit of work: a connection is checked out, one
/// transaction runs, and the connection returns to the pool when the guard
/// drops. Failures are logged and captured in [`Outcome::Failed`].
///
/// # Examples
///
/// ```rust,ignore
/// let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
/// let books = DieselEntityStore::<Book>::new(pool);
/// let outcome = books.get_by_identifier(&Isbn::new("123")?).await;
/// ```
pub struct DieselEntityStore<E> {
    pool: DbPool,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for DieselEntityStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E> DieselEntityStore<E> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            entity: PhantomData,
        }
    }
}

impl<E: DieselEntity> DieselEntityStore<E> {
    async fn unit_of_work<'a, T, F>(&self, operation: &'static str, work: F) -> Result<T, StoreFailure>
    where
        T: Send + 'a,
        F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, QueryResult<T>>
            + Send
            + 'a,
    {
        let result = match self.pool.get().await {
            Ok(mut pooled) => {
                let conn: &mut AsyncPgConnection = &mut pooled;
                conn.transaction(work)
                    .await
                    .map_err(|err| map_diesel_error(err, operation))
            }
            Err(err) => Err(map_pool_error(err)),
        };
        if let Err(failure) = &result {
            warn!(
                collection = E::COLLECTION,
                %operation,
                error = %failure,
                "unit of work failed"
            );
        }
        result
    }
}

#[async_trait]
impl<E: DieselEntity> EntityStore<E> for DieselEntityStore<E> {
    async fn list(&self, filter: &E::Filter) -> Outcome<Vec<E>> {
        self.unit_of_work("list", |conn| {
            async move { E::load_matching(conn, filter).await }.scope_boxed()
        })
        .await
        .into()
    }

    async fn get_by_identifier(&self, id: &E::Id) -> Outcome<E> {
        Outcome::from_lookup(
            self.unit_of_work("get_by_identifier", |conn| {
                async move { E::fetch(conn, id).await }.scope_boxed()
            })
            .await,
        )
    }

    async fn delete_by_identifier(&self, id: &E::Id) -> Outcome<()> {
        let removed = self
            .unit_of_work("delete_by_identifier", |conn| {
                async move { E::remove(conn, id).await }.scope_boxed()
            })
            .await;
        Outcome::from_lookup(removed.map(|rows| (rows > 0).then_some(())))
    }

    async fn update_by_identifier(&self, id: &E::Id, changes: &E::Changes) -> Outcome<E> {
        Outcome::from_lookup(
            self.unit_of_work("update_by_identifier", |conn| {
                async move { E::modify(conn, id, changes).await }.scope_boxed()
            })
            .await,
        )
    }

    async fn insert(&self, draft: &E::Draft) -> Outcome<E> {
        self.unit_of_work("insert", |conn| {
            async move { E::create(conn, draft).await }.scope_boxed()
        })
        .await
        .into()
    }
}
