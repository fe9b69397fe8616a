//! Port for generic entity persistence.
//!
//! [`EntityStore`] is the data access contract every catalogue entity shares.
//! Each operation is one unit of work: the adapter opens a scoped
//! connection, runs a single logical operation, commits or rolls back, and
//! releases the connection on every exit path. Failures never escape as
//! errors; they are captured in [`Outcome::Failed`].

use async_trait::async_trait;

use crate::domain::{Entity, Outcome};

use super::define_port_error;

define_port_error! {
    /// Failures captured while running a unit of work.
    ///
    /// The `Display` output is the backing store's own description, which
    /// inbound adapters surface verbatim.
    pub enum StoreFailure {
        /// A connection could not be obtained or was lost.
        Connection { message: String } => "store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "{message}",
        /// A uniqueness or foreign-key constraint rejected the write.
        Constraint { message: String } => "{message}",
    }
}

/// Generic CRUD operations over one entity type.
///
/// Implementations never retry and never hold state between calls beyond
/// their connection factory.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Fetch every record matching all criteria in `filter`, ordered by
    /// identifier. An empty result is still a completed operation.
    async fn list(&self, filter: &E::Filter) -> Outcome<Vec<E>>;

    /// Fetch the record whose identifier equals `id`.
    async fn get_by_identifier(&self, id: &E::Id) -> Outcome<E>;

    /// Remove the record whose identifier equals `id`.
    async fn delete_by_identifier(&self, id: &E::Id) -> Outcome<()>;

    /// Overwrite the fields present in `changes` on the record identified by
    /// `id` and return the updated record.
    async fn update_by_identifier(&self, id: &E::Id, changes: &E::Changes) -> Outcome<E>;

    /// Create a record from `draft` and return it as stored.
    async fn insert(&self, draft: &E::Draft) -> Outcome<E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn query_and_constraint_failures_display_the_store_message() {
        assert_eq!(StoreFailure::query("syntax error").to_string(), "syntax error");
        assert_eq!(
            StoreFailure::constraint("violates foreign key constraint").to_string(),
            "violates foreign key constraint"
        );
    }

    #[rstest]
    fn connection_failures_are_prefixed() {
        let failure = StoreFailure::connection("timed out waiting for connection");
        assert_eq!(
            failure.to_string(),
            "store connection failed: timed out waiting for connection"
        );
    }
}
