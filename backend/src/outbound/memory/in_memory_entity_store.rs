//! Mutex-guarded [`EntityStore`] over an ordered map.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{EntityStore, StoreFailure};
use crate::domain::{Entity, Outcome};

struct Records<E: Entity> {
    by_id: BTreeMap<E::Id, E>,
    next_generated: i32,
}

impl<E: Entity> Records<E> {
    /// Keep the generated sequence ahead of every stored key.
    fn observe(&mut self, record: &E) {
        if let Some(key) = record.generated_key() {
            self.next_generated = self.next_generated.max(key.saturating_add(1));
        }
    }
}

/// Reference from records of `E` to rows held by another store.
pub trait ForeignKey<E>: Send + Sync {
    /// Describe the violation when `record` points at a missing parent row.
    fn dangling(&self, record: &E) -> Option<String>;
}

/// [`ForeignKey`] from a column of `E` to the identifier of `P`.
pub struct References<E: Entity, P: Entity> {
    constraint: &'static str,
    column: &'static str,
    parent: Arc<InMemoryEntityStore<P>>,
    key: fn(&E) -> P::Id,
}

impl<E: Entity, P: Entity> References<E, P> {
    pub fn new(
        constraint: &'static str,
        column: &'static str,
        parent: Arc<InMemoryEntityStore<P>>,
        key: fn(&E) -> P::Id,
    ) -> Self {
        Self {
            constraint,
            column,
            parent,
            key,
        }
    }
}

impl<E: Entity, P: Entity> ForeignKey<E> for References<E, P> {
    fn dangling(&self, record: &E) -> Option<String> {
        let key = (self.key)(record);
        // A poisoned parent cannot vouch for the key.
        let present = self
            .parent
            .records
            .lock()
            .is_ok_and(|parent| parent.by_id.contains_key(&key));
        (!present).then(|| {
            format!(
                "insert or update on table \"{}\" violates foreign key constraint \"{}\": Key ({})=({}) is not present in table \"{}\"",
                E::COLLECTION,
                self.constraint,
                self.column,
                key,
                P::COLLECTION
            )
        })
    }
}

/// In-process store for one entity type.
///
/// Each operation holds the lock for its whole duration, so operations are
/// atomic with respect to each other. Records iterate in identifier order.
/// Foreign keys registered with [`Self::with_foreign_key`] are checked on
/// insert and update; parents must not reference their children, which
/// keeps lock acquisition ordered.
pub struct InMemoryEntityStore<E: Entity> {
    records: Mutex<Records<E>>,
    foreign_keys: Vec<Box<dyn ForeignKey<E>>>,
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Records {
                by_id: BTreeMap::new(),
                next_generated: 1,
            }),
            foreign_keys: Vec::new(),
        }
    }
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts and updates whose `foreign_key` points nowhere.
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: impl ForeignKey<E> + 'static) -> Self {
        self.foreign_keys.push(Box::new(foreign_key));
        self
    }

    /// Store seeded with `records`. Later records replace earlier ones that
    /// share an identifier.
    #[cfg(test)]
    pub(crate) fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let store = Self::default();
        if let Ok(mut guard) = store.records.lock() {
            for record in records {
                guard.observe(&record);
                guard.by_id.insert(record.id().clone(), record);
            }
        }
        store
    }

    fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, Records<E>>, StoreFailure> {
        self.records.lock().map_err(|_| {
            warn!(collection = E::COLLECTION, %operation, "in-memory store lock poisoned");
            StoreFailure::connection("in-memory store lock poisoned")
        })
    }

    fn violation<'a>(
        &self,
        candidate: &E,
        mut others: impl Iterator<Item = &'a E>,
    ) -> Option<StoreFailure> {
        others
            .find_map(|other| candidate.conflicts_with(other))
            .or_else(|| {
                self.foreign_keys
                    .iter()
                    .find_map(|foreign_key| foreign_key.dangling(candidate))
            })
            .map(StoreFailure::constraint)
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryEntityStore<E> {
    async fn list(&self, filter: &E::Filter) -> Outcome<Vec<E>> {
        self.lock("list")
            .map(|records| {
                records
                    .by_id
                    .values()
                    .filter(|record| record.matches(filter))
                    .cloned()
                    .collect()
            })
            .into()
    }

    async fn get_by_identifier(&self, id: &E::Id) -> Outcome<E> {
        Outcome::from_lookup(
            self.lock("get_by_identifier")
                .map(|records| records.by_id.get(id).cloned()),
        )
    }

    async fn delete_by_identifier(&self, id: &E::Id) -> Outcome<()> {
        Outcome::from_lookup(
            self.lock("delete_by_identifier")
                .map(|mut records| records.by_id.remove(id).map(|_| ())),
        )
    }

    async fn update_by_identifier(&self, id: &E::Id, changes: &E::Changes) -> Outcome<E> {
        let mut records = match self.lock("update_by_identifier") {
            Ok(records) => records,
            Err(failure) => return Outcome::Failed(failure),
        };
        let Some(current) = records.by_id.get(id) else {
            return Outcome::NotFound;
        };
        let mut updated = current.clone();
        updated.apply(changes);
        let others = records.by_id.values().filter(|other| other.id() != id);
        if let Some(failure) = self.violation(&updated, others) {
            return Outcome::Failed(failure);
        }
        records.by_id.insert(id.clone(), updated.clone());
        Outcome::Completed(updated)
    }

    async fn insert(&self, draft: &E::Draft) -> Outcome<E> {
        let mut records = match self.lock("insert") {
            Ok(records) => records,
            Err(failure) => return Outcome::Failed(failure),
        };
        let record = E::from_draft(draft, records.next_generated);
        if let Some(failure) = self.violation(&record, records.by_id.values()) {
            return Outcome::Failed(failure);
        }
        records.observe(&record);
        records.by_id.insert(record.id().clone(), record.clone());
        Outcome::Completed(record)
    }
}
