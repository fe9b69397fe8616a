//! Capability trait shared by every catalogue entity.
//!
//! The generic data access operations are written once against [`Entity`]
//! instead of once per table. Each entity names its identifier field, the
//! shapes used to insert, partially update and filter it, and how those
//! shapes apply to an in-memory value.

use std::fmt;

/// A record type backed by one table of the relational store.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Value of the identifier field.
    type Id: Clone + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static;
    /// Values required to create a new record.
    type Draft: fmt::Debug + Send + Sync + 'static;
    /// Partial update: only fields that are `Some` are overwritten.
    type Changes: fmt::Debug + Send + Sync + 'static;
    /// Field-equality criteria combined with logical AND.
    type Filter: fmt::Debug + Default + Send + Sync + 'static;

    /// Singular name used in client-facing messages, e.g. `book`.
    const NAME: &'static str;
    /// Collection path segment under `/api/`, e.g. `books`.
    const COLLECTION: &'static str;
    /// Name of the identifier field, e.g. `isbn`.
    const IDENTIFIER: &'static str;

    /// Identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Whether this record satisfies every criterion in `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Overwrite exactly the fields present in `changes`.
    fn apply(&mut self, changes: &Self::Changes);

    /// Materialise a draft, using `generated` when the store must assign the
    /// identifier.
    fn from_draft(draft: &Self::Draft, generated: i32) -> Self;

    /// Identifier value drawn from the store's generated sequence.
    ///
    /// Stores advance their sequence past this value so a record created
    /// with an explicit identifier never collides with a later generated one.
    /// `None` for entities whose identifier is always client-supplied.
    fn generated_key(&self) -> Option<i32> {
        None
    }

    /// Describe the constraint `self` would violate if stored next to
    /// `other`, if any.
    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.id() == other.id()).then(|| {
            format!(
                "duplicate key value violates unique constraint \"{}_pkey\": {} {} already exists",
                Self::COLLECTION,
                Self::IDENTIFIER,
                self.id()
            )
        })
    }
}

/// Compare an optional criterion against a field value.
///
/// Absent criteria match everything.
pub(crate) fn criterion_matches<T: PartialEq + ?Sized>(criterion: Option<&T>, value: &T) -> bool {
    criterion.is_none_or(|expected| expected == value)
}

/// Overwrite `target` when `update` carries a value.
pub(crate) fn overwrite<T: Clone>(target: &mut T, update: Option<&T>) {
    if let Some(value) = update {
        target.clone_from(value);
    }
}
