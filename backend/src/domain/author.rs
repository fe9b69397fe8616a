//! Author entity.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::entity::{Entity, criterion_matches, overwrite};

/// Store-assigned author identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorId(i32);

impl AuthorId {
    /// Wrap a raw identifier value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value as stored in the `author_id` column.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AuthorId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A person credited on one or more books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub author_id: AuthorId,
    pub first_name: String,
    pub last_name: String,
}

/// Values for a new author. The store assigns `author_id` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub author_id: Option<AuthorId>,
    pub first_name: String,
    pub last_name: String,
}

/// Partial author update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Equality criteria for listing authors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub author_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Entity for Author {
    type Id = AuthorId;
    type Draft = AuthorDraft;
    type Changes = AuthorChanges;
    type Filter = AuthorFilter;

    const NAME: &'static str = "author";
    const COLLECTION: &'static str = "authors";
    const IDENTIFIER: &'static str = "author_id";

    fn id(&self) -> &Self::Id {
        &self.author_id
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        criterion_matches(filter.author_id.as_ref(), &self.author_id.get())
            && criterion_matches(filter.first_name.as_deref(), self.first_name.as_str())
            && criterion_matches(filter.last_name.as_deref(), self.last_name.as_str())
    }

    fn apply(&mut self, changes: &Self::Changes) {
        overwrite(&mut self.first_name, changes.first_name.as_ref());
        overwrite(&mut self.last_name, changes.last_name.as_ref());
    }

    fn from_draft(draft: &Self::Draft, generated: i32) -> Self {
        Self {
            author_id: draft.author_id.unwrap_or(AuthorId(generated)),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
        }
    }

    fn generated_key(&self) -> Option<i32> {
        Some(self.author_id.get())
    }
}
