//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the
//! [`EntityStore`](crate::domain::ports::EntityStore) port backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **One generic adapter**: [`DieselEntityStore`] owns the unit-of-work
//!   policy (checkout, transaction, error capture) for every entity.
//! - **Per-table bindings**: [`DieselEntity`] impls, generated from table
//!   metadata, hold the only entity-specific query code.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//!
//! # Example
//!
//! ```ignore
//! use bookshelf::outbound::persistence::{DbPool, DieselEntityStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
//! let books = DieselEntityStore::<Book>::new(pool.clone());
//! ```

mod diesel_entity;
mod diesel_entity_store;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_entity::DieselEntity;
pub use diesel_entity_store::DieselEntityStore;
pub use pool::{DbPool, PoolConfig, PoolError};
