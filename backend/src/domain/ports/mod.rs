//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod entity_store;

pub use entity_store::{EntityStore, StoreFailure};
