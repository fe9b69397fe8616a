//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use crate::domain::Catalogue;
use crate::outbound::memory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Catalogue,
}

impl HttpState {
    /// Bundle `catalogue` for the handlers.
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    /// State backed by empty in-process stores that check foreign keys.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::in_memory();
    /// let _catalogue = state.catalogue.clone();
    /// ```
    pub fn in_memory() -> Self {
        Self::new(memory::catalogue())
    }
}
