//! Implements a struct that holds the state of the REST server.

use crate::stores::CategoryStore;

/// The state of the REST server.
///
/// Handlers hold no state between requests, everything they share lives in
/// the store.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: CategoryStore,
{
    /// The store that categories are persisted in.
    pub category_store: S,
}

impl<S> AppState<S>
where
    S: CategoryStore,
{
    /// Create a new [AppState] that uses `category_store` for persistence.
    pub fn new(category_store: S) -> Self {
        Self { category_store }
    }
}
