//! Shared gateway state

use std::sync::Arc;

use crate::db::Database;
use crate::store::Store;

/// State shared by all handlers.
pub struct AppState {
    /// Transaction coordinator over the ledger tables.
    pub store: Store,
    /// Raw connection handle, kept for health checks.
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        let store = Store::new(db.pool().clone());
        Self { store, db }
    }
}
