//! Corebank - atomic ledger transfers over PostgreSQL
//!
//! A small banking ledger with one hard guarantee: a money transfer creates
//! its transfer record, both offsetting entries, and both balance mutations
//! as a single all-or-nothing database transaction, and stays deadlock-free
//! under concurrent opposite-direction transfers.
//!
//! # Modules
//!
//! - [`models`] - Account, Entry, Transfer row types
//! - [`store`] - repository queries + the transaction coordinator
//! - [`db`] - connection pool and schema bootstrap
//! - [`gateway`] - thin axum HTTP surface
//! - [`config`] / [`logging`] - service wiring
//! - [`util`] - random test-data helpers

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod store;
pub mod util;

// Convenient re-exports at crate root
pub use db::Database;
pub use models::{Account, Currency, Entry, Transfer};
pub use store::{Store, StoreError, TransferTxParams, TransferTxResult};
