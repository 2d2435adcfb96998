//! Ledger store: repository queries + transaction coordinator
//!
//! - [`queries`] - per-statement repository operations (no business logic)
//! - [`store`] - [`Store`], the transaction coordinator
//! - [`transfer`] - the atomic transfer algorithm and its param/result types
//! - [`error`] - [`StoreError`] taxonomy

pub mod error;
pub mod queries;
pub mod store;
pub mod transfer;

pub use error::StoreError;
pub use store::Store;
pub use transfer::{TransferTxParams, TransferTxResult};
