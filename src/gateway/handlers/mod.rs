//! HTTP handlers, grouped by resource

pub mod account;
pub mod health;
pub mod transfer;

pub use account::{create_account, get_account, get_entry, list_accounts, list_entries};
pub use health::health_check;
pub use transfer::{create_transfer, get_transfer, list_transfers};
