//! The ledger: ordered movements with balance and filter queries

pub mod filter;
pub mod store;

pub use filter::MovementFilter;
pub use store::{LedgerStore, LedgerTotals};
