//! Bilancio - income and expense ledger
//!
//! This library provides the core functionality for the Bilancio ledger
//! application: an in-memory ledger of dated income and expense movements
//! with exact decimal amounts, and two plain-text file formats for it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Movement records, dates and amounts
//! - `ledger`: The in-memory ledger store and its queries
//! - `codec`: CSV and tab-separated text encoding
//! - `storage`: Reading and writing ledger files
//! - `config`: Configuration and path management
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use bilancio_cli::codec::{decode_csv, encode_csv};
//! use bilancio_cli::ledger::LedgerStore;
//!
//! let mut store = LedgerStore::new();
//! store.add(Movement::income(date, "Stipendio", dec!(1500.00))?);
//! let text = encode_csv(&store.all());
//! store.replace_all(decode_csv(&text)?);
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod storage;

pub use error::{BilancioError, BilancioResult};
