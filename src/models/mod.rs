//! Core data models for Bilancio
//!
//! Movements, their kinds, and the date and amount rules shared by the
//! ledger and the file codecs.

pub mod amount;
pub mod date;
pub mod movement;

pub use amount::{exact_add, parse_amount, parse_user_amount, validate_amount};
pub use date::{format_date, parse_date, DATE_FORMAT};
pub use movement::{Movement, MovementKind};
