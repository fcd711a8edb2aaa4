//! Display formatting for terminal output

pub mod movement;

pub use movement::{
    format_amount, format_balance, format_movement_register, format_movement_row, format_totals,
};
