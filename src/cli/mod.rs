//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger and file layers.

pub mod file;
pub mod movement;
pub mod session;

pub use file::{handle_file_command, FileCommands};
pub use movement::{handle_movement_command, parse_movement_input, MovementCommands};
pub use session::Session;
