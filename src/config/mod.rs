//! Configuration module for Bilancio
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BilancioPaths;
pub use settings::Settings;
