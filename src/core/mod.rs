//! Core application functionality
//!
//! This module contains the converter's application logic, including:
//! - CLI handling and settings resolution
//! - Error types
//! - The conversion runner

pub mod cli;
pub mod config;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config::{ConfigFile, ConversionSettings};
pub use errors::{BdfError, ConfigError};
pub use runner::{convert, run_app, ConversionReport};
