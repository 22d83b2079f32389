//! Conversion configuration management
//!
//! This module handles all configuration aspects:
//! - User configuration files
//! - Resolution of CLI arguments and settings into conversion settings

pub mod settings;
pub mod user_config;

pub use settings::ConversionSettings;
pub use user_config::ConfigFile;
