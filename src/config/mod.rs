//! Configuration module for Prensa
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and provides the built-in configuration for the Mendoza portals.
//!
//! # Example
//!
//! ```no_run
//! use prensa::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("prensa.toml")).unwrap();
//! println!("Request delay: {}s", config.scraper.request_delay);
//! ```

mod defaults;
mod parser;
mod types;
mod validation;

pub use defaults::{builtin_config, BROWSER_USER_AGENT};
pub use types::{
    Config, OutputConfig, Pacing, PortalEntry, ScraperSettings, UserAgentConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
