//! Prensa: a polite multi-portal news scraper
//!
//! This crate extracts structured articles (headline, summary, body, date,
//! author) from news portals with heterogeneous HTML layouts, deduplicates them
//! by canonical URL, and exports the merged result as CSV or JSON.

pub mod article;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Errors raised while setting up a scrape
///
/// Per-page failures never surface here; they are logged and counted in the
/// [`RunReport`].
#[derive(Debug, Error)]
pub enum PrensaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
///
/// All of these are fatal and are raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Portal '{portal}' has no extraction adapter (unknown adapter '{adapter}' and no selector table)")]
    MissingAdapter { portal: String, adapter: String },

    #[error("No portals configured")]
    NoPortals,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Prensa operations
pub type Result<T> = std::result::Result<T, PrensaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use article::{ArticleCollection, ArticleField, ArticleFields, ArticleRecord};
pub use config::Config;
pub use crawler::{CrawlController, Orchestrator, PortalSource};
pub use extract::ExtractionContract;
pub use output::{ExportFormat, PortalReport, RunReport, TabularView};
pub use state::CrawlPhase;
