//! Crawler module: fetching, per-portal crawl control and orchestration
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with failure classification
//! - Fixed-delay request pacing
//! - The per-portal crawl controller (dedup, partial-failure handling)
//! - The orchestrator that sequences portals and merges their records

mod controller;
mod fetcher;
mod orchestrator;
mod pacing;

#[cfg(test)]
mod testing;

pub use controller::{CrawlController, PortalOutcome};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use orchestrator::{Orchestrator, PortalSource};
pub use pacing::Pacer;
