//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the phase a portal's crawl controller is in (idle, fetching
//!   a listing page, discovering links, fetching or extracting an article, done)

mod phase;

pub use phase::CrawlPhase;
