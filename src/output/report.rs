//! Run report types
//!
//! The report is for observability only: nothing in the scraper reads it back.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counters for one portal run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalReport {
    /// Newspaper name
    pub portal: String,

    /// Listing pages fetched and parsed
    pub listings_fetched: usize,

    /// Listing pages that failed to fetch
    pub listings_failed: usize,

    /// Links returned by the adapter, duplicates included
    pub links_discovered: usize,

    /// Links skipped because the URL was already seen in this run
    pub duplicates_skipped: usize,

    /// Records produced
    pub articles_scraped: usize,

    /// Article pages that failed to fetch
    pub article_failures: usize,

    /// Wall time of the portal run, pacing included
    pub elapsed: Duration,
}

impl PortalReport {
    pub fn new(portal: &str) -> Self {
        Self {
            portal: portal.to_string(),
            ..Self::default()
        }
    }

    /// Unique article URLs the controller attempted
    pub fn articles_attempted(&self) -> usize {
        self.articles_scraped + self.article_failures
    }

    /// Percentage of attempted articles that produced a record
    pub fn success_rate(&self) -> f64 {
        let attempted = self.articles_attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.articles_scraped as f64 / attempted as f64) * 100.0
    }
}

/// Summary of one orchestration run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// SHA-256 of the configuration file, when one was loaded
    pub config_hash: Option<String>,

    /// One entry per portal, in run order
    pub portals: Vec<PortalReport>,

    /// Records that replaced a record of another portal with the same URL
    pub collisions: usize,

    /// Records in the merged collection
    pub unique_articles: usize,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            config_hash: None,
            portals: Vec::new(),
            collisions: 0,
            unique_articles: 0,
        }
    }

    /// Records produced by all portals, before cross-portal merging
    pub fn total_scraped(&self) -> usize {
        self.portals.iter().map(|p| p.articles_scraped).sum()
    }

    /// Failed fetches of all portals, listing pages included
    pub fn total_failures(&self) -> usize {
        self.portals
            .iter()
            .map(|p| p.listings_failed + p.article_failures)
            .sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.portals.iter().map(|p| p.duplicates_skipped).sum()
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}
