//! Multi-portal orchestration
//!
//! The orchestrator runs one [`CrawlController`] per portal, strictly one
//! after another, and merges their records into a single collection keyed by
//! URL.

use crate::article::ArticleCollection;
use crate::config::{Config, Pacing, PortalEntry, ScraperSettings};
use crate::crawler::controller::CrawlController;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::extract::{build_adapter, ExtractionContract};
use crate::output::{write_export, ExportError, ExportFormat, RunReport, TabularView};
use crate::url::parse_http_url;
use crate::{ConfigError, ConfigResult, Result};
use chrono::Utc;
use std::fmt;
use std::path::Path;
use url::Url;

/// One portal to scrape
///
/// Always carries a bound adapter; there is no way to build one without.
pub struct PortalSource {
    name: String,
    seeds: Vec<Url>,
    adapter: Box<dyn ExtractionContract>,
    pacing: Pacing,
}

impl PortalSource {
    pub fn new(
        name: &str,
        seeds: Vec<Url>,
        adapter: Box<dyn ExtractionContract>,
        pacing: Pacing,
    ) -> Self {
        Self {
            name: name.to_string(),
            seeds,
            adapter,
            pacing,
        }
    }

    /// Builds a portal from its configuration entry
    ///
    /// # Returns
    ///
    /// * `Ok(PortalSource)` - Seeds parsed and adapter bound
    /// * `Err(ConfigError)` - Invalid seed, unknown adapter or invalid selector
    pub fn from_entry(entry: &PortalEntry, settings: &ScraperSettings) -> ConfigResult<Self> {
        let name = entry.name.trim();

        let seeds = entry
            .seeds
            .iter()
            .map(|seed| {
                parse_http_url(seed).map_err(|e| {
                    ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e))
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let adapter = build_adapter(name, entry.adapter.as_deref(), entry.selectors.as_ref())?;

        let pacing = settings.pacing_for(entry)?;

        Ok(Self::new(name, seeds, adapter, pacing))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seeds(&self) -> &[Url] {
        &self.seeds
    }

    pub fn adapter(&self) -> &dyn ExtractionContract {
        self.adapter.as_ref()
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }
}

impl fmt::Debug for PortalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalSource")
            .field("name", &self.name)
            .field("seeds", &self.seeds)
            .field("adapter", &self.adapter.id())
            .field("pacing", &self.pacing)
            .finish()
    }
}

/// Top-level coordinator across all configured portals
pub struct Orchestrator<F> {
    sources: Vec<PortalSource>,
    fetcher: F,
    collection: ArticleCollection,
    config_hash: Option<String>,
}

impl Orchestrator<HttpFetcher> {
    /// Builds the portals and the HTTP client from a configuration
    ///
    /// The configuration is validated first, so every configuration error
    /// surfaces here, before any request is made.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let sources = config
            .portals
            .iter()
            .map(|entry| PortalSource::from_entry(entry, &config.scraper))
            .collect::<ConfigResult<Vec<_>>>()?;

        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Self::new(sources, fetcher)
    }
}

impl<F: PageFetcher> Orchestrator<F> {
    /// Creates an orchestrator over the given portals, in run order
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - At least one portal
    /// * `Err(PrensaError::Config)` - No portals
    pub fn new(sources: Vec<PortalSource>, fetcher: F) -> Result<Self> {
        if sources.is_empty() {
            return Err(ConfigError::NoPortals.into());
        }

        Ok(Self {
            sources,
            fetcher,
            collection: ArticleCollection::new(),
            config_hash: None,
        })
    }

    /// Records the configuration fingerprint in every run report
    pub fn with_config_hash(mut self, hash: String) -> Self {
        self.config_hash = Some(hash);
        self
    }

    pub fn sources(&self) -> &[PortalSource] {
        &self.sources
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Merged records of the last run
    pub fn collection(&self) -> &ArticleCollection {
        &self.collection
    }

    /// Scrapes every portal in configured order
    ///
    /// Discards the records of any previous run. Before every portal but the
    /// first, sleeps that portal's portal delay. On a URL already scraped by
    /// another portal, the later record replaces the earlier one.
    pub async fn scrape_all(&mut self) -> RunReport {
        let mut report = RunReport::new(Utc::now());
        report.config_hash = self.config_hash.clone();
        self.collection = ArticleCollection::new();

        tracing::info!(portals = self.sources.len(), "Starting scrape run");

        for (index, source) in self.sources.iter().enumerate() {
            let delay = source.pacing().portal_delay;
            if index > 0 && !delay.is_zero() {
                tracing::debug!(portal = source.name(), delay_ms = delay.as_millis() as u64, "Waiting before portal");
                tokio::time::sleep(delay).await;
            }

            let outcome = CrawlController::new(source, &self.fetcher).run().await;

            for record in outcome.records {
                if let Some(replaced) = self.collection.insert(record) {
                    report.collisions += 1;
                    tracing::warn!(
                        url = replaced.url(),
                        previous = replaced.newspaper(),
                        portal = source.name(),
                        "URL scraped by two portals, keeping the later record"
                    );
                }
            }

            report.portals.push(outcome.report);
        }

        report.unique_articles = self.collection.len();
        report.finished_at = Some(Utc::now());

        tracing::info!(
            articles = report.unique_articles,
            failures = report.total_failures(),
            collisions = report.collisions,
            "Scrape run finished"
        );

        report
    }

    /// Writes the merged collection to `destination`
    ///
    /// Returns the number of records written; an empty collection writes
    /// nothing and returns 0.
    pub fn export(
        &self,
        format: ExportFormat,
        destination: &Path,
    ) -> std::result::Result<usize, ExportError> {
        write_export(&self.collection, format, destination)
    }

    /// Row-oriented view of the merged collection
    pub fn to_tabular_view(&self) -> TabularView {
        TabularView::from_collection(&self.collection)
    }
}
