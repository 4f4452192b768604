//! Per-portal crawl controller
//!
//! One controller drives one portal run through its seed listing pages:
//!
//! 1. Fetch the listing page (a failure skips to the next seed)
//! 2. Discover article links with the portal's adapter
//! 3. Drop every link already seen in this run
//! 4. Fetch each new article (a failure skips to the next link)
//! 5. Extract its fields and assemble an [`ArticleRecord`]
//!
//! Every fetch except the first is preceded by the portal's request delay.
//! Records come out in seed order, then in the adapter's link order.

use crate::article::ArticleRecord;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::orchestrator::PortalSource;
use crate::crawler::pacing::Pacer;
use crate::output::PortalReport;
use crate::state::CrawlPhase;
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Everything a portal run produced
#[derive(Debug)]
pub struct PortalOutcome {
    pub records: Vec<ArticleRecord>,
    pub report: PortalReport,
}

/// Drives one portal run
pub struct CrawlController<'a, F> {
    source: &'a PortalSource,
    fetcher: &'a F,
    phase: CrawlPhase,
    pacer: Pacer,
    seen: HashSet<String>,
    next_article: usize,
    records: Vec<ArticleRecord>,
    report: PortalReport,
}

impl<'a, F: PageFetcher> CrawlController<'a, F> {
    pub fn new(source: &'a PortalSource, fetcher: &'a F) -> Self {
        Self {
            source,
            fetcher,
            phase: CrawlPhase::Idle,
            pacer: Pacer::new(source.pacing().request_delay),
            seen: HashSet::new(),
            next_article: 0,
            records: Vec::new(),
            report: PortalReport::new(source.name()),
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the portal to completion
    ///
    /// Never fails: fetch failures are logged, counted and skipped, and the
    /// controller always ends in [`CrawlPhase::Done`].
    pub async fn run(&mut self) -> PortalOutcome {
        let started = Instant::now();
        let source = self.source;
        let portal = source.name();

        tracing::info!(
            portal,
            adapter = source.adapter().id(),
            seeds = source.seeds().len(),
            "Starting portal"
        );

        for seed in source.seeds() {
            self.crawl_listing(seed).await;
        }

        self.transition(CrawlPhase::Done);
        self.report.elapsed = started.elapsed();

        tracing::info!(
            portal,
            articles = self.report.articles_scraped,
            failures = self.report.article_failures + self.report.listings_failed,
            duplicates = self.report.duplicates_skipped,
            elapsed_ms = self.report.elapsed.as_millis() as u64,
            "Finished portal"
        );

        PortalOutcome {
            records: std::mem::take(&mut self.records),
            report: self.report.clone(),
        }
    }

    async fn crawl_listing(&mut self, seed: &Url) {
        let source = self.source;
        let portal = source.name();

        self.transition(CrawlPhase::FetchingListing);
        self.pacer.ready().await;

        let links = match self.fetcher.fetch(seed, source.pacing().timeout).await {
            Ok(document) => {
                self.report.listings_fetched += 1;
                self.transition(CrawlPhase::DiscoveringLinks);
                source.adapter().extract_article_links(&document, seed)
            }
            Err(e) => {
                self.report.listings_failed += 1;
                tracing::warn!(portal, url = %seed, kind = e.kind(), error = %e, "Listing page failed");
                return;
            }
        };

        self.report.links_discovered += links.len();

        let mut fresh = Vec::with_capacity(links.len());
        for link in links {
            if self.seen.insert(link.as_str().to_string()) {
                fresh.push(link);
            } else {
                self.report.duplicates_skipped += 1;
                tracing::trace!(portal, url = %link, "Duplicate link skipped");
            }
        }

        tracing::debug!(portal, url = %seed, new_links = fresh.len(), "Listing page processed");

        for link in fresh {
            self.scrape_article(link).await;
        }
    }

    async fn scrape_article(&mut self, url: Url) {
        let source = self.source;
        let portal = source.name();
        let ordinal = self.next_article;
        self.next_article += 1;

        self.transition(CrawlPhase::FetchingArticle(ordinal));
        self.pacer.ready().await;

        let document = match self.fetcher.fetch(&url, source.pacing().timeout).await {
            Ok(document) => document,
            Err(e) => {
                self.report.article_failures += 1;
                tracing::warn!(portal, url = %url, kind = e.kind(), error = %e, "Article skipped");
                return;
            }
        };

        self.transition(CrawlPhase::ExtractingFields(ordinal));
        let fields = source.adapter().extract_article_data(&document, &url);

        let missing = fields.missing();
        if !missing.is_empty() {
            tracing::debug!(portal, url = %url, ?missing, "Fields not found");
        }

        tracing::debug!(portal, url = %url, headline = %fields.headline, "Article scraped");
        self.records.push(ArticleRecord::assemble(&url, portal, fields));
        self.report.articles_scraped += 1;
    }

    fn transition(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(&next),
            "illegal phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::trace!(portal = self.source.name(), from = %self.phase, to = %next, "Phase");
        self.phase = next;
    }
}
