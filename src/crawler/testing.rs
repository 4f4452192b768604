//! In-memory fetcher and fixtures for crawler tests

use crate::config::Pacing;
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::orchestrator::PortalSource;
use crate::extract::{LinkRule, Probe, SelectorTable, TableAdapter};
use scraper::Html;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Serves fixed pages and records every request; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| *r == url).count()
    }
}

impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<Html, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        match self.pages.get(url.as_str()) {
            Some(html) => Ok(Html::parse_document(html)),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Listing page with one `<article>` per link
pub fn listing(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .map(|href| format!("<article><a href=\"{}\">nota</a></article>", href))
        .collect();
    format!("<html><body>{}</body></html>", items)
}

/// Article page with a headline
pub fn article(headline: &str) -> String {
    format!(
        "<html><body><h1>{}</h1><div class=\"cuerpo\"><p>Texto.</p></div></body></html>",
        headline
    )
}

pub fn test_table() -> SelectorTable {
    SelectorTable {
        links: LinkRule {
            items: "article".to_string(),
            anchor: Some("a[href]".to_string()),
        },
        headline: vec![Probe::text("h1")],
        summary: vec![],
        body: vec![Probe::joined("div.cuerpo p")],
        date: vec![],
        author: vec![],
    }
}

/// Portal using [`test_table`] and no pacing
pub fn source(name: &str, seeds: &[&str]) -> PortalSource {
    let seeds = seeds.iter().map(|s| Url::parse(s).unwrap()).collect();
    let adapter = TableAdapter::compile("test", &test_table()).unwrap();
    PortalSource::new(
        name,
        seeds,
        Box::new(adapter),
        Pacing {
            request_delay: Duration::ZERO,
            portal_delay: Duration::ZERO,
            timeout: Duration::from_secs(1),
        },
    )
}
