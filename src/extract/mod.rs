//! Extraction contract and portal adapters
//!
//! Every portal plugs into the crawler through [`ExtractionContract`]:
//! - link discovery on listing pages
//! - best-effort field extraction on article pages
//!
//! The crawl controller and orchestrator only ever see the trait. Concrete
//! portals are [`TableAdapter`]s compiled from a [`SelectorTable`], so adding a
//! portal is a matter of writing a new table (in [`portals`] or in the
//! configuration file), not new control flow.

pub mod portals;
mod selectors;

pub use portals::{build_adapter, builtin_adapter_ids, builtin_table};
pub use selectors::{LinkRule, Probe, ProbeMode, SelectorTable, TableAdapter};

use crate::article::ArticleFields;
use scraper::Html;
use url::Url;

/// Capability interface every portal adapter implements
pub trait ExtractionContract {
    /// Identifier of the adapter, used in logs and dry runs
    fn id(&self) -> &str;

    /// Returns the candidate article URLs referenced by a listing page
    ///
    /// Relative links are resolved against `base_url`. The result may contain
    /// duplicates; deduplication happens in the crawl controller. No match is
    /// a normal outcome and yields an empty vector.
    fn extract_article_links(&self, document: &Html, base_url: &Url) -> Vec<Url>;

    /// Extracts headline, summary, body, date and author from an article page
    ///
    /// A field whose selectors find nothing is left as the empty string.
    fn extract_article_data(&self, document: &Html, url: &Url) -> ArticleFields;
}
