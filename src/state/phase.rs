/// Crawl phase definitions for one portal run
///
/// A controller starts `Idle`, alternates between listing pages and the
/// articles they reference, and always ends `Done`, whatever failed on the way.
use std::fmt;

/// Represents the current phase of a portal's crawl controller
///
/// Article phases carry the ordinal of the article within the portal run, in
/// discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Controller created, nothing fetched yet
    Idle,

    /// Fetching a seed listing page
    FetchingListing,

    /// Running link discovery on a fetched listing page
    DiscoveringLinks,

    /// Fetching the i-th unique article page
    FetchingArticle(usize),

    /// Extracting fields from the i-th article page
    ExtractingFields(usize),

    /// All seeds and discovered links processed
    Done,
}

impl CrawlPhase {
    /// Returns true if no further processing happens in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the controller is waiting on the network
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::FetchingListing | Self::FetchingArticle(_))
    }

    /// Checks whether moving to `next` is a legal step
    ///
    /// | From | To |
    /// |------|----|
    /// | Idle | FetchingListing, Done |
    /// | FetchingListing | DiscoveringLinks, FetchingListing (seed failed), Done |
    /// | DiscoveringLinks | FetchingArticle, FetchingListing, Done |
    /// | FetchingArticle(i) | ExtractingFields(i), FetchingArticle(j > i), FetchingListing, Done |
    /// | ExtractingFields(i) | FetchingArticle(j > i), FetchingListing, Done |
    /// | Done | nothing |
    pub fn can_transition_to(&self, next: &CrawlPhase) -> bool {
        use CrawlPhase::*;

        match (self, next) {
            (Done, _) => false,
            (_, Done) => true,
            (Idle, FetchingListing) => true,
            (FetchingListing, DiscoveringLinks) => true,
            (FetchingListing, FetchingListing) => true,
            (DiscoveringLinks, FetchingArticle(_)) => true,
            (DiscoveringLinks, FetchingListing) => true,
            (FetchingArticle(i), ExtractingFields(j)) => i == j,
            (FetchingArticle(i), FetchingArticle(j)) => j > i,
            (FetchingArticle(_), FetchingListing) => true,
            (ExtractingFields(i), FetchingArticle(j)) => j > i,
            (ExtractingFields(_), FetchingListing) => true,
            _ => false,
        }
    }

    /// Short name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingListing => "fetching_listing",
            Self::DiscoveringLinks => "discovering_links",
            Self::FetchingArticle(_) => "fetching_article",
            Self::ExtractingFields(_) => "extracting_fields",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingArticle(i) | Self::ExtractingFields(i) => {
                write!(f, "{}({})", self.name(), i)
            }
            _ => f.write_str(self.name()),
        }
    }
}
