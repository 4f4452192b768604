//! Article data model
//!
//! # Components
//!
//! - `ArticleField`: the five fields every adapter extracts
//! - `ArticleFields`: extracted field values, empty when a selector misses
//! - `ArticleRecord`: one scraped article, immutable once assembled
//! - `ArticleCollection`: insertion-ordered records keyed by canonical URL

mod collection;
mod record;

pub use collection::ArticleCollection;
pub use record::{ArticleField, ArticleFields, ArticleRecord};
