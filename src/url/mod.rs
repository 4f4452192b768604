//! URL handling module for Prensa
//!
//! Every article URL goes through [`resolve_link`] before it is used as a
//! deduplication key, so two hrefs that point at the same article (relative vs
//! absolute, with or without a fragment or tracking parameters) collapse to a
//! single canonical string.

mod normalize;

pub use normalize::{canonicalize_url, parse_http_url, resolve_link};
