//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and run full
//! scrape cycles end-to-end through the public API.

mod scrape_tests;
