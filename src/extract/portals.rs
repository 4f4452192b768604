//! Built-in selector tables for the Mendoza news portals
//!
//! | Adapter | Portal | Listing layout |
//! |---------|--------|----------------|
//! | `los-andes` | Los Andes | grouper sections, one link per `col-lg-4` column |
//! | `diario-uno` | Diario UNO | first link of each `<article>` |
//! | `el-sol` | El Sol | `h2`/`h3` title links inside articles |
//! | `mdz` | MDZ | `a.news-article__link` anchors |

use crate::extract::{ExtractionContract, LinkRule, Probe, SelectorTable, TableAdapter};
use crate::{ConfigError, ConfigResult};

const LOS_ANDES_ARTICLE: &str = "body > main > div:nth-of-type(2) > div:nth-of-type(1)";

/// Los Andes (losandes.com.ar)
pub fn los_andes() -> SelectorTable {
    let root = |rest: &str| format!("{} > {}", LOS_ANDES_ARTICLE, rest);

    SelectorTable {
        links: LinkRule {
            items: "body > main > div:nth-of-type(1) > div:nth-of-type(1) \
                    section.grouper-simple-news.news-article-wrapper div.col.col-lg-4"
                .to_string(),
            anchor: Some("a[href]".to_string()),
        },
        headline: vec![Probe::text(&root("header > h1"))],
        summary: vec![Probe::joined(&root("div:nth-of-type(1) > p"))],
        body: vec![Probe::joined(&root(
            "div:nth-of-type(3) article[class^=\"article-body\"]",
        ))],
        date: vec![Probe::text(&root("header > div > span"))],
        author: vec![Probe::text(&root(
            "div:nth-of-type(3) > div:nth-of-type(1) > div:nth-of-type(1) > div \
             > div:nth-of-type(2) > div > div > a > b",
        ))],
    }
}

/// Diario UNO (diariouno.com.ar)
pub fn diario_uno() -> SelectorTable {
    SelectorTable {
        links: LinkRule {
            items: "article".to_string(),
            anchor: Some("a[href]".to_string()),
        },
        headline: vec![Probe::text("h1[class*=\"title\"]")],
        summary: vec![
            Probe::text("h2"),
            Probe::text("p[class*=\"ignore-parser\"]"),
        ],
        body: vec![Probe::joined("div[class*=\"article-body\"] p")],
        date: vec![Probe::text("time")],
        author: vec![Probe::text("span[class*=\"author-name\"]")],
    }
}

/// El Sol (elsol.com.ar)
pub fn el_sol() -> SelectorTable {
    SelectorTable {
        links: LinkRule {
            items: "article h2 > a[href], article h3 > a[href]".to_string(),
            anchor: None,
        },
        headline: vec![Probe::text("h1")],
        summary: vec![Probe::text("div[class=\"newspack-post-subtitle\"]")],
        body: vec![Probe::joined("div[class*=\"entry-content\"] p")],
        date: vec![Probe::attr("time", "datetime"), Probe::text("time")],
        author: vec![Probe::text("a.url.fn")],
    }
}

/// MDZ (mdzol.com)
pub fn mdz() -> SelectorTable {
    SelectorTable {
        links: LinkRule {
            items: "a[class*=\"news-article__link\"]".to_string(),
            anchor: None,
        },
        headline: vec![Probe::text("h1")],
        summary: vec![Probe::joined("div[class*=\"news-detail__lead\"]")],
        body: vec![Probe::joined("div[class*=\"news-detail__body\"] p")],
        date: vec![Probe::attr("time", "datetime"), Probe::text("time")],
        author: vec![Probe::text("a[href*=\"/autor/\"]")],
    }
}

const BUILTIN: &[(&str, fn() -> SelectorTable)] = &[
    ("los-andes", los_andes),
    ("diario-uno", diario_uno),
    ("el-sol", el_sol),
    ("mdz", mdz),
];

/// Returns the ids of all built-in adapters
pub fn builtin_adapter_ids() -> Vec<&'static str> {
    BUILTIN.iter().map(|(id, _)| *id).collect()
}

/// Looks up a built-in selector table by adapter id
pub fn builtin_table(id: &str) -> Option<SelectorTable> {
    BUILTIN
        .iter()
        .find(|(builtin, _)| *builtin == id)
        .map(|(_, table)| table())
}

/// Derives an adapter id from a portal name ("Diario UNO" -> "diario-uno")
pub fn adapter_id_for(portal_name: &str) -> String {
    portal_name
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Binds an extraction adapter to a portal
///
/// Resolution order:
/// 1. An explicit selector table (custom portal)
/// 2. The named built-in adapter
/// 3. The built-in adapter whose id matches the portal name
///
/// # Returns
///
/// * `Ok(Box<dyn ExtractionContract>)` - The compiled adapter
/// * `Err(ConfigError::MissingAdapter)` - Nothing could be bound
/// * `Err(ConfigError::InvalidSelector)` - A custom table does not compile
pub fn build_adapter(
    portal_name: &str,
    adapter: Option<&str>,
    selectors: Option<&SelectorTable>,
) -> ConfigResult<Box<dyn ExtractionContract>> {
    let id = adapter
        .map(str::to_string)
        .unwrap_or_else(|| adapter_id_for(portal_name));

    if let Some(table) = selectors {
        return Ok(Box::new(TableAdapter::compile(&id, table)?));
    }

    match builtin_table(&id) {
        Some(table) => Ok(Box::new(TableAdapter::compile(&id, &table)?)),
        None => Err(ConfigError::MissingAdapter {
            portal: portal_name.to_string(),
            adapter: id,
        }),
    }
}
