//! Table-driven portal adapter
//!
//! A [`SelectorTable`] describes where a portal keeps its article links and
//! fields using CSS selectors. [`TableAdapter::compile`] parses every selector
//! once and implements [`ExtractionContract`] on top of the compiled table.

use crate::article::{ArticleField, ArticleFields};
use crate::extract::ExtractionContract;
use crate::url::resolve_link;
use crate::{ConfigError, ConfigResult};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use url::Url;

/// How article links are found on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkRule {
    /// Selector for link items (article cards, columns, anchors...)
    pub items: String,

    /// Selector for the anchor inside each item; only the first match is used.
    /// When absent the item itself must carry the `href`.
    #[serde(default)]
    pub anchor: Option<String>,
}

/// What a probe reads from the elements its selector matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeMode {
    /// First non-empty text of the matching elements
    #[default]
    Text,

    /// All text of all matching elements, fragments trimmed and space-joined
    JoinedText,

    /// First non-empty value of the probe's attribute
    Attr,
}

/// One selector attempt for a field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Probe {
    pub selector: String,

    #[serde(default)]
    pub mode: ProbeMode,

    /// Attribute name, required when `mode = "attr"`
    #[serde(default)]
    pub attr: Option<String>,
}

impl Probe {
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            mode: ProbeMode::Text,
            attr: None,
        }
    }

    pub fn joined(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            mode: ProbeMode::JoinedText,
            attr: None,
        }
    }

    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            mode: ProbeMode::Attr,
            attr: Some(attr.to_string()),
        }
    }
}

/// Selector table for one portal
///
/// Each field holds a fallback chain: probes are tried in order and the first
/// non-empty value wins. An empty chain always yields an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorTable {
    pub links: LinkRule,
    #[serde(default)]
    pub headline: Vec<Probe>,
    #[serde(default)]
    pub summary: Vec<Probe>,
    #[serde(default)]
    pub body: Vec<Probe>,
    #[serde(default)]
    pub date: Vec<Probe>,
    #[serde(default)]
    pub author: Vec<Probe>,
}

impl SelectorTable {
    /// Returns the fallback chain for one field
    pub fn probes(&self, field: ArticleField) -> &[Probe] {
        match field {
            ArticleField::Headline => &self.headline,
            ArticleField::Summary => &self.summary,
            ArticleField::Body => &self.body,
            ArticleField::Date => &self.date,
            ArticleField::Author => &self.author,
        }
    }
}

#[derive(Debug)]
enum Read {
    Text,
    JoinedText,
    Attr(String),
}

#[derive(Debug)]
struct CompiledProbe {
    selector: Selector,
    read: Read,
}

impl CompiledProbe {
    fn compile(probe: &Probe) -> ConfigResult<Self> {
        let read = match probe.mode {
            ProbeMode::Text => Read::Text,
            ProbeMode::JoinedText => Read::JoinedText,
            ProbeMode::Attr => match probe.attr.as_deref().map(str::trim) {
                Some(attr) if !attr.is_empty() => Read::Attr(attr.to_string()),
                _ => {
                    return Err(ConfigError::InvalidSelector {
                        selector: probe.selector.clone(),
                        message: "mode 'attr' requires an 'attr' name".to_string(),
                    })
                }
            },
        };

        Ok(Self {
            selector: parse_selector(&probe.selector)?,
            read,
        })
    }

    fn read(&self, document: &Html) -> String {
        let mut matches = document.select(&self.selector);

        match &self.read {
            Read::Text => matches.find_map(element_text).unwrap_or_default(),
            Read::JoinedText => matches
                .flat_map(|el| el.text())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Read::Attr(name) => matches
                .filter_map(|el| el.value().attr(name))
                .map(str::trim)
                .find(|v| !v.is_empty())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Text of one element: its first non-empty direct text node, or all of its
/// descendant text when the text sits in nested inline elements
fn element_text(element: ElementRef<'_>) -> Option<String> {
    let own = element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty());

    if let Some(text) = own {
        return Some(text.to_string());
    }

    let nested = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!nested.is_empty()).then_some(nested)
}

fn parse_selector(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Portal adapter driven by a compiled [`SelectorTable`]
#[derive(Debug)]
pub struct TableAdapter {
    id: String,
    items: Selector,
    anchor: Option<Selector>,
    fields: Vec<(ArticleField, Vec<CompiledProbe>)>,
}

impl TableAdapter {
    /// Compiles a selector table
    ///
    /// # Returns
    ///
    /// * `Ok(TableAdapter)` - Every selector parsed
    /// * `Err(ConfigError::InvalidSelector)` - A selector is not valid CSS, or
    ///   an attribute probe names no attribute
    pub fn compile(id: &str, table: &SelectorTable) -> ConfigResult<Self> {
        let items = parse_selector(&table.links.items)?;
        let anchor = table
            .links
            .anchor
            .as_deref()
            .map(parse_selector)
            .transpose()?;

        let fields = ArticleField::ALL
            .into_iter()
            .map(|field| {
                let probes = table
                    .probes(field)
                    .iter()
                    .map(CompiledProbe::compile)
                    .collect::<ConfigResult<Vec<_>>>()?;
                Ok::<_, ConfigError>((field, probes))
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            id: id.to_string(),
            items,
            anchor,
            fields,
        })
    }

    fn item_href<'a>(&self, item: ElementRef<'a>) -> Option<&'a str> {
        match &self.anchor {
            Some(anchor) => item
                .select(anchor)
                .find_map(|a| a.value().attr("href")),
            None => item.value().attr("href"),
        }
    }
}

impl ExtractionContract for TableAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn extract_article_links(&self, document: &Html, base_url: &Url) -> Vec<Url> {
        document
            .select(&self.items)
            .filter_map(|item| self.item_href(item))
            .filter_map(|href| resolve_link(href, base_url))
            .collect()
    }

    fn extract_article_data(&self, document: &Html, url: &Url) -> ArticleFields {
        let mut data = ArticleFields::default();

        for (field, probes) in &self.fields {
            let value = probes
                .iter()
                .map(|probe| probe.read(document))
                .find(|value| !value.is_empty());

            match value {
                Some(value) => data.set(*field, value),
                None => tracing::trace!(adapter = %self.id, %field, %url, "No match for field"),
            }
        }

        data
    }
}
