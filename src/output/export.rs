//! CSV and JSON export of the merged article collection
//!
//! Both formats are built in memory first ([`to_csv_string`],
//! [`to_json_value`]); [`write_export`] only writes the result to disk.

use crate::article::{ArticleCollection, ArticleRecord};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// CSV column order, also used by the tabular view
pub const COLUMNS: [&str; 8] = [
    "url",
    "newspaper",
    "headline",
    "summary",
    "body",
    "date",
    "author",
    "scraped_at",
];

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed export: {0}")]
    Malformed(String),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::Malformed(format!(
                "unknown export format '{}'",
                other
            ))),
        }
    }
}

/// Renders the collection as CSV, header first
pub fn to_csv_string(collection: &ArticleCollection) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for record in collection {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Malformed(e.to_string()))
}

/// Renders the collection as a JSON object keyed by URL
///
/// Each value holds the seven remaining columns. Keys keep collection order.
pub fn to_json_value(collection: &ArticleCollection) -> Result<Value, ExportError> {
    let mut articles = Map::new();

    for record in collection {
        let Value::Object(mut fields) = serde_json::to_value(record)? else {
            return Err(ExportError::Malformed(format!(
                "record {} did not serialize to an object",
                record.url()
            )));
        };

        let entry: Map<String, Value> = COLUMNS
            .iter()
            .filter(|column| **column != "url")
            .filter_map(|column| fields.remove(*column).map(|v| (column.to_string(), v)))
            .collect();
        articles.insert(record.url().to_string(), Value::Object(entry));
    }

    Ok(Value::Object(articles))
}

/// Reads records back from a JSON export
pub fn parse_json(content: &str) -> Result<Vec<ArticleRecord>, ExportError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(articles) = value else {
        return Err(ExportError::Malformed(
            "expected an object keyed by url".to_string(),
        ));
    };

    articles
        .into_iter()
        .map(|(url, fields)| {
            let Value::Object(mut fields) = fields else {
                return Err(ExportError::Malformed(format!(
                    "entry for {} is not an object",
                    url
                )));
            };
            fields.insert("url".to_string(), Value::String(url));
            Ok(serde_json::from_value(Value::Object(fields))?)
        })
        .collect()
}

fn to_json_string(collection: &ArticleCollection) -> Result<String, ExportError> {
    let value = to_json_value(collection)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Writes the collection to `destination` in the given format
///
/// Parent directories are created as needed. An empty collection writes
/// nothing.
///
/// # Returns
///
/// * `Ok(usize)` - Number of records written
/// * `Err(ExportError)` - Serialization or IO failure
pub fn write_export(
    collection: &ArticleCollection,
    format: ExportFormat,
    destination: &Path,
) -> Result<usize, ExportError> {
    if collection.is_empty() {
        tracing::warn!(%format, path = %destination.display(), "No articles to export");
        return Ok(0);
    }

    let content = match format {
        ExportFormat::Csv => to_csv_string(collection)?,
        ExportFormat::Json => to_json_string(collection)?,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(destination, content)?;

    tracing::info!(
        %format,
        path = %destination.display(),
        records = collection.len(),
        "Export written"
    );
    Ok(collection.len())
}
