use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// One of the five article fields extracted by a portal adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleField {
    Headline,
    Summary,
    Body,
    Date,
    Author,
}

impl ArticleField {
    /// All fields, in export column order
    pub const ALL: [ArticleField; 5] = [
        Self::Headline,
        Self::Summary,
        Self::Body,
        Self::Date,
        Self::Author,
    ];

    /// Returns the field name used as mapping key and CSV column
    pub fn name(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Summary => "summary",
            Self::Body => "body",
            Self::Date => "date",
            Self::Author => "author",
        }
    }

    /// Parses a field from its name
    ///
    /// Returns None if the string doesn't match any known field.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "headline" => Some(Self::Headline),
            "summary" => Some(Self::Summary),
            "body" => Some(Self::Body),
            "date" => Some(Self::Date),
            "author" => Some(Self::Author),
            _ => None,
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field values extracted from one article page
///
/// Every field is always present; a field whose selectors matched nothing is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub headline: String,
    pub summary: String,
    pub body: String,
    pub date: String,
    pub author: String,
}

impl ArticleFields {
    /// Returns the value of one field
    pub fn get(&self, field: ArticleField) -> &str {
        match field {
            ArticleField::Headline => &self.headline,
            ArticleField::Summary => &self.summary,
            ArticleField::Body => &self.body,
            ArticleField::Date => &self.date,
            ArticleField::Author => &self.author,
        }
    }

    /// Sets the value of one field
    pub fn set(&mut self, field: ArticleField, value: String) {
        let slot = match field {
            ArticleField::Headline => &mut self.headline,
            ArticleField::Summary => &mut self.summary,
            ArticleField::Body => &mut self.body,
            ArticleField::Date => &mut self.date,
            ArticleField::Author => &mut self.author,
        };
        *slot = value;
    }

    /// Iterates over `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (ArticleField, &str)> + '_ {
        ArticleField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Returns the fields whose value is empty
    pub fn missing(&self) -> Vec<ArticleField> {
        self.iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| f)
            .collect()
    }
}

/// A scraped article
///
/// Records are assembled by the crawl controller right after a successful
/// extraction and are never mutated afterwards, so there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    url: String,
    newspaper: String,
    headline: String,
    summary: String,
    body: String,
    date: String,
    author: String,
    scraped_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Assembles a record stamped with the current time
    pub fn assemble(url: &Url, newspaper: &str, fields: ArticleFields) -> Self {
        Self::with_timestamp(url.as_str(), newspaper, fields, Utc::now())
    }

    /// Assembles a record with an explicit timestamp
    pub fn with_timestamp(
        url: &str,
        newspaper: &str,
        fields: ArticleFields,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        let ArticleFields {
            headline,
            summary,
            body,
            date,
            author,
        } = fields;

        Self {
            url: url.to_string(),
            newspaper: newspaper.to_string(),
            headline,
            summary,
            body,
            date,
            author,
            scraped_at,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn newspaper(&self) -> &str {
        &self.newspaper
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    /// Returns one extracted field
    pub fn field(&self, field: ArticleField) -> &str {
        match field {
            ArticleField::Headline => &self.headline,
            ArticleField::Summary => &self.summary,
            ArticleField::Body => &self.body,
            ArticleField::Date => &self.date,
            ArticleField::Author => &self.author,
        }
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns a copy of the extracted fields
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            headline: self.headline.clone(),
            summary: self.summary.clone(),
            body: self.body.clone(),
            date: self.date.clone(),
            author: self.author.clone(),
        }
    }
}
