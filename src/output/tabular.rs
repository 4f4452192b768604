use crate::article::{ArticleCollection, ArticleField};
use crate::output::export::COLUMNS;
use chrono::SecondsFormat;

/// Row-oriented snapshot of the collection, in CSV column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularView {
    rows: Vec<Vec<String>>,
}

impl TabularView {
    pub fn from_collection(collection: &ArticleCollection) -> Self {
        let rows = collection
            .iter()
            .map(|record| {
                let mut row = Vec::with_capacity(COLUMNS.len());
                row.push(record.url().to_string());
                row.push(record.newspaper().to_string());
                row.extend(
                    ArticleField::ALL
                        .into_iter()
                        .map(|field| record.field(field).to_string()),
                );
                row.push(
                    record
                        .scraped_at()
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                );
                row
            })
            .collect();

        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, none for an unknown column name
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = COLUMNS.iter().position(|c| *c == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Counts distinct values of a column, most frequent first
    ///
    /// Ties keep the order in which the values first appear.
    pub fn value_counts(&self, name: &str) -> Option<Vec<(String, usize)>> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for value in self.column(name)? {
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value.to_string(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Some(counts)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> TabularView {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleFields, ArticleRecord};
    use chrono::Utc;

    fn record(url: &str, newspaper: &str) -> ArticleRecord {
        ArticleRecord::with_timestamp(
            url,
            newspaper,
            ArticleFields {
                headline: format!("Titular {}", url),
                ..ArticleFields::default()
            },
            Utc::now(),
        )
    }

    fn view() -> TabularView {
        let collection: ArticleCollection = [
            record("https://a.test/1", "A"),
            record("https://b.test/1", "B"),
            record("https://b.test/2", "B"),
            record("https://c.test/1", "C"),
        ]
        .into_iter()
        .collect();
        TabularView::from_collection(&collection)
    }

    #[test]
    fn test_rows_follow_column_order() {
        let view = view();
        assert_eq!(view.len(), 4);

        let row = &view.rows()[0];
        assert_eq!(row.len(), view.columns().len());
        assert_eq!(row[0], "https://a.test/1");
        assert_eq!(row[1], "A");
        assert_eq!(row[2], "Titular https://a.test/1");
        assert_eq!(row[6], "");
    }

    #[test]
    fn test_value_counts() {
        let counts = view().value_counts("newspaper").unwrap();
        assert_eq!(
            counts,
            vec![
                ("B".to_string(), 2),
                ("A".to_string(), 1),
                ("C".to_string(), 1),
            ]
        );
        assert!(view().value_counts("nope").is_none());
    }

    #[test]
    fn test_head() {
        let head = view().head(2);
        assert_eq!(head.column("url").unwrap(), vec!["https://a.test/1", "https://b.test/1"]);
        assert_eq!(view().head(10).len(), 4);
        assert!(TabularView::from_collection(&ArticleCollection::new()).is_empty());
    }
}
