use crate::article::ArticleRecord;
use std::collections::HashMap;

/// Insertion-ordered collection of article records keyed by URL
#[derive(Debug, Clone, Default)]
pub struct ArticleCollection {
    records: Vec<ArticleRecord>,
    index: HashMap<String, usize>,
}

impl ArticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record keyed by its URL
    ///
    /// On a key collision the last write wins: the existing slot keeps its
    /// position, takes the new record, and the replaced record is returned.
    pub fn insert(&mut self, record: ArticleRecord) -> Option<ArticleRecord> {
        if let Some(&position) = self.index.get(record.url()) {
            return Some(std::mem::replace(&mut self.records[position], record));
        }

        self.index
            .insert(record.url().to_string(), self.records.len());
        self.records.push(record);
        None
    }

    pub fn get(&self, url: &str) -> Option<&ArticleRecord> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }

    /// Counts records per newspaper, in order of first appearance
    pub fn count_by_newspaper(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(name, _)| name == record.newspaper()) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.newspaper().to_string(), 1)),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ArticleRecord> for ArticleCollection {
    fn from_iter<I: IntoIterator<Item = ArticleRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}
