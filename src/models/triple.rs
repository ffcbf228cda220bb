//! Triple model: aggregated subject → object relations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Letter;

/// Divisor between `count` and `weight`.
pub const WEIGHT_DIVISOR: f64 = 10.0;

/// One aggregated (subject, object) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject_name: String,
    pub object_name: String,
    /// Number of letters from subject to object.
    pub count: u32,
    /// Always `count / 10`.
    pub weight: f64,
}

impl Triple {
    pub fn new(subject_name: impl Into<String>, object_name: impl Into<String>, count: u32) -> Self {
        Self {
            subject_name: subject_name.into(),
            object_name: object_name.into(),
            count,
            weight: f64::from(count) / WEIGHT_DIVISOR,
        }
    }
}

/// Ordered collection of triples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripleTable {
    pub rows: Vec<Triple>,
}

impl TripleTable {
    pub fn new(rows: Vec<Triple>) -> Self {
        Self { rows }
    }

    /// Count (subject, object) pairs over `letters`.
    ///
    /// Rows are ordered by subject ascending, then count descending,
    /// then object ascending.
    pub fn aggregate<'a>(letters: impl IntoIterator<Item = &'a Letter>) -> Self {
        let mut counts: HashMap<(&str, &str), u32> = HashMap::new();
        for letter in letters {
            *counts
                .entry((letter.subject_name.as_str(), letter.object_name.as_str()))
                .or_default() += 1;
        }

        let mut rows: Vec<Triple> = counts
            .into_iter()
            .map(|((s, o), c)| Triple::new(s, o, c))
            .collect();
        rows.sort_by(|a, b| {
            a.subject_name
                .cmp(&b.subject_name)
                .then(b.count.cmp(&a.count))
                .then(a.object_name.cmp(&b.object_name))
        });
        Self { rows }
    }

    /// Keep only triples whose count is strictly above `threshold`.
    pub fn above_count(&self, threshold: u32) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|t| t.count > threshold)
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a TripleTable {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
