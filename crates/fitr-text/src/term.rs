//! Weighted term counts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ngrams_into;

/// Term frequencies for one document, where each occurrence may carry a weight.
///
/// A profile's skills section weighted 3 contributes 3.0 per occurrence; posting text
/// contributes 1.0. Terms are kept in lexicographic order so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TermCounts {
    /// Accumulated weight per term.
    counts: BTreeMap<String, f64>,
}

impl TermCounts {
    /// Creates an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` occurrences of `term`.
    pub fn add(&mut self, term: impl Into<String>, weight: f64) {
        *self.counts.entry(term.into()).or_insert(0.0) += weight;
    }

    /// Adds every n-gram of `tokens` in the given range with the same weight.
    ///
    /// A zero weight adds nothing.
    pub fn add_ngrams(&mut self, tokens: &[String], min: usize, max: usize, weight: f64) {
        if weight == 0.0 {
            return;
        }
        ngrams_into(tokens, min, max, |gram| self.add(gram, weight));
    }

    /// Returns the weighted count of `term`, or zero.
    pub fn get(&self, term: &str) -> f64 {
        self.counts.get(term).copied().unwrap_or(0.0)
    }

    /// Returns true if the term has been counted.
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Iterates over `(term, count)` pairs in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Iterates over the counted terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Returns the number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no term has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all counts.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }
}
