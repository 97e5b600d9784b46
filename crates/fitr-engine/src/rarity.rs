//! Term rarity over the current posting corpus.
//!
//! Rarity only scales gap adjustments; it never touches base similarity.

use std::collections::{BTreeMap, HashSet};

/// Rarity assigned to terms no posting contains.
pub const UNKNOWN_RARITY: f64 = 1.0;

/// Trait for providing rarity values for terms.
///
/// This abstraction lets gap scoring work against a per-request index or fixed values.
pub trait RarityProvider {
    /// Returns the rarity of a unigram. Higher values indicate rarer terms.
    fn rarity(&self, term: &str) -> f64;
}

/// Rarity of every unigram in a posting corpus: `ln(N / (df + 1)) + 1`.
#[derive(Debug, Clone, Default)]
pub struct RarityIndex {
    /// Number of postings.
    documents: usize,
    /// Rarity per unigram.
    rarity: BTreeMap<String, f64>,
}

impl RarityIndex {
    /// Builds the index from each posting's unigram set.
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = HashSet<&'a str>>,
    {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        let mut n = 0;
        for terms in documents {
            n += 1;
            for term in terms {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        let total = n as f64;
        let rarity = df
            .into_iter()
            .map(|(term, count)| (term, (total / (count as f64 + 1.0)).ln() + 1.0))
            .collect();
        Self {
            documents: n,
            rarity,
        }
    }

    /// Returns the number of postings indexed.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Returns the number of distinct terms.
    pub fn len(&self) -> usize {
        self.rarity.len()
    }

    /// Returns true if the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.rarity.is_empty()
    }
}

impl RarityProvider for RarityIndex {
    fn rarity(&self, term: &str) -> f64 {
        self.rarity.get(term).copied().unwrap_or(UNKNOWN_RARITY)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn set<'a>(terms: &[&'a str]) -> HashSet<&'a str> {
        terms.iter().copied().collect()
    }

    #[test]
    fn rarity_formula() {
        let index = RarityIndex::build([
            set(&["python", "sql"]),
            set(&["python", "java"]),
            set(&["python", "sql"]),
            set(&["rust"]),
        ]);

        assert_eq!(index.documents(), 4);
        assert_eq!(index.len(), 4);
        assert!((index.rarity("python") - ((4.0f64 / 4.0).ln() + 1.0)).abs() < 1e-12);
        assert!((index.rarity("sql") - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((index.rarity("java") - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn rarer_terms_score_higher() {
        let index = RarityIndex::build([set(&["a", "b"]), set(&["a"]), set(&["a"])]);
        assert!(index.rarity("b") > index.rarity("a"));
    }

    #[test]
    fn unknown_terms_are_neutral() {
        let index = RarityIndex::build(Vec::<HashSet<&str>>::new());
        assert!(index.is_empty());
        assert_eq!(index.rarity("anything"), UNKNOWN_RARITY);
    }
}
