//! Vector similarity core.
//!
//! Builds one vocabulary over the profile and every posting, weights each document's terms
//! with sublinear TF and smoothed IDF, and compares L2-normalized vectors by cosine.
//!
//! All maps are ordered, so a fixed input always yields the same vocabulary and weights.

use std::collections::BTreeMap;

use fitr_config::VectorSettings;
use fitr_text::TermCounts;

use crate::EngineError;

/// The shared vocabulary with per-term document frequency and IDF.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Terms in lexicographic order; a term's position is its index.
    terms: Vec<String>,
    /// Term to index.
    index: BTreeMap<String, usize>,
    /// Document frequency per index.
    df: Vec<usize>,
    /// Smoothed IDF per index.
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Returns the index of a term.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Returns the term at an index.
    pub fn term(&self, index: usize) -> &str {
        &self.terms[index]
    }

    /// Returns the document frequency of a term.
    pub fn df(&self, term: &str) -> Option<usize> {
        self.index_of(term).map(|i| self.df[i])
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A sparse, L2-normalized term-weight vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    /// Non-zero weights by vocabulary index.
    weights: BTreeMap<usize, f64>,
}

impl SparseVector {
    /// Builds a normalized vector from raw weights. Zero weights are dropped.
    fn normalized(raw: BTreeMap<usize, f64>) -> Self {
        let norm = raw.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Self::default();
        }
        let weights = raw
            .into_iter()
            .filter(|(_, w)| *w != 0.0)
            .map(|(i, w)| (i, w / norm))
            .collect();
        Self { weights }
    }

    /// Returns the weight at a vocabulary index, or zero.
    pub fn get(&self, index: usize) -> f64 {
        self.weights.get(&index).copied().unwrap_or(0.0)
    }

    /// Returns the Euclidean norm: 1.0, or 0.0 for an empty vector.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Returns the number of non-zero entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if every weight is zero.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over the non-zero indices in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.weights.keys().copied()
    }

    /// Returns the indices that are non-zero in both vectors, in order.
    pub fn shared(&self, other: &Self) -> Vec<usize> {
        self.weights
            .keys()
            .filter(|i| other.weights.contains_key(i))
            .copied()
            .collect()
    }

    /// Computes the cosine similarity with another vector.
    ///
    /// Returns 0.0 when either vector has zero norm.
    pub fn cosine(&self, other: &Self) -> f64 {
        let (a_norm, b_norm) = (self.norm(), other.norm());
        if a_norm == 0.0 || b_norm == 0.0 {
            return 0.0;
        }
        let dot: f64 = self
            .shared(other)
            .into_iter()
            .map(|i| self.get(i) * other.get(i))
            .sum();
        (dot / (a_norm * b_norm)).clamp(0.0, 1.0)
    }
}

/// A fitted vocabulary and one vector per input document.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// The shared vocabulary.
    vocabulary: Vocabulary,
    /// One vector per document, in input order.
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fits the vocabulary over `documents` and vectorizes each of them.
    ///
    /// Terms are kept when they appear in at least `min_df` documents. When more than
    /// `max_features` remain, the ones with the highest total count across all documents win,
    /// ties broken by term order.
    pub fn fit(documents: &[TermCounts], settings: &VectorSettings) -> Result<Self, EngineError> {
        let n = documents.len();
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total: BTreeMap<&str, f64> = BTreeMap::new();
        for doc in documents {
            for (term, count) in doc.iter() {
                if count <= 0.0 {
                    continue;
                }
                *df.entry(term).or_insert(0) += 1;
                *total.entry(term).or_insert(0.0) += count;
            }
        }

        let mut kept: Vec<&str> = df
            .iter()
            .filter(|&(_, &d)| d >= settings.min_df)
            .map(|(&t, _)| t)
            .collect();
        if kept.len() > settings.max_features {
            kept.sort_by(|a, b| total[b].total_cmp(&total[a]).then_with(|| a.cmp(b)));
            kept.truncate(settings.max_features);
            kept.sort_unstable();
        }
        if kept.is_empty() {
            return Err(EngineError::EmptyVocabulary {
                documents: n,
                min_df: settings.min_df,
            });
        }

        let mut vocabulary = Vocabulary::default();
        for (i, term) in kept.iter().enumerate() {
            let d = df[term];
            vocabulary.terms.push((*term).to_string());
            vocabulary.index.insert((*term).to_string(), i);
            vocabulary.df.push(d);
            vocabulary.idf.push(smooth_idf(n, d));
        }

        let vectors = documents
            .iter()
            .map(|doc| {
                let raw = doc
                    .iter()
                    .filter(|(_, count)| *count > 0.0)
                    .filter_map(|(term, count)| {
                        let i = vocabulary.index_of(term)?;
                        Some((i, tf_weight(count, settings.sublinear_tf) * vocabulary.idf[i]))
                    })
                    .collect();
                SparseVector::normalized(raw)
            })
            .collect();

        Ok(Self {
            vocabulary,
            vectors,
        })
    }

    /// Returns the vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the vector of the document at `index`.
    pub fn vector(&self, index: usize) -> &SparseVector {
        &self.vectors[index]
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns true if no document was vectorized.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
pub fn smooth_idf(documents: usize, df: usize) -> f64 {
    ((1.0 + documents as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// Term-frequency weight: `1 + ln(tf)` when sublinear, `tf` otherwise.
pub fn tf_weight(tf: f64, sublinear: bool) -> f64 {
    if sublinear { 1.0 + tf.ln() } else { tf }
}
