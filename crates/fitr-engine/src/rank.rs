//! Final scoring and ordering.

use serde::Serialize;
use serde_json::Value;

use crate::{Explanation, Kind, enhance::Adjustments};

/// How a final score was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Cosine similarity between profile and posting, in `[0, 1]`.
    pub base_similarity: f64,
    /// Adjustments applied on top of it.
    #[serde(flatten)]
    pub adjustments: Adjustments,
}

/// One ranked posting.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Posting kind.
    pub kind: Kind,
    /// Posting identifier.
    pub id: String,
    /// Display key, unique within the request.
    pub key: String,
    /// Position in the input list.
    pub index: usize,
    /// Final score in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    /// The original posting record.
    pub posting: Value,
    /// Tier explanation.
    pub explanation: Explanation,
    /// Score components.
    pub breakdown: ScoreBreakdown,
}

/// Combines base similarity and adjustments into a score in `[0, 100]`.
///
/// `base×100 × semantic × deadline − base×100 × gap + opportunity`, clamped. A non-finite
/// result scores 0.
pub fn final_score(base: f64, adjustments: &Adjustments) -> f64 {
    let scaled = base * 100.0;
    let score = scaled * adjustments.semantic_boost * adjustments.deadline_boost
        - scaled * adjustments.gap_penalty
        + adjustments.opportunity_boost;
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Sorts by descending score rounded to two decimals, keeping input order among ties, and
/// keeps the first `top_n`.
pub fn rank<T, F>(items: &mut Vec<T>, top_n: usize, score: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| round2(score(b)).total_cmp(&round2(score(a))));
    items.truncate(top_n);
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
