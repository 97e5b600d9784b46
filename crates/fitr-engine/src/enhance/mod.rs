//! Domain-aware score adjustments.
//!
//! Base similarity only says how much vocabulary a profile and a posting share. The
//! adjustments here fold in what the vocabulary means: clustered skills, recent experience,
//! missing requirements and approaching deadlines.

mod deadline;
mod gap;
mod recency;
mod semantic;

use chrono::NaiveDate;
use fitr_config::{GapMode, ScoringSettings};
use serde::Serialize;

pub use deadline::deadline_boost;
pub use gap::{gap_opportunity, gap_penalty, gap_terms};
pub use recency::{RecencyIndex, recency_boost};
pub use semantic::{semantic_boost, semantic_reach};

use crate::{FlatText, KindProfile, Posting, Profile, ProfileFeatures, RarityIndex};

/// Every adjustment applied to one posting's base similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustments {
    /// Multiplier from shared cluster terms and recent experience.
    pub semantic_boost: f64,
    /// Multiplier from an approaching expiration date.
    pub deadline_boost: f64,
    /// Fraction of the scaled base score subtracted for missing terms.
    pub gap_penalty: f64,
    /// Points added for missing terms a training would teach.
    pub opportunity_boost: f64,
    /// Vocabulary terms the profile and posting share.
    pub matched_terms: Vec<String>,
    /// Requirements and skills terms the profile lacks.
    pub gap_terms: Vec<String>,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            semantic_boost: 1.0,
            deadline_boost: 1.0,
            gap_penalty: 0.0,
            opportunity_boost: 0.0,
            matched_terms: Vec::new(),
            gap_terms: Vec::new(),
        }
    }
}

/// Computes adjustments for every posting of one request.
pub struct Enhancer<'e> {
    /// The kind's strategy.
    kind: &'e KindProfile<'e>,
    /// Shared scoring constants.
    scoring: &'e ScoringSettings,
    /// The profile's features.
    features: &'e ProfileFeatures,
    /// Rarity over the request's postings.
    rarity: &'e RarityIndex,
    /// Recency lookups over the profile's history.
    recency: RecencyIndex,
    /// Number of profile terms that can contribute to the semantic boost.
    reach: usize,
    /// Reference date for recency and deadlines.
    today: NaiveDate,
}

impl<'e> Enhancer<'e> {
    /// Prepares the per-request state. `profile_terms` are the vocabulary terms the profile
    /// vector holds.
    pub fn new(
        kind: &'e KindProfile<'e>,
        scoring: &'e ScoringSettings,
        profile: &Profile,
        profile_terms: &[&str],
        features: &'e ProfileFeatures,
        rarity: &'e RarityIndex,
        today: NaiveDate,
    ) -> Self {
        let recency = RecencyIndex::build(
            profile,
            &kind.normalizer,
            kind.training_recency,
            scoring,
            today,
        );
        let reach = semantic_reach(
            profile_terms.iter().copied(),
            &kind.clusters,
            |term| recency.boost(term),
            scoring.cluster_increment,
        );
        Self {
            kind,
            scoring,
            features,
            rarity,
            recency,
            reach,
            today,
        }
    }

    /// Computes the adjustments for one posting given the terms it shares with the profile.
    pub fn adjust(&self, posting: &Posting, flat: &FlatText, matched: Vec<String>) -> Adjustments {
        let semantic = semantic_boost(
            &matched,
            self.reach,
            &self.kind.clusters,
            |term| self.recency.boost(term),
            self.scoring.cluster_increment,
            self.kind.boost_cap,
        );
        let deadline = if self.kind.deadline_boost {
            deadline_boost(
                &posting.expiration_date,
                self.today,
                self.scoring.deadline_max_boost,
                self.scoring.deadline_decay_days,
            )
        } else {
            1.0
        };

        let gaps = gap_terms(flat, self.features);
        let (penalty, opportunity) = match self.kind.gap_mode {
            GapMode::Penalty => (
                gap_penalty(
                    &gaps,
                    self.rarity,
                    self.scoring.gap_term_weight,
                    self.kind.gap_scale,
                ),
                0.0,
            ),
            GapMode::Opportunity => (
                0.0,
                gap_opportunity(
                    &gaps,
                    self.rarity,
                    &self.kind.clusters,
                    self.scoring.cluster_term_weight,
                    self.kind.gap_scale,
                ),
            ),
        };

        Adjustments {
            semantic_boost: semantic,
            deadline_boost: deadline,
            gap_penalty: penalty,
            opportunity_boost: opportunity,
            matched_terms: matched,
            gap_terms: gaps,
        }
    }
}
