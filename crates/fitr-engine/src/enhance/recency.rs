//! Recency boost from work and training history.

use std::collections::HashSet;

use chrono::NaiveDate;
use fitr_config::ScoringSettings;
use fitr_text::Normalizer;

use crate::{
    Profile,
    dates::{DateField, parse_date_field},
};

/// A history entry reduced to its identifying tokens and end date.
#[derive(Debug, Clone)]
struct HistoryEntry {
    /// Normalized position/company or course/institution tokens.
    tokens: HashSet<String>,
    /// Parsed end date.
    end: DateField,
}

/// Looks up how recently the profile used a term.
#[derive(Debug, Clone)]
pub struct RecencyIndex {
    /// History entries in profile order.
    entries: Vec<HistoryEntry>,
    /// Reference date.
    today: NaiveDate,
    /// Boost for an entry ending today.
    max_boost: f64,
    /// Yearly decay rate.
    decay: f64,
}

impl RecencyIndex {
    /// Indexes the profile's work experience, plus its training history when
    /// `include_training` is set.
    pub fn build(
        profile: &Profile,
        normalizer: &Normalizer<'_>,
        include_training: bool,
        scoring: &ScoringSettings,
        today: NaiveDate,
    ) -> Self {
        let entry = |fields: [&str; 2], end: &str| HistoryEntry {
            tokens: fields
                .iter()
                .flat_map(|f| normalizer.tokens(f))
                .collect(),
            end: parse_date_field(end),
        };
        let mut entries: Vec<_> = profile
            .work_experience
            .iter()
            .map(|w| entry([&w.position, &w.company], &w.end_date))
            .collect();
        if include_training {
            entries.extend(
                profile
                    .other_training
                    .iter()
                    .map(|t| entry([&t.course, &t.institution], &t.end_date)),
            );
        }
        Self {
            entries,
            today,
            max_boost: scoring.recency_max_boost,
            decay: scoring.recency_decay,
        }
    }

    /// Returns the most recent end date among entries mentioning every word of `term`.
    ///
    /// Ongoing and undated entries end today. Entries with unparsable dates are ignored.
    pub fn last_used(&self, term: &str) -> Option<NaiveDate> {
        let words: Vec<&str> = term.split(' ').collect();
        self.entries
            .iter()
            .filter(|e| !e.tokens.is_empty() && words.iter().all(|w| e.tokens.contains(*w)))
            .filter_map(|e| match e.end {
                DateField::Date(d) => Some(d),
                DateField::Present | DateField::Missing => Some(self.today),
                DateField::Unparsable => {
                    tracing::debug!(term, "unparsable end date, recency weight left neutral");
                    None
                }
            })
            .max()
    }

    /// Returns the recency boost of a term, 1.0 when no entry mentions it.
    pub fn boost(&self, term: &str) -> f64 {
        self.last_used(term).map_or(1.0, |end| {
            let days = (self.today - end).num_days().max(0);
            recency_boost(days, self.max_boost, self.decay)
        })
    }
}

/// Computes `max_boost × e^(−decay × days / 365)`, floored at 1.0.
pub fn recency_boost(days_since: i64, max_boost: f64, decay: f64) -> f64 {
    (max_boost * (-decay * days_since as f64 / 365.0).exp()).max(1.0)
}
