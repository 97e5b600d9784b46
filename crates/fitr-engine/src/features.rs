//! Profile feature extraction.
//!
//! A profile becomes a handful of weighted sections. Weights are term-frequency multipliers
//! applied when the profile is counted, so a skill listed once in a section weighted 3 counts
//! as three occurrences.

use std::{collections::BTreeSet, fmt};

use fitr_config::SectionWeights;
use fitr_text::{Normalizer, TermCounts};
use serde::Serialize;

use crate::{Profile, record::lenient::join_nonempty};

/// A profile section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    /// Schools and degrees.
    Education,
    /// Listed skills.
    Skills,
    /// Employment history.
    WorkExperience,
    /// Courses and seminars.
    Training,
    /// Licenses and certificates.
    Certifications,
}

impl ProfileSection {
    /// All sections, in extraction order.
    pub const ALL: [Self; 5] = [
        Self::Education,
        Self::Skills,
        Self::WorkExperience,
        Self::Training,
        Self::Certifications,
    ];

    /// Returns the section name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Skills => "skills",
            Self::WorkExperience => "work_experience",
            Self::Training => "training",
            Self::Certifications => "certifications",
        }
    }

    /// Looks up this section's weight.
    pub fn weight(self, weights: &SectionWeights) -> u32 {
        match self {
            Self::Education => weights.education,
            Self::Skills => weights.skills,
            Self::WorkExperience => weights.work_experience,
            Self::Training => weights.training,
            Self::Certifications => weights.certifications,
        }
    }

    /// Collects the raw text of this section from a profile.
    fn text(self, profile: &Profile) -> String {
        let parts: Vec<String> = match self {
            Self::Education => profile
                .educational_background
                .iter()
                .flat_map(|e| [&e.course, &e.level, &e.school, &e.awards])
                .cloned()
                .collect(),
            Self::Skills => profile.other_skills.iter().map(|s| s.name.clone()).collect(),
            Self::WorkExperience => profile
                .work_experience
                .iter()
                .flat_map(|w| [&w.position, &w.company, &w.description])
                .cloned()
                .collect(),
            Self::Training => profile
                .other_training
                .iter()
                .flat_map(|t| [&t.course, &t.institution, &t.skills_acquired])
                .cloned()
                .collect(),
            Self::Certifications => profile
                .professional_license
                .iter()
                .map(|l| l.license.clone())
                .chain(profile.other_training.iter().map(|t| t.certificate.clone()))
                .collect(),
        };
        join_nonempty(parts, ". ")
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One normalized, weighted profile section.
#[derive(Debug, Clone, Serialize)]
pub struct WeightedSection {
    /// Which section this is.
    pub section: ProfileSection,
    /// Term-frequency multiplier.
    pub weight: u32,
    /// Normalized tokens.
    pub tokens: Vec<String>,
}

/// The profile as the matcher sees it.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeatures {
    /// Non-empty sections in extraction order.
    pub sections: Vec<WeightedSection>,
    /// Every unigram in the profile, whatever its section weight.
    unigrams: BTreeSet<String>,
}

impl ProfileFeatures {
    /// Extracts weighted sections from a profile.
    pub fn extract(
        profile: &Profile,
        normalizer: &Normalizer<'_>,
        weights: &SectionWeights,
    ) -> Self {
        let mut unigrams = BTreeSet::new();
        let mut sections = Vec::new();
        for section in ProfileSection::ALL {
            let tokens = normalizer.tokens(&section.text(profile));
            if tokens.is_empty() {
                continue;
            }
            unigrams.extend(tokens.iter().cloned());
            sections.push(WeightedSection {
                section,
                weight: section.weight(weights),
                tokens,
            });
        }
        Self { sections, unigrams }
    }

    /// Counts weighted n-grams. N-grams never cross a section boundary.
    pub fn term_counts(&self, ngram_min: usize, ngram_max: usize) -> TermCounts {
        let mut counts = TermCounts::new();
        for section in &self.sections {
            counts.add_ngrams(
                &section.tokens,
                ngram_min,
                ngram_max,
                f64::from(section.weight),
            );
        }
        counts
    }

    /// Returns true when the profile mentions the unigram anywhere.
    pub fn has_term(&self, unigram: &str) -> bool {
        self.unigrams.contains(unigram)
    }

    /// Returns the profile's unigram set.
    pub fn unigrams(&self) -> &BTreeSet<String> {
        &self.unigrams
    }

    /// Returns true if no section produced any token.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
