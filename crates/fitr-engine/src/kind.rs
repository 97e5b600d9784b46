//! Posting kinds and their matching strategies.

use std::{fmt, str::FromStr};

use fitr_config::{GapMode, KindSettings, KindTable, SectionWeights};
use fitr_text::{Lexicon, Normalizer, Stopwords};
use serde::Serialize;

use crate::{ClusterSet, EngineError};

/// The three supported posting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Job openings.
    Job,
    /// Training courses.
    Training,
    /// Scholarships and grants.
    Scholarship,
}

impl Kind {
    /// All kinds, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Job, Self::Training, Self::Scholarship];

    /// Returns the lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Training => "training",
            Self::Scholarship => "scholarship",
        }
    }

    /// Returns the key holding the posting record in formatted output.
    pub fn posting_key(self) -> &'static str {
        match self {
            Self::Job => "job_posting",
            Self::Training => "training_posting",
            Self::Scholarship => "scholarship_posting",
        }
    }

    /// Returns the key holding the explanation in formatted output.
    pub fn explanation_key(self) -> &'static str {
        match self {
            Self::Job => "match_explanation",
            Self::Training => "training_match_explanation",
            Self::Scholarship => "scholarship_match_explanation",
        }
    }

    /// Returns the name of the explanation's notable-boost flag.
    pub fn flag_name(self) -> &'static str {
        match self {
            Self::Job => "recency_boost",
            Self::Training => "skill_development",
            Self::Scholarship => "deadline_approaching",
        }
    }

    /// Returns the built-in domain stopwords.
    pub fn domain_stopwords(self) -> &'static [&'static str] {
        match self {
            Self::Job => &[
                "job",
                "position",
                "apply",
                "applicant",
                "hiring",
                "company",
                "work",
                "role",
                "candidate",
                "vacancy",
            ],
            Self::Training => &[
                "training", "course", "program", "session", "trainee", "enroll", "module",
            ],
            Self::Scholarship => &[
                "scholarship",
                "grant",
                "award",
                "applicant",
                "apply",
                "student",
                "program",
                "recipient",
            ],
        }
    }

    /// Selects this kind's settings from a kind table.
    pub fn settings(self, kinds: &KindTable) -> &KindSettings {
        match self {
            Self::Job => &kinds.job,
            Self::Training => &kinds.training,
            Self::Scholarship => &kinds.scholarship,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "job" | "jobs" => Ok(Self::Job),
            "training" | "trainings" => Ok(Self::Training),
            "scholarship" | "scholarships" => Ok(Self::Scholarship),
            other => Err(EngineError::UnknownKind(other.to_string())),
        }
    }
}

/// Everything the engine varies by posting kind.
pub struct KindProfile<'a> {
    /// The kind this strategy applies to.
    pub kind: Kind,
    /// Normalizer with the kind's domain stopwords.
    pub normalizer: Normalizer<'a>,
    /// Semantic clusters, built-in plus configured.
    pub clusters: ClusterSet,
    /// Profile section weights.
    pub section_weights: SectionWeights,
    /// Whether gaps are penalized or rewarded.
    pub gap_mode: GapMode,
    /// Scale of the gap adjustment.
    pub gap_scale: f64,
    /// Whether expiration dates boost the score.
    pub deadline_boost: bool,
    /// Whether training history counts towards recency.
    pub training_recency: bool,
    /// Semantic boost cap.
    pub boost_cap: f64,
}

impl<'a> KindProfile<'a> {
    /// Builds the strategy for `kind` from its settings.
    pub fn new(lexicon: &'a Lexicon, kind: Kind, settings: &KindSettings) -> Self {
        let mut stopwords = Stopwords::from_words(kind.domain_stopwords());
        stopwords.extend(&settings.stopwords);
        let normalizer = Normalizer::new(lexicon, stopwords);
        let clusters = ClusterSet::build(kind, &settings.clusters, &normalizer);
        Self {
            kind,
            normalizer,
            clusters,
            section_weights: settings.section_weights,
            gap_mode: settings.gap_mode,
            gap_scale: settings.gap_scale,
            deadline_boost: settings.deadline_boost,
            training_recency: settings.training_recency,
            boost_cap: settings.boost_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_names() {
        assert_eq!("job".parse::<Kind>().unwrap(), Kind::Job);
        assert_eq!("Trainings".parse::<Kind>().unwrap(), Kind::Training);
        assert_eq!(" scholarships ".parse::<Kind>().unwrap(), Kind::Scholarship);
        assert!(matches!(
            "internship".parse::<Kind>(),
            Err(EngineError::UnknownKind(name)) if name == "internship"
        ));
    }

    #[test]
    fn output_keys() {
        assert_eq!(Kind::Job.posting_key(), "job_posting");
        assert_eq!(Kind::Job.explanation_key(), "match_explanation");
        assert_eq!(
            Kind::Training.explanation_key(),
            "training_match_explanation"
        );
        assert_eq!(
            Kind::Scholarship.explanation_key(),
            "scholarship_match_explanation"
        );
        assert_eq!(Kind::Scholarship.flag_name(), "deadline_approaching");
    }

    #[test]
    fn profile_uses_domain_and_configured_stopwords() {
        let lexicon = Lexicon::load();
        let mut settings = KindSettings::job();
        settings.stopwords = vec!["urgent".to_string()];
        let profile = KindProfile::new(&lexicon, Kind::Job, &settings);

        assert!(profile.normalizer.is_stopword("vacancy"));
        assert!(profile.normalizer.is_stopword("urgent"));
        assert!(!profile.normalizer.is_stopword("python"));
        assert_eq!(profile.gap_mode, GapMode::Penalty);
    }

    #[test]
    fn kinds_differ_in_domain_stopwords() {
        let lexicon = Lexicon::load();
        let kinds = KindTable::default();
        let training = KindProfile::new(&lexicon, Kind::Training, Kind::Training.settings(&kinds));
        let job = KindProfile::new(&lexicon, Kind::Job, Kind::Job.settings(&kinds));

        assert!(training.normalizer.is_stopword("course"));
        assert!(!job.normalizer.is_stopword("course"));
        assert!(training.training_recency);
    }
}
