//! Tier explanations.
//!
//! Explanations depend on the final score and the posting kind only. They describe the tier a
//! score falls in, not the terms that produced it.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::Kind;

/// Score above which a match is excellent.
pub const EXCELLENT_ABOVE: f64 = 85.0;

/// Score above which a match is good.
pub const GOOD_ABOVE: f64 = 70.0;

/// A qualitative score tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Score above 85.
    Excellent,
    /// Score above 70.
    Good,
    /// Everything else.
    Moderate,
}

impl Tier {
    /// Classifies a final score.
    pub fn from_score(score: f64) -> Self {
        if score > EXCELLENT_ABOVE {
            Self::Excellent
        } else if score > GOOD_ABOVE {
            Self::Good
        } else {
            Self::Moderate
        }
    }

    /// Returns the `match_level` label.
    pub fn match_level(self) -> &'static str {
        match self {
            Self::Excellent => "very_high",
            Self::Good => "high",
            Self::Moderate => "moderate",
        }
    }

    /// Returns whether the tier carries the kind's notable-boost flag.
    pub fn notable(self) -> bool {
        !matches!(self, Self::Moderate)
    }
}

/// Returns the fixed factor strings for a kind and tier.
fn factors(kind: Kind, tier: Tier) -> &'static [&'static str] {
    match (kind, tier) {
        (Kind::Job, Tier::Excellent) => &[
            "Strong alignment between your skills and the job requirements",
            "Relevant and recent work experience",
            "Educational background fits the role",
        ],
        (Kind::Job, Tier::Good) => &[
            "Good overlap with the required skills",
            "Related work experience",
        ],
        (Kind::Job, Tier::Moderate) => &[
            "Partial overlap with the required skills",
            "Some requirements may need further development",
        ],
        (Kind::Training, Tier::Excellent) => &[
            "Builds directly on your current skills",
            "Strong fit for your career direction",
            "High potential for skill development",
        ],
        (Kind::Training, Tier::Good) => &[
            "Complements your existing skills",
            "Introduces useful new skills",
        ],
        (Kind::Training, Tier::Moderate) => &[
            "Covers areas outside your current experience",
            "Broadens your skill set",
        ],
        (Kind::Scholarship, Tier::Excellent) => &[
            "Your background closely fits the field of study",
            "Strong match with the eligibility requirements",
            "Check the application deadline",
        ],
        (Kind::Scholarship, Tier::Good) => &[
            "Your background relates to the field of study",
            "Meets several eligibility requirements",
        ],
        (Kind::Scholarship, Tier::Moderate) => &[
            "Partial match with the field of study",
            "Review the eligibility requirements carefully",
        ],
    }
}

/// The explanation attached to a recommendation.
///
/// Serializes as `{"primary_factors": [...], "match_level": "...", "<flag>": bool}` where the
/// flag name depends on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explanation {
    /// Posting kind.
    pub kind: Kind,
    /// Score tier.
    pub tier: Tier,
}

impl Explanation {
    /// Explains a final score for a kind.
    pub fn for_score(kind: Kind, score: f64) -> Self {
        Self {
            kind,
            tier: Tier::from_score(score),
        }
    }

    /// Returns the factor strings.
    pub fn primary_factors(&self) -> &'static [&'static str] {
        factors(self.kind, self.tier)
    }

    /// Returns the `match_level` label.
    pub fn match_level(&self) -> &'static str {
        self.tier.match_level()
    }

    /// Returns the notable-boost flag.
    pub fn flag(&self) -> bool {
        self.tier.notable()
    }
}

impl Serialize for Explanation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("primary_factors", self.primary_factors())?;
        map.serialize_entry("match_level", self.match_level())?;
        map.serialize_entry(self.kind.flag_name(), &self.flag())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_score(100.0), Tier::Excellent);
        assert_eq!(Tier::from_score(85.01), Tier::Excellent);
        assert_eq!(Tier::from_score(85.0), Tier::Good);
        assert_eq!(Tier::from_score(70.01), Tier::Good);
        assert_eq!(Tier::from_score(70.0), Tier::Moderate);
        assert_eq!(Tier::from_score(0.0), Tier::Moderate);
    }

    #[test]
    fn every_kind_and_tier_has_factors() {
        for kind in Kind::ALL {
            for tier in [Tier::Excellent, Tier::Good, Tier::Moderate] {
                assert!(!factors(kind, tier).is_empty());
            }
        }
    }

    #[test]
    fn serializes_with_kind_flag() {
        let value = serde_json::to_value(Explanation::for_score(Kind::Scholarship, 90.0)).unwrap();
        assert_eq!(value["match_level"], json!("very_high"));
        assert_eq!(value["deadline_approaching"], json!(true));
        assert!(value["primary_factors"].as_array().is_some_and(|f| !f.is_empty()));

        let value = serde_json::to_value(Explanation::for_score(Kind::Training, 40.0)).unwrap();
        assert_eq!(value["match_level"], json!("moderate"));
        assert_eq!(value["skill_development"], json!(false));
        assert!(value.get("recency_boost").is_none());
    }
}
