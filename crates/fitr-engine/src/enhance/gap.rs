//! Gap detection and gap adjustments.
//!
//! A gap is a requirements or skills term the profile never mentions. Jobs and scholarships
//! are penalized for gaps; trainings are rewarded for teaching them.

use std::collections::BTreeSet;

use crate::{ClusterSet, FlatText, ProfileFeatures, RarityProvider, Section};

/// Returns the distinct requirements and skills unigrams missing from the profile, in order.
pub fn gap_terms(flat: &FlatText, profile: &ProfileFeatures) -> Vec<String> {
    [Section::Requirements, Section::Skills]
        .into_iter()
        .flat_map(|section| flat.section_tokens(section))
        .filter(|term| !profile.has_term(term))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Computes the gap penalty: `Σ rarity(t) × term_weight`, times `scale`.
///
/// The result is a fraction of the base score to subtract.
pub fn gap_penalty<R: RarityProvider>(gaps: &[String], rarity: &R, term_weight: f64, scale: f64) -> f64 {
    gaps.iter()
        .map(|t| rarity.rarity(t) * term_weight)
        .sum::<f64>()
        * scale
}

/// Computes the opportunity boost: `mean(rarity(t) × w(t))`, times `scale`, where `w` is
/// `cluster_weight` for cluster terms and 1.0 otherwise. No gaps yields 0.0.
pub fn gap_opportunity<R: RarityProvider>(
    gaps: &[String],
    rarity: &R,
    clusters: &ClusterSet,
    cluster_weight: f64,
    scale: f64,
) -> f64 {
    if gaps.is_empty() {
        return 0.0;
    }
    let sum: f64 = gaps
        .iter()
        .map(|t| {
            let weight = if clusters.contains(t) { cluster_weight } else { 1.0 };
            rarity.rarity(t) * weight
        })
        .sum();
    sum / gaps.len() as f64 * scale
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use fitr_config::SectionWeights;
    use fitr_text::{Lexicon, Normalizer, Stopwords};
    use serde_json::json;

    use super::*;
    use crate::{Kind, Profile};

    /// Mock rarity provider for testing.
    struct MockRarity {
        /// Map from term to rarity value.
        values: HashMap<&'static str, f64>,
    }

    impl RarityProvider for MockRarity {
        fn rarity(&self, term: &str) -> f64 {
            self.values.get(term).copied().unwrap_or(1.0)
        }
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn gaps_come_from_requirements_and_skills_only() {
        let lexicon = Lexicon::load();
        let normalizer = Normalizer::new(&lexicon, Stopwords::default());
        let profile = Profile::from_value(json!({"other_skills": ["python"]})).unwrap();
        let features = ProfileFeatures::extract(&profile, &normalizer, &SectionWeights::default());
        let flat = FlatText::from_sections(vec![
            (Section::Title, terms(&["scala", "develop"])),
            (Section::Requirements, terms(&["python", "kafka"])),
            (Section::Skills, terms(&["kafka", "spark", "python"])),
        ]);

        assert_eq!(gap_terms(&flat, &features), vec!["kafka", "spark"]);
    }

    #[test]
    fn penalty_sums_weighted_rarity() {
        let rarity = MockRarity {
            values: HashMap::from([("kafka", 2.0), ("spark", 3.0)]),
        };
        let penalty = gap_penalty(&terms(&["kafka", "spark"]), &rarity, 0.1, 0.02);
        assert!((penalty - 0.5 * 0.02).abs() < 1e-12);
        assert_eq!(gap_penalty(&[], &rarity, 0.1, 0.02), 0.0);
    }

    #[test]
    fn opportunity_weights_cluster_terms() {
        let lexicon = Lexicon::load();
        let normalizer = Normalizer::new(&lexicon, Stopwords::default());
        let clusters = ClusterSet::build(Kind::Training, &BTreeMap::new(), &normalizer);
        let rarity = MockRarity {
            values: HashMap::from([("kubernet", 2.0), ("pottery", 2.0)]),
        };

        let cluster_gap = gap_opportunity(&terms(&["kubernet"]), &rarity, &clusters, 1.2, 2.0);
        let plain_gap = gap_opportunity(&terms(&["pottery"]), &rarity, &clusters, 1.2, 2.0);

        assert!((cluster_gap - 2.0 * 1.2 * 2.0).abs() < 1e-12);
        assert!((plain_gap - 4.0).abs() < 1e-12);
        assert_eq!(gap_opportunity(&[], &rarity, &clusters, 1.2, 2.0), 0.0);
    }
}
