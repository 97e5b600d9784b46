//! Semantic cluster boost.

use crate::ClusterSet;

/// One term's share of the boost: `increment` when the term belongs to a cluster, plus its
/// recency increment (`recency(term) − 1`).
fn contribution<R>(term: &str, clusters: &ClusterSet, recency: &R, increment: f64) -> f64
where
    R: Fn(&str) -> f64,
{
    let cluster = if clusters.contains(term) { increment } else { 0.0 };
    cluster + (recency(term) - 1.0).max(0.0)
}

/// Counts the profile terms that would contribute to the boost if a posting shared them.
pub fn semantic_reach<'t, I, R>(
    profile_terms: I,
    clusters: &ClusterSet,
    recency: R,
    increment: f64,
) -> usize
where
    I: IntoIterator<Item = &'t str>,
    R: Fn(&str) -> f64,
{
    profile_terms
        .into_iter()
        .filter(|term| contribution(term, clusters, &recency, increment) > 0.0)
        .count()
}

/// Computes the semantic boost over the terms a profile and posting share.
///
/// The contributions of the shared terms are summed and divided by `reach`, the number of
/// contributing profile terms from [`semantic_reach`]: `1 + sum / reach`, capped at `cap`.
/// The divisor depends on the profile alone, so sharing an extra term never lowers the boost.
/// With nothing to share the boost is 1.0.
pub fn semantic_boost<R>(
    shared: &[String],
    reach: usize,
    clusters: &ClusterSet,
    recency: R,
    increment: f64,
    cap: f64,
) -> f64
where
    R: Fn(&str) -> f64,
{
    if shared.is_empty() || reach == 0 {
        return 1.0;
    }
    let sum: f64 = shared
        .iter()
        .map(|term| contribution(term, clusters, &recency, increment))
        .sum();
    (1.0 + sum / reach as f64).min(cap)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fitr_text::{Lexicon, Normalizer, Stopwords};

    use super::*;
    use crate::Kind;

    fn clusters() -> ClusterSet {
        let lexicon = Lexicon::load();
        let normalizer = Normalizer::new(&lexicon, Stopwords::default());
        ClusterSet::build(Kind::Job, &BTreeMap::new(), &normalizer)
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn no_shared_terms_is_neutral() {
        assert_eq!(semantic_boost(&[], 3, &clusters(), |_| 1.5, 0.2, 1.5), 1.0);
        assert_eq!(
            semantic_boost(&terms(&["acm"]), 0, &clusters(), |_| 1.0, 0.2, 1.5),
            1.0
        );
    }

    #[test]
    fn reach_counts_contributing_profile_terms() {
        let recent = |t: &str| if t == "weld" { 1.2 } else { 1.0 };
        let reach = semantic_reach(["python", "sql", "acm", "weld"], &clusters(), recent, 0.2);
        assert_eq!(reach, 3);
    }

    #[test]
    fn shared_contributions_divide_by_reach() {
        let boost = semantic_boost(&terms(&["python", "acm"]), 2, &clusters(), |_| 1.0, 0.2, 1.5);
        assert!((boost - 1.1).abs() < 1e-12);

        let all = semantic_boost(&terms(&["python", "sql"]), 2, &clusters(), |_| 1.0, 0.2, 1.5);
        assert!((all - 1.2).abs() < 1e-12);
    }

    #[test]
    fn extra_shared_terms_never_lower_the_boost() {
        let clusters = clusters();
        let recent = |t: &str| if t == "python" { 1.5 } else { 1.0 };
        let profile = ["python", "sql", "weld"];
        let reach = semantic_reach(profile, &clusters, recent, 0.2);

        let mut shared = Vec::new();
        let mut previous = 1.0;
        for term in ["python", "weld", "sql"] {
            shared.push(term.to_string());
            let boost = semantic_boost(&shared, reach, &clusters, recent, 0.2, 2.0);
            assert!(boost >= previous, "{term}: {boost} < {previous}");
            previous = boost;
        }
    }

    #[test]
    fn recency_adds_and_cap_applies() {
        let recent = |t: &str| if t == "python" { 1.5 } else { 1.0 };
        let boost = semantic_boost(&terms(&["python"]), 1, &clusters(), recent, 0.2, 1.5);
        assert!((boost - 1.5).abs() < 1e-12);

        let capped = semantic_boost(&terms(&["python"]), 1, &clusters(), |_| 1.5, 0.2, 1.3);
        assert_eq!(capped, 1.3);
    }
}
