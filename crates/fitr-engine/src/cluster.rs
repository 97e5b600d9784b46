//! Semantic clusters.
//!
//! A cluster is a curated set of related domain terms. Matching terms that belong to a cluster
//! earn the semantic boost, and missing cluster terms weigh more as training opportunities.

use std::collections::BTreeMap;

use fitr_text::Normalizer;

use crate::Kind;

/// Clusters shared by every kind.
const COMMON: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "programming",
            "coding",
            "software development",
            "web development",
            "python",
            "java",
            "javascript",
            "typescript",
            "php",
            "ruby",
            "golang",
            "rust",
            "kotlin",
            "swift",
            "sql",
            "html",
            "css",
            "react",
            "angular",
            "django",
            "flask",
            "spring",
            "git",
        ],
    ),
    (
        "data_science",
        &[
            "data science",
            "data analysis",
            "machine learning",
            "deep learning",
            "artificial intelligence",
            "statistics",
            "analytics",
            "pandas",
            "numpy",
            "tableau",
            "power bi",
            "excel",
            "visualization",
        ],
    ),
    (
        "design",
        &[
            "graphic design",
            "user experience",
            "user interface",
            "photoshop",
            "illustrator",
            "figma",
            "autocad",
            "adobe",
            "typography",
        ],
    ),
    (
        "business",
        &[
            "marketing",
            "sales",
            "accounting",
            "finance",
            "management",
            "bookkeeping",
            "customer service",
            "entrepreneurship",
            "budgeting",
            "administration",
            "procurement",
        ],
    ),
    (
        "soft_skills",
        &[
            "communication",
            "leadership",
            "teamwork",
            "problem solving",
            "critical thinking",
            "time management",
            "collaboration",
            "adaptability",
            "negotiation",
        ],
    ),
];

/// Clusters specific to trainings.
const TRAINING: &[(&str, &[&str])] = &[
    (
        "networking",
        &[
            "networking",
            "cisco",
            "routing",
            "switching",
            "tcp",
            "ccna",
            "network administration",
        ],
    ),
    (
        "security",
        &[
            "cybersecurity",
            "security",
            "firewall",
            "penetration testing",
            "encryption",
            "ethical hacking",
            "vulnerability",
        ],
    ),
    (
        "cloud",
        &[
            "cloud",
            "aws",
            "azure",
            "docker",
            "kubernetes",
            "devops",
            "virtualization",
            "linux",
        ],
    ),
];

/// Clusters specific to scholarships.
const SCHOLARSHIP: &[(&str, &[&str])] = &[
    (
        "culinary",
        &[
            "culinary",
            "cooking",
            "baking",
            "pastry",
            "food safety",
            "kitchen",
            "chef",
            "hospitality",
        ],
    ),
    (
        "medical",
        &[
            "nursing",
            "medicine",
            "pharmacy",
            "caregiving",
            "healthcare",
            "clinical",
            "patient care",
            "midwifery",
            "medical technology",
        ],
    ),
    (
        "education",
        &[
            "teaching",
            "education",
            "tutoring",
            "curriculum",
            "pedagogy",
            "literacy",
        ],
    ),
];

/// Returns the built-in clusters for a kind.
pub fn builtin_clusters(kind: Kind) -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    let specific = match kind {
        Kind::Job => &[][..],
        Kind::Training => TRAINING,
        Kind::Scholarship => SCHOLARSHIP,
    };
    COMMON.iter().chain(specific).copied()
}

/// Normalized cluster terms for one kind.
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    /// Multi-word phrases (space-joined stems) to cluster name.
    phrases: BTreeMap<String, String>,
    /// Single stems to cluster name.
    words: BTreeMap<String, String>,
}

impl ClusterSet {
    /// Builds the clusters for `kind`, merging `extra` terms into clusters by name.
    ///
    /// Terms are normalized with the kind's normalizer so they compare directly against
    /// vocabulary terms. Terms that normalize to nothing are dropped.
    pub fn build(
        kind: Kind,
        extra: &BTreeMap<String, Vec<String>>,
        normalizer: &Normalizer<'_>,
    ) -> Self {
        let mut set = Self::default();
        for (name, terms) in builtin_clusters(kind) {
            for term in terms {
                set.insert(name, term, normalizer);
            }
        }
        for (name, terms) in extra {
            for term in terms {
                set.insert(name, term, normalizer);
            }
        }
        set
    }

    /// Adds one raw term to a cluster.
    fn insert(&mut self, cluster: &str, term: &str, normalizer: &Normalizer<'_>) {
        let tokens = normalizer.tokens(term);
        match tokens.len() {
            0 => {}
            1 => {
                self.words
                    .entry(tokens[0].clone())
                    .or_insert_with(|| cluster.to_string());
            }
            _ => {
                self.phrases
                    .entry(tokens.join(" "))
                    .or_insert_with(|| cluster.to_string());
            }
        }
    }

    /// Returns the cluster a vocabulary term belongs to.
    ///
    /// A term belongs to a cluster when it equals one of the cluster's phrases or when any of
    /// its words is a single-word cluster term.
    pub fn cluster_of(&self, term: &str) -> Option<&str> {
        if let Some(name) = self.phrases.get(term) {
            return Some(name);
        }
        term.split(' ')
            .find_map(|word| self.words.get(word))
            .map(String::as_str)
    }

    /// Returns true when the term belongs to any cluster.
    pub fn contains(&self, term: &str) -> bool {
        self.cluster_of(term).is_some()
    }

    /// Returns the number of distinct normalized cluster terms.
    pub fn len(&self) -> usize {
        self.phrases.len() + self.words.len()
    }

    /// Returns true if there are no cluster terms.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use fitr_text::{Lexicon, Stopwords};

    use super::*;

    fn build(kind: Kind, extra: &BTreeMap<String, Vec<String>>) -> ClusterSet {
        let lexicon = Lexicon::load();
        let normalizer = Normalizer::new(&lexicon, Stopwords::default());
        ClusterSet::build(kind, extra, &normalizer)
    }

    #[test]
    fn common_clusters_for_every_kind() {
        for kind in Kind::ALL {
            let set = build(kind, &BTreeMap::new());
            assert_eq!(set.cluster_of("python"), Some("programming"));
            assert_eq!(set.cluster_of("leadership"), Some("soft_skills"));
        }
    }

    #[test]
    fn kind_specific_clusters() {
        let job = build(Kind::Job, &BTreeMap::new());
        let training = build(Kind::Training, &BTreeMap::new());
        let scholarship = build(Kind::Scholarship, &BTreeMap::new());

        assert_eq!(training.cluster_of("kubernet"), Some("cloud"));
        assert!(!job.contains("kubernet"));
        assert_eq!(scholarship.cluster_of("nurs"), Some("medical"));
        assert!(!training.contains("nurs"));
    }

    #[test]
    fn phrases_and_contained_words() {
        let set = build(Kind::Job, &BTreeMap::new());
        assert_eq!(set.cluster_of("machin learn"), Some("data_science"));
        // "python" inside an n-gram is enough.
        assert_eq!(set.cluster_of("advanc python"), Some("programming"));
        assert!(!set.contains("machin"));
    }

    #[test]
    fn extra_terms_merge_by_name() {
        let mut extra = BTreeMap::new();
        extra.insert("cloud".to_string(), vec!["terraform".to_string()]);
        extra.insert("agri".to_string(), vec!["crop science".to_string()]);
        let set = build(Kind::Training, &extra);

        assert_eq!(set.cluster_of("terraform"), Some("cloud"));
        assert_eq!(set.cluster_of("crop scienc"), Some("agri"));
        assert!(!set.is_empty());
    }
}
