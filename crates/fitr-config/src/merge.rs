//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules on top of the built-in defaults.

use std::path::PathBuf;

use crate::{
    Config, KindSettings, KindTable, ScoringSettings, SectionWeights, Settings, VectorSettings,
    parse::{
        RawConfig, RawKindSettings, RawScoringSettings, RawSectionWeights, RawSettings,
        RawVectorSettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Kind stopwords: unioned across all files, lowest precedence first
/// - Kind clusters: merged by name, first definition for each name wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Reverse order (lowest precedence first) so later writes win.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref settings) = raw.settings {
            apply_raw_settings(&mut config.settings, settings);
        }
        if let Some(ref vector) = raw.vector {
            apply_raw_vector(&mut config.vector, vector);
        }
        if let Some(ref scoring) = raw.scoring {
            apply_raw_scoring(&mut config.scoring, scoring);
        }
        if let Some(ref kinds) = raw.kind {
            apply_raw_kind_table(&mut config.kinds, kinds);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);

    config
}

/// Applies raw general settings.
fn apply_raw_settings(result: &mut Settings, raw: &RawSettings) {
    if let Some(v) = raw.top_n {
        result.top_n = v;
    }
}

/// Applies raw vectorization settings.
fn apply_raw_vector(result: &mut VectorSettings, raw: &RawVectorSettings) {
    if let Some(v) = raw.ngram_min {
        result.ngram_min = v;
    }
    if let Some(v) = raw.ngram_max {
        result.ngram_max = v;
    }
    if let Some(v) = raw.min_df {
        result.min_df = v;
    }
    if let Some(v) = raw.max_features {
        result.max_features = v;
    }
    if let Some(v) = raw.sublinear_tf {
        result.sublinear_tf = v;
    }
}

/// Applies raw enhancement-layer settings.
fn apply_raw_scoring(result: &mut ScoringSettings, raw: &RawScoringSettings) {
    let fields = [
        (&mut result.cluster_increment, raw.cluster_increment),
        (&mut result.recency_max_boost, raw.recency_max_boost),
        (&mut result.recency_decay, raw.recency_decay),
        (&mut result.deadline_max_boost, raw.deadline_max_boost),
        (&mut result.deadline_decay_days, raw.deadline_decay_days),
        (&mut result.gap_term_weight, raw.gap_term_weight),
        (&mut result.cluster_term_weight, raw.cluster_term_weight),
    ];
    for (slot, value) in fields {
        if let Some(v) = value {
            *slot = v;
        }
    }
}

/// Applies each present kind section to its settings.
fn apply_raw_kind_table(result: &mut KindTable, raw: &crate::RawKindTable) {
    if let Some(ref job) = raw.job {
        apply_raw_kind(&mut result.job, job);
    }
    if let Some(ref training) = raw.training {
        apply_raw_kind(&mut result.training, training);
    }
    if let Some(ref scholarship) = raw.scholarship {
        apply_raw_kind(&mut result.scholarship, scholarship);
    }
}

/// Applies one raw kind section.
fn apply_raw_kind(result: &mut KindSettings, raw: &RawKindSettings) {
    if let Some(v) = raw.boost_cap {
        result.boost_cap = v;
    }
    if let Some(v) = raw.gap_mode {
        result.gap_mode = v;
    }
    if let Some(v) = raw.gap_scale {
        result.gap_scale = v;
    }
    if let Some(v) = raw.deadline_boost {
        result.deadline_boost = v;
    }
    if let Some(v) = raw.training_recency {
        result.training_recency = v;
    }
    if let Some(ref weights) = raw.section_weights {
        apply_raw_weights(&mut result.section_weights, weights);
    }
    if let Some(ref words) = raw.stopwords {
        for word in words {
            let word = word.trim().to_lowercase();
            if !word.is_empty() && !result.stopwords.contains(&word) {
                result.stopwords.push(word);
            }
        }
    }
    if let Some(ref clusters) = raw.clusters {
        for (name, terms) in clusters {
            result.clusters.insert(name.clone(), terms.clone());
        }
    }
}

/// Applies raw section weight overrides.
fn apply_raw_weights(result: &mut SectionWeights, raw: &RawSectionWeights) {
    let fields = [
        (&mut result.education, raw.education),
        (&mut result.skills, raw.skills),
        (&mut result.work_experience, raw.work_experience),
        (&mut result.training, raw.training),
        (&mut result.certifications, raw.certifications),
    ];
    for (slot, value) in fields {
        if let Some(v) = value {
            *slot = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{GapMode, parse::parse_config_str};

    /// Parses `content` as if it lived at `path`.
    fn parsed(path: &str, content: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(content, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let result = merge_configs(&[]);
        assert_eq!(result.settings.top_n, 10);
        assert!(result.config_root.is_none());
    }

    #[test]
    fn test_merge_single_config() {
        let result = merge_configs(&[parsed(
            "/work/project/.fitr.toml",
            r#"
[settings]
top_n = 3

[vector]
min_df = 1
"#,
        )]);

        assert_eq!(result.settings.top_n, 3);
        assert_eq!(result.vector.min_df, 1);
        // Untouched values keep their defaults.
        assert_eq!(result.vector.ngram_max, 3);
        assert_eq!(result.config_root, Some(PathBuf::from("/work/project")));
    }

    #[test]
    fn test_merge_scalar_override() {
        let high_prec = parsed(
            "/work/project/.fitr.toml",
            r#"
[scoring]
recency_decay = 0.1
"#,
        );
        let low_prec = parsed(
            "/work/.fitr.toml",
            r#"
[scoring]
recency_decay = 0.5
deadline_decay_days = 14.0
"#,
        );

        let result = merge_configs(&[high_prec, low_prec]);

        assert!((result.scoring.recency_decay - 0.1).abs() < f64::EPSILON);
        assert!((result.scoring.deadline_decay_days - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_merge_kind_overrides_only_named_kind() {
        let result = merge_configs(&[parsed(
            "/work/.fitr.toml",
            r#"
[kind.job]
gap_mode = "opportunity"
gap_scale = 1.0

[kind.job.section_weights]
education = 5
"#,
        )]);

        assert_eq!(result.kinds.job.gap_mode, GapMode::Opportunity);
        assert_eq!(result.kinds.job.section_weights.education, 5);
        assert_eq!(result.kinds.job.section_weights.skills, 3);
        assert_eq!(result.kinds.scholarship.gap_mode, GapMode::Penalty);
    }

    #[test]
    fn test_merge_stopwords_union() {
        let high_prec = parsed(
            "/work/project/.fitr.toml",
            r#"
[kind.job]
stopwords = ["Urgent", "immediate"]
"#,
        );
        let low_prec = parsed(
            "/work/.fitr.toml",
            r#"
[kind.job]
stopwords = ["immediate", "hiring"]
"#,
        );

        let result = merge_configs(&[high_prec, low_prec]);

        assert_eq!(
            result.kinds.job.stopwords,
            vec!["immediate", "hiring", "urgent"]
        );
    }

    #[test]
    fn test_merge_clusters_first_wins() {
        let high_prec = parsed(
            "/work/project/.fitr.toml",
            r#"
[kind.training.clusters]
cloud = ["terraform"]
"#,
        );
        let low_prec = parsed(
            "/work/.fitr.toml",
            r#"
[kind.training.clusters]
cloud = ["ansible"]
mobile = ["android", "ios"]
"#,
        );

        let result = merge_configs(&[high_prec, low_prec]);
        let clusters = &result.kinds.training.clusters;

        assert_eq!(clusters["cloud"], vec!["terraform"]);
        assert_eq!(clusters["mobile"], vec!["android", "ios"]);
    }
}
