//! Configuration file parsing.
//!
//! Parses individual `.fitr.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, GapMode};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Vectorization section.
    pub vector: Option<RawVectorSettings>,
    /// Enhancement-layer section.
    pub scoring: Option<RawScoringSettings>,
    /// Per-kind sections (`[kind.job]`, `[kind.training]`, `[kind.scholarship]`).
    pub kind: Option<RawKindTable>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Default number of recommendations.
    pub top_n: Option<usize>,
}

/// Raw vectorization settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVectorSettings {
    /// Shortest n-gram.
    pub ngram_min: Option<usize>,
    /// Longest n-gram.
    pub ngram_max: Option<usize>,
    /// Minimum document frequency.
    pub min_df: Option<usize>,
    /// Vocabulary size cap.
    #[serde(alias = "max_vocabulary")]
    pub max_features: Option<usize>,
    /// Sublinear term frequency scaling.
    pub sublinear_tf: Option<bool>,
}

/// Raw enhancement-layer settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScoringSettings {
    /// Per-term cluster increment.
    pub cluster_increment: Option<f64>,
    /// Maximum recency boost.
    pub recency_max_boost: Option<f64>,
    /// Yearly recency decay.
    pub recency_decay: Option<f64>,
    /// Maximum deadline boost.
    pub deadline_max_boost: Option<f64>,
    /// Deadline decay constant in days.
    pub deadline_decay_days: Option<f64>,
    /// Rarity weight of a missing term.
    pub gap_term_weight: Option<f64>,
    /// Opportunity weight of a missing cluster term.
    pub cluster_term_weight: Option<f64>,
}

/// Raw per-kind table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawKindTable {
    /// Job settings.
    #[serde(alias = "jobs")]
    pub job: Option<RawKindSettings>,
    /// Training settings.
    #[serde(alias = "trainings")]
    pub training: Option<RawKindSettings>,
    /// Scholarship settings.
    #[serde(alias = "scholarships")]
    pub scholarship: Option<RawKindSettings>,
}

/// Raw settings for one posting kind.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawKindSettings {
    /// Semantic boost cap.
    pub boost_cap: Option<f64>,
    /// Penalty or opportunity.
    pub gap_mode: Option<GapMode>,
    /// Gap scale.
    pub gap_scale: Option<f64>,
    /// Deadline urgency toggle.
    pub deadline_boost: Option<bool>,
    /// Training history in recency toggle.
    pub training_recency: Option<bool>,
    /// Extra stopwords. Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub stopwords: Option<Vec<String>>,
    /// Section weight overrides.
    pub section_weights: Option<RawSectionWeights>,
    /// Extra cluster terms keyed by cluster name.
    pub clusters: Option<HashMap<String, Vec<String>>>,
}

/// Raw section weight overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSectionWeights {
    /// Education weight.
    pub education: Option<u32>,
    /// Skills weight.
    pub skills: Option<u32>,
    /// Work experience weight.
    pub work_experience: Option<u32>,
    /// Training weight.
    pub training: Option<u32>,
    /// Certifications weight.
    pub certifications: Option<u32>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
