//! Configuration system for fitr.
//!
//! fitr uses TOML configuration files named `.fitr.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.fitr.toml` files
//! found, then loading `~/.fitr.toml` as the global config with lowest precedence.
//!
//! Every value has a built-in default matching the engine's reference behaviour, so an empty
//! configuration is always valid.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawKindSettings, RawKindTable, RawScoringSettings, RawSectionWeights, RawSettings,
    RawVectorSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for fitr.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.fitr.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Vocabulary and vectorization settings.
    pub vector: VectorSettings,
    /// Enhancement-layer constants shared by all posting kinds.
    pub scoring: ScoringSettings,
    /// Per-kind strategy settings.
    pub kinds: KindTable,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.fitr.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.fitr.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.fitr.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - An inverted or zero-based n-gram range
    /// - Zero document-frequency or vocabulary limits
    /// - Boost caps below 1.0 and negative gap scales
    /// - Kinds whose section weights are all zero
    /// - Extra clusters without any terms
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// This outputs the merged configuration in the same format as a `.fitr.toml` file,
    /// making it easy to see the effective configuration.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            settings: &self.settings,
            vector: &self.vector,
            scoring: &self.scoring,
            kind: &self.kinds,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// General settings for fitr.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Number of recommendations returned when the caller does not ask for a count.
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// Vocabulary construction and term weighting settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VectorSettings {
    /// Shortest n-gram added to the vocabulary.
    pub ngram_min: usize,
    /// Longest n-gram added to the vocabulary.
    pub ngram_max: usize,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Vocabulary size cap; the most frequent terms are kept.
    pub max_features: usize,
    /// Use `1 + ln(tf)` instead of the raw term frequency.
    pub sublinear_tf: bool,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 3,
            min_df: 2,
            max_features: 5000,
            sublinear_tf: true,
        }
    }
}

/// Constants used by the enhancement layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Increment added per matching term that belongs to a semantic cluster.
    pub cluster_increment: f64,
    /// Recency boost for an experience that ends today.
    pub recency_max_boost: f64,
    /// Yearly exponential decay rate of the recency boost.
    pub recency_decay: f64,
    /// Deadline boost for a posting that expires today.
    pub deadline_max_boost: f64,
    /// Decay constant, in days, of the deadline boost.
    pub deadline_decay_days: f64,
    /// Weight applied to a missing term's rarity before scaling.
    pub gap_term_weight: f64,
    /// Opportunity weight of a missing term that belongs to a cluster.
    pub cluster_term_weight: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            cluster_increment: 0.2,
            recency_max_boost: 1.5,
            recency_decay: 0.05,
            deadline_max_boost: 1.5,
            deadline_decay_days: 30.0,
            gap_term_weight: 0.1,
            cluster_term_weight: 1.2,
        }
    }
}

/// How terms a posting asks for but the profile lacks affect the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapMode {
    /// Missing terms reduce the score in proportion to the base score.
    Penalty,
    /// Missing terms are learning opportunities and add to the score.
    Opportunity,
}

impl fmt::Display for GapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Penalty => write!(f, "penalty"),
            Self::Opportunity => write!(f, "opportunity"),
        }
    }
}

/// Term-frequency multipliers applied to each profile section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SectionWeights {
    /// Educational background.
    pub education: u32,
    /// Listed skills.
    pub skills: u32,
    /// Work history.
    pub work_experience: u32,
    /// Training history.
    pub training: u32,
    /// Licenses and certifications.
    pub certifications: u32,
}

impl SectionWeights {
    /// Returns true when every section is weighted zero.
    pub fn all_zero(&self) -> bool {
        self.education == 0
            && self.skills == 0
            && self.work_experience == 0
            && self.training == 0
            && self.certifications == 0
    }
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            education: 1,
            skills: 3,
            work_experience: 2,
            training: 2,
            certifications: 1,
        }
    }
}

/// Strategy settings for one posting kind.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KindSettings {
    /// Upper bound of the semantic cluster boost.
    pub boost_cap: f64,
    /// Whether missing terms are penalized or rewarded.
    pub gap_mode: GapMode,
    /// Scale applied to the gap penalty or opportunity score.
    pub gap_scale: f64,
    /// Whether approaching expiration dates boost the score.
    pub deadline_boost: bool,
    /// Whether training history counts towards the recency boost.
    pub training_recency: bool,
    /// Extra domain stopwords, added to the built-in list.
    pub stopwords: Vec<String>,
    /// Profile section weights used when vectorizing the profile.
    pub section_weights: SectionWeights,
    /// Extra semantic cluster terms keyed by cluster name.
    pub clusters: BTreeMap<String, Vec<String>>,
}

impl KindSettings {
    /// Defaults for job postings.
    pub fn job() -> Self {
        Self {
            boost_cap: 1.5,
            gap_mode: GapMode::Penalty,
            gap_scale: 0.02,
            deadline_boost: false,
            training_recency: false,
            stopwords: Vec::new(),
            section_weights: SectionWeights::default(),
            clusters: BTreeMap::new(),
        }
    }

    /// Defaults for training postings.
    pub fn training() -> Self {
        Self {
            boost_cap: 1.6,
            gap_mode: GapMode::Opportunity,
            gap_scale: 2.0,
            training_recency: true,
            ..Self::job()
        }
    }

    /// Defaults for scholarship postings.
    pub fn scholarship() -> Self {
        Self {
            gap_scale: 0.05,
            deadline_boost: true,
            section_weights: SectionWeights {
                education: 2,
                ..SectionWeights::default()
            },
            ..Self::job()
        }
    }
}

/// Strategy settings for the three supported posting kinds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KindTable {
    /// Job postings.
    pub job: KindSettings,
    /// Training postings.
    pub training: KindSettings,
    /// Scholarship postings.
    pub scholarship: KindSettings,
}

impl KindTable {
    /// Iterates over `(kind name, settings)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &KindSettings)> {
        [
            ("job", &self.job),
            ("training", &self.training),
            ("scholarship", &self.scholarship),
        ]
        .into_iter()
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            job: KindSettings::job(),
            training: KindSettings::training(),
            scholarship: KindSettings::scholarship(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// General settings.
    settings: &'a Settings,
    /// Vectorization settings.
    vector: &'a VectorSettings,
    /// Enhancement-layer settings.
    scoring: &'a ScoringSettings,
    /// Per-kind settings.
    kind: &'a KindTable,
}
