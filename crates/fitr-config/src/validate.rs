//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that would make the
//! engine degenerate without being outright invalid.

use std::fmt;

use crate::{Config, KindSettings};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The n-gram range is inverted.
    NgramRangeInverted {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The n-gram minimum is zero.
    NgramMinZero,
    /// The minimum document frequency is zero, so every term is kept.
    MinDocFreqZero,
    /// The vocabulary cap is zero, so every request fails to vectorize.
    MaxFeaturesZero,
    /// The default recommendation count is zero.
    TopNZero,
    /// A kind's boost cap is below 1.0, turning the boost into a penalty.
    BoostCapBelowOne {
        /// Kind name.
        kind: String,
        /// Configured cap.
        cap: f64,
    },
    /// A kind's gap scale is negative.
    NegativeGapScale {
        /// Kind name.
        kind: String,
        /// Configured scale.
        scale: f64,
    },
    /// Every profile section of a kind is weighted zero.
    SectionWeightsAllZero {
        /// Kind name.
        kind: String,
    },
    /// An extra cluster lists no terms.
    EmptyCluster {
        /// Kind name.
        kind: String,
        /// Cluster name.
        cluster: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NgramRangeInverted { min, max } => {
                write!(f, "n-gram range is inverted: min {min} > max {max}")
            }
            Self::NgramMinZero => write!(f, "ngram_min is 0; it will be treated as 1"),
            Self::MinDocFreqZero => write!(f, "min_df is 0; every term will be kept"),
            Self::MaxFeaturesZero => {
                write!(f, "max_features is 0; no vocabulary can be built")
            }
            Self::TopNZero => write!(f, "top_n is 0; no recommendations will be returned"),
            Self::BoostCapBelowOne { kind, cap } => {
                write!(f, "kind '{kind}' boost_cap {cap} is below 1.0")
            }
            Self::NegativeGapScale { kind, scale } => {
                write!(f, "kind '{kind}' gap_scale {scale} is negative")
            }
            Self::SectionWeightsAllZero { kind } => {
                write!(f, "kind '{kind}' weights every profile section zero")
            }
            Self::EmptyCluster { kind, cluster } => {
                write!(f, "kind '{kind}' cluster '{cluster}' has no terms")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let vector = &config.vector;
    if vector.ngram_min == 0 {
        warnings.push(ConfigWarning::NgramMinZero);
    }
    if vector.ngram_min > vector.ngram_max {
        warnings.push(ConfigWarning::NgramRangeInverted {
            min: vector.ngram_min,
            max: vector.ngram_max,
        });
    }
    if vector.min_df == 0 {
        warnings.push(ConfigWarning::MinDocFreqZero);
    }
    if vector.max_features == 0 {
        warnings.push(ConfigWarning::MaxFeaturesZero);
    }
    if config.settings.top_n == 0 {
        warnings.push(ConfigWarning::TopNZero);
    }

    for (name, kind) in config.kinds.iter() {
        warnings.extend(validate_kind(name, kind));
    }

    warnings
}

/// Validates the settings of a single kind.
fn validate_kind(name: &str, kind: &KindSettings) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if kind.boost_cap < 1.0 {
        warnings.push(ConfigWarning::BoostCapBelowOne {
            kind: name.to_string(),
            cap: kind.boost_cap,
        });
    }
    if kind.gap_scale < 0.0 {
        warnings.push(ConfigWarning::NegativeGapScale {
            kind: name.to_string(),
            scale: kind.gap_scale,
        });
    }
    if kind.section_weights.all_zero() {
        warnings.push(ConfigWarning::SectionWeightsAllZero {
            kind: name.to_string(),
        });
    }
    for (cluster, terms) in &kind.clusters {
        if terms.iter().all(|t| t.trim().is_empty()) {
            warnings.push(ConfigWarning::EmptyCluster {
                kind: name.to_string(),
                cluster: cluster.clone(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionWeights;

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_vector_warnings() {
        let mut config = Config::default();
        config.vector.ngram_min = 4;
        config.vector.min_df = 0;
        config.vector.max_features = 0;

        let warnings = validate_config(&config);

        assert!(warnings.contains(&ConfigWarning::NgramRangeInverted { min: 4, max: 3 }));
        assert!(warnings.contains(&ConfigWarning::MinDocFreqZero));
        assert!(warnings.contains(&ConfigWarning::MaxFeaturesZero));
        assert!(!warnings.contains(&ConfigWarning::NgramMinZero));
    }

    #[test]
    fn test_top_n_zero() {
        let mut config = Config::default();
        config.settings.top_n = 0;

        assert_eq!(validate_config(&config), vec![ConfigWarning::TopNZero]);
    }

    #[test]
    fn test_kind_warnings_name_the_kind() {
        let mut config = Config::default();
        config.kinds.training.boost_cap = 0.5;
        config.kinds.scholarship.gap_scale = -1.0;
        config.kinds.job.section_weights = SectionWeights {
            education: 0,
            skills: 0,
            work_experience: 0,
            training: 0,
            certifications: 0,
        };

        let warnings = validate_config(&config);

        assert_eq!(warnings.len(), 3);
        assert!(warnings.contains(&ConfigWarning::SectionWeightsAllZero {
            kind: "job".to_string()
        }));
        assert!(warnings.contains(&ConfigWarning::BoostCapBelowOne {
            kind: "training".to_string(),
            cap: 0.5
        }));
        assert!(warnings.contains(&ConfigWarning::NegativeGapScale {
            kind: "scholarship".to_string(),
            scale: -1.0
        }));
    }

    #[test]
    fn test_empty_cluster() {
        let mut config = Config::default();
        config
            .kinds
            .job
            .clusters
            .insert("blank".to_string(), vec![" ".to_string()]);

        let warnings = validate_config(&config);

        assert_eq!(
            warnings,
            vec![ConfigWarning::EmptyCluster {
                kind: "job".to_string(),
                cluster: "blank".to_string()
            }]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::BoostCapBelowOne {
            kind: "job".to_string(),
            cap: 0.8,
        };
        assert_eq!(warning.to_string(), "kind 'job' boost_cap 0.8 is below 1.0");

        let warning = ConfigWarning::NgramRangeInverted { min: 3, max: 1 };
        assert_eq!(warning.to_string(), "n-gram range is inverted: min 3 > max 1");
    }
}
