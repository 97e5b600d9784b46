//! Profile to posting matching for fitr.
//!
//! This crate ranks job, training and scholarship postings against a candidate profile.
//! It handles:
//! - Lenient reading of profile and posting records
//! - Posting transformation into labeled, normalized sections with unique display keys
//! - Weighted profile feature extraction
//! - TF-IDF vectorization and cosine similarity over a per-request vocabulary
//! - Domain adjustments: semantic clusters, recency, gaps, deadlines
//! - Ranking, tier explanations and the formatted response shape
//!
//! # Example
//!
//! ```
//! use fitr_config::Config;
//! use fitr_engine::{Corpus, Engine, Kind, Profile};
//! use fitr_text::Lexicon;
//! use serde_json::json;
//!
//! let lexicon = Lexicon::load();
//! let engine = Engine::new(&lexicon, &Config::default()).unwrap();
//!
//! let profile = Profile::from_value(json!({"other_skills": ["python", "sql"]})).unwrap();
//! let corpus = Corpus::from_value(json!({"jobs": [
//!     {"id": 1, "title": "Python Developer", "skills": "python, sql"},
//!     {"id": 2, "title": "Java Developer", "skills": "java, sql"}
//! ]}))
//! .unwrap();
//!
//! let response = engine.respond(&profile, corpus.postings(Kind::Job), Kind::Job, 5);
//! assert!(response.is_success());
//! ```

#![warn(missing_docs)]

mod cluster;
mod dates;
pub mod enhance;
mod engine;
mod error;
mod explain;
mod features;
mod kind;
mod rank;
mod rarity;
mod record;
mod response;
mod transform;
mod vector;

pub use cluster::{ClusterSet, builtin_clusters};
pub use dates::{DateField, display_date, parse_date_field};
pub use engine::Engine;
pub use error::EngineError;
pub use explain::{Explanation, Tier};
pub use features::{ProfileFeatures, ProfileSection, WeightedSection};
pub use kind::{Kind, KindProfile};
pub use rank::{Recommendation, ScoreBreakdown, final_score};
pub use rarity::{RarityIndex, RarityProvider, UNKNOWN_RARITY};
pub use record::{Corpus, Education, License, Posting, Profile, Skill, TrainingEntry, WorkEntry};
pub use response::Response;
pub use transform::{
    FlatText, KeyTarget, RawSections, Section, TransformedCorpus, TransformedPosting,
    section_extractor, transform_corpus,
};
pub use vector::{SparseVector, VectorSpace, Vocabulary, smooth_idf, tf_weight};
