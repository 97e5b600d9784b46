//! Error types for the fitr-engine crate.

use thiserror::Error;

/// Errors that can occur while producing recommendations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No term reached the minimum document frequency, so nothing can be compared.
    #[error("vectorization failed: no term appears in at least {min_df} of {documents} documents")]
    EmptyVocabulary {
        /// Number of documents, including the profile.
        documents: usize,
        /// Configured minimum document frequency.
        min_df: usize,
    },

    /// The configured settings cannot drive the engine.
    #[error("invalid engine settings: {0}")]
    InvalidSettings(String),

    /// An input record does not have the expected top-level shape.
    #[error("invalid record: {0}")]
    Record(String),

    /// A posting kind name was not recognized.
    #[error("unknown posting kind '{0}' (expected job, training or scholarship)")]
    UnknownKind(String),
}
