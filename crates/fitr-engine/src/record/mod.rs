//! Input records.
//!
//! Records are read leniently: missing or malformed fields become empty values and never
//! fail a request. Only the top-level shape of a profile or corpus is checked.

pub mod lenient;
mod posting;
mod profile;

pub use posting::{Corpus, Posting};
pub use profile::{Education, License, Profile, Skill, TrainingEntry, WorkEntry};
