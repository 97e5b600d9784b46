//! fitr: profile to posting recommendations.
//!
//! fitr ranks job openings, training courses and scholarships against a candidate's
//! structured profile. Postings and profile are compared as TF-IDF vectors over a vocabulary
//! built fresh for every request, then adjusted for domain signals: related skills, recent
//! experience, missing requirements and approaching deadlines.

#![warn(missing_docs)]

pub mod cli;
