//! Posting records and posting corpora.

use serde_json::Value;

use super::lenient::{self, kind_of};
use crate::{EngineError, Kind};

/// A job, training or scholarship listing.
///
/// One shape covers all three kinds; each kind reads the fields that apply to it. Every field
/// lists the keys it is read from in priority order, and the first non-empty one wins. The
/// record it was read from is kept verbatim in [`Posting::raw`].
#[derive(Debug, Clone, Default)]
pub struct Posting {
    /// Caller-assigned identifier.
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Explicit requirements or qualifications.
    pub requirements: String,
    /// Skills, comma-delimited or as a list.
    pub skills: String,
    /// Employment or training type.
    pub posting_type: String,
    /// Experience or education level.
    pub level: String,
    /// Salary range as written.
    pub salary_range: String,
    /// Lower salary bound.
    pub salary_min: String,
    /// Upper salary bound.
    pub salary_max: String,
    /// Open vacancies or slots.
    pub vacancies: String,
    /// Listing status.
    pub status: String,
    /// Scholarship type.
    pub scholarship_type: String,
    /// Course or grant duration.
    pub duration: String,
    /// Work or training location.
    pub location: String,
    /// Employer block.
    pub employer: String,
    /// Training provider block.
    pub provider: String,
    /// Scholarship sponsor block.
    pub sponsor: String,
    /// Start date.
    pub start_date: String,
    /// End date.
    pub end_date: String,
    /// Application deadline.
    pub expiration_date: String,
    /// Creation timestamp, used to tell apart listings with the same title.
    pub created_at: String,
    /// The record as received.
    pub raw: Value,
}

impl Posting {
    /// Reads a posting from a JSON value, keeping the value as [`Posting::raw`].
    ///
    /// A value that is not an object yields an empty posting.
    pub fn from_value(value: Value) -> Self {
        let Some(map) = value.as_object() else {
            tracing::debug!("posting is {}, treating it as empty", kind_of(&value));
            return Self {
                raw: value,
                ..Self::default()
            };
        };
        let field = |keys: &[&str]| lenient::text(map, keys);

        Self {
            id: field(&["id", "_id", "job_id", "training_id", "scholarship_id"]),
            title: field(&[
                "title",
                "job_title",
                "training_title",
                "scholarship_title",
                "name",
            ]),
            description: field(&["description", "job_description", "details"]),
            requirements: field(&["requirements", "qualifications", "eligibility"]),
            skills: field(&[
                "skills",
                "required_skills",
                "skills_required",
                "skills_covered",
            ]),
            posting_type: field(&["type", "job_type", "employment_type", "training_type"]),
            level: field(&["level", "experience_level", "education_level"]),
            salary_range: field(&["salary_range", "salary"]),
            salary_min: field(&["salary_min"]),
            salary_max: field(&["salary_max"]),
            vacancies: field(&["vacancies", "slots", "vacancy_count", "available_slots"]),
            status: field(&["status"]),
            scholarship_type: field(&["scholarship_type"]),
            duration: field(&["duration"]),
            location: field(&["location", "venue", "address"]),
            employer: field(&["employer", "company", "company_name"]),
            provider: field(&["provider", "training_provider", "institution"]),
            sponsor: field(&["sponsor", "sponsor_name"]),
            start_date: field(&["start_date"]),
            end_date: field(&["end_date"]),
            expiration_date: field(&[
                "expiration_date",
                "deadline",
                "application_deadline",
                "expiry_date",
            ]),
            created_at: field(&["created_at", "date_posted"]),
            raw: value.clone(),
        }
    }
}

/// Postings grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Job postings.
    pub jobs: Vec<Posting>,
    /// Training postings.
    pub trainings: Vec<Posting>,
    /// Scholarship postings.
    pub scholarships: Vec<Posting>,
}

impl Corpus {
    /// Reads a corpus object keyed by kind (`job`/`jobs`, `training`/`trainings`,
    /// `scholarship`/`scholarships`).
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let Some(fields) = value.as_object() else {
            return Err(EngineError::Record(format!(
                "posting corpus must be an object keyed by posting kind, got {}",
                kind_of(&value)
            )));
        };
        let read = |keys: &[&str]| -> Vec<Posting> {
            lenient::items(fields, keys)
                .into_iter()
                .cloned()
                .map(Posting::from_value)
                .collect()
        };
        Ok(Self {
            jobs: read(&["job", "jobs"]),
            trainings: read(&["training", "trainings"]),
            scholarships: read(&["scholarship", "scholarships"]),
        })
    }

    /// Returns the postings of one kind.
    pub fn postings(&self, kind: Kind) -> &[Posting] {
        match kind {
            Kind::Job => &self.jobs,
            Kind::Training => &self.trainings,
            Kind::Scholarship => &self.scholarships,
        }
    }

    /// Returns the total number of postings.
    pub fn len(&self) -> usize {
        self.jobs.len() + self.trainings.len() + self.scholarships.len()
    }

    /// Returns true if the corpus holds no postings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
