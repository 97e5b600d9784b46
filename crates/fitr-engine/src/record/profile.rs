//! Candidate profile records.

use serde_json::Value;

use super::lenient::{self, Fields, kind_of};
use crate::EngineError;

/// A candidate's structured background.
///
/// Every section is optional and may arrive under more than one key; entries found under
/// each key are kept. Sections the matcher does not read are kept as raw JSON so callers can
/// round-trip them.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Name, contact and demographic details. Not used for matching.
    pub personal_information: Value,
    /// Preferred occupations and locations. Not used for matching.
    pub job_preference: Value,
    /// Spoken and written languages. Not used for matching.
    pub language_proficiency: Value,
    /// Schools attended and degrees earned.
    pub educational_background: Vec<Education>,
    /// Courses and seminars attended.
    pub other_training: Vec<TrainingEntry>,
    /// Licenses, eligibilities and certifications.
    pub professional_license: Vec<License>,
    /// Employment history.
    pub work_experience: Vec<WorkEntry>,
    /// Free-form skills.
    pub other_skills: Vec<Skill>,
}

impl Profile {
    /// Reads a profile from a JSON value.
    ///
    /// Only the top-level shape is checked; missing or malformed fields become empty.
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let Some(fields) = value.as_object() else {
            return Err(EngineError::Record(format!(
                "profile must be a JSON object, got {}",
                kind_of(&value)
            )));
        };
        let raw = |key: &str| fields.get(key).cloned().unwrap_or_default();

        Ok(Self {
            personal_information: raw("personal_information"),
            job_preference: raw("job_preference"),
            language_proficiency: raw("language_proficiency"),
            educational_background: lenient::records(
                fields,
                &["educational_background", "education"],
                Education::from_fields,
            ),
            other_training: lenient::records(
                fields,
                &["other_training", "training"],
                TrainingEntry::from_fields,
            ),
            professional_license: lenient::records(
                fields,
                &["professional_license", "certifications"],
                License::from_fields,
            ),
            work_experience: lenient::records(fields, &["work_experience"], WorkEntry::from_fields),
            other_skills: lenient::items(fields, &["other_skills", "skills"])
                .into_iter()
                .map(Skill::from_value)
                .filter(|skill| !skill.name.is_empty())
                .collect(),
        })
    }
}

/// One school or degree.
#[derive(Debug, Clone, Default)]
pub struct Education {
    /// School name.
    pub school: String,
    /// Course, degree or field of study.
    pub course: String,
    /// Education level.
    pub level: String,
    /// Honors and awards.
    pub awards: String,
    /// Graduation or end date.
    pub graduated: String,
}

impl Education {
    /// Reads an entry; each field takes the first non-empty of its keys.
    fn from_fields(fields: &Fields) -> Self {
        let field = |keys: &[&str]| lenient::text(fields, keys);
        Self {
            school: field(&["school", "school_name", "institution"]),
            course: field(&["course", "degree", "field_of_study", "program"]),
            level: field(&["level", "education_level"]),
            awards: field(&["awards", "honors"]),
            graduated: field(&["graduated", "year_graduated", "end_date"]),
        }
    }
}

/// One course or seminar.
#[derive(Debug, Clone, Default)]
pub struct TrainingEntry {
    /// Course title.
    pub course: String,
    /// Training provider.
    pub institution: String,
    /// Skills acquired.
    pub skills_acquired: String,
    /// Certificate received.
    pub certificate: String,
    /// Start date.
    pub start_date: String,
    /// End date.
    pub end_date: String,
}

impl TrainingEntry {
    /// Reads an entry; each field takes the first non-empty of its keys.
    fn from_fields(fields: &Fields) -> Self {
        let field = |keys: &[&str]| lenient::text(fields, keys);
        Self {
            course: field(&["course", "title", "training_name", "name"]),
            institution: field(&["institution", "provider", "training_institution"]),
            skills_acquired: field(&["skills_acquired", "skills"]),
            certificate: field(&["certificate", "certificate_received"]),
            start_date: field(&["start_date"]),
            end_date: field(&["end_date", "date_completed"]),
        }
    }
}

/// One license or certification.
#[derive(Debug, Clone, Default)]
pub struct License {
    /// License or eligibility name.
    pub license: String,
    /// Expiry date.
    pub valid_until: String,
}

impl License {
    /// Reads an entry; each field takes the first non-empty of its keys.
    fn from_fields(fields: &Fields) -> Self {
        let field = |keys: &[&str]| lenient::text(fields, keys);
        Self {
            license: field(&["license", "title", "name", "eligibility", "certification"]),
            valid_until: field(&["valid_until", "expiry_date"]),
        }
    }
}

/// One job in the employment history.
#[derive(Debug, Clone, Default)]
pub struct WorkEntry {
    /// Job title.
    pub position: String,
    /// Employer.
    pub company: String,
    /// Duties performed.
    pub description: String,
    /// Start date.
    pub start_date: String,
    /// End date; blank or "present" for the current job.
    pub end_date: String,
}

impl WorkEntry {
    /// Reads an entry; each field takes the first non-empty of its keys.
    fn from_fields(fields: &Fields) -> Self {
        let field = |keys: &[&str]| lenient::text(fields, keys);
        Self {
            position: field(&["position", "job_title", "title"]),
            company: field(&["company", "company_name", "employer"]),
            description: field(&["description", "responsibilities"]),
            start_date: field(&["start_date"]),
            end_date: field(&["end_date"]),
        }
    }
}

/// A skill, given either as a bare string or as an object with a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skill {
    /// Skill name.
    pub name: String,
}

impl Skill {
    /// Reads a skill from a string, a scalar, or an object naming the skill.
    fn from_value(value: &Value) -> Self {
        let name = match value {
            Value::Object(fields) => lenient::text(fields, &["skill", "name", "skill_name"]),
            other => lenient::value_text(other),
        };
        Self { name }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_full_profile() {
        let profile = Profile::from_value(json!({
            "personal_information": {"first_name": "Ana"},
            "educational_background": [{"school_name": "UP", "course": "Computer Science"}],
            "other_training": [{"title": "Docker Basics", "provider": "TESDA"}],
            "professional_license": [{"eligibility": "Civil Service Professional"}],
            "work_experience": [{"job_title": "Developer", "company_name": "Acme",
                                 "start_date": "2020-01-01", "end_date": "present"}],
            "other_skills": ["python", {"skill": "sql"}]
        }))
        .unwrap();

        assert_eq!(profile.educational_background[0].course, "Computer Science");
        assert_eq!(profile.other_training[0].institution, "TESDA");
        assert_eq!(profile.professional_license[0].license, "Civil Service Professional");
        assert_eq!(profile.work_experience[0].position, "Developer");
        assert_eq!(profile.work_experience[0].end_date, "present");
        let skills: Vec<_> = profile.other_skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skills, vec!["python", "sql"]);
        assert_eq!(profile.personal_information["first_name"], "Ana");
    }

    #[test]
    fn tolerates_odd_shapes() {
        let profile = Profile::from_value(json!({
            "work_experience": {"position": "Cook", "end_date": 2019},
            "other_skills": "baking",
            "educational_background": null,
            "unknown_section": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(profile.work_experience.len(), 1);
        assert_eq!(profile.work_experience[0].end_date, "2019");
        assert_eq!(profile.other_skills[0].name, "baking");
        assert!(profile.educational_background.is_empty());
    }

    #[test]
    fn empty_object_is_empty_profile() {
        let profile = Profile::from_value(json!({})).unwrap();
        assert!(profile.work_experience.is_empty());
        assert!(profile.other_skills.is_empty());
    }

    #[test]
    fn entries_with_aliased_keys_keep_the_primary_value() {
        let profile = Profile::from_value(json!({
            "work_experience": [{"position": "Staff Nurse", "job_title": "Nurse II",
                                 "end_date": "present"}],
            "educational_background": [{"course": "Nursing", "degree": "BSN"}],
            "other_training": [{"title": "", "name": "Wound Care"}]
        }))
        .unwrap();

        assert_eq!(profile.work_experience.len(), 1);
        assert_eq!(profile.work_experience[0].position, "Staff Nurse");
        assert_eq!(profile.educational_background.len(), 1);
        assert_eq!(profile.educational_background[0].course, "Nursing");
        assert_eq!(profile.other_training[0].course, "Wound Care");
    }

    #[test]
    fn sections_under_both_keys_are_merged() {
        let profile = Profile::from_value(json!({
            "other_skills": ["python"],
            "skills": "sql",
            "educational_background": {"course": "Nursing"},
            "education": [{"course": "Midwifery"}]
        }))
        .unwrap();

        let skills: Vec<_> = profile.other_skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skills, vec!["python", "sql"]);
        let courses: Vec<_> = profile
            .educational_background
            .iter()
            .map(|e| e.course.as_str())
            .collect();
        assert_eq!(courses, vec!["Nursing", "Midwifery"]);
    }

    #[test]
    fn rejects_non_object() {
        let err = Profile::from_value(json!(["python"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
