//! Posting transformation.
//!
//! Each posting is broken into labeled sections in a fixed canonical order, normalized, and
//! flattened into one text. The flat text remembers where every section lives so later
//! stages can pull a single section back out.

use std::{
    collections::{BTreeMap, HashSet},
    fmt, iter,
    ops::Range,
    sync::LazyLock,
};

use fitr_text::{Normalizer, TermCounts};
use regex::Regex;
use serde::Serialize;

use crate::{Kind, Posting, dates::display_date, record::lenient::join_nonempty};

/// Free-text sentences that state requirements.
static REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(require|must have|eligib|qualif|knowledge of|experience (in|with)|proficien)",
    )
    .expect("requirement pattern should compile")
});

/// Sentence boundaries within a description.
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?;\n]+").expect("sentence pattern should compile")
});

/// A posting section, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The listing title. Never stopword-filtered.
    Title,
    /// The free-text description.
    Description,
    /// Labeled scalar attributes.
    Details,
    /// Requirement sentences and explicit requirements.
    Requirements,
    /// Listed skills.
    Skills,
    /// Work or training location.
    Location,
    /// Employer, provider or sponsor block.
    Sponsor,
    /// Start, end and expiration dates.
    Dates,
}

impl Section {
    /// Returns the section's marker name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Details => "details",
            Self::Requirements => "requirements",
            Self::Skills => "skills",
            Self::Location => "location",
            Self::Sponsor => "sponsor",
            Self::Dates => "dates",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw section texts produced by a kind's extractor.
pub type RawSections = Vec<(Section, String)>;

/// Normalized, flattened posting text with typed section spans.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatText {
    /// Normalized tokens of all sections joined by single spaces.
    text: String,
    /// Byte span of each non-empty section within `text`, in canonical order.
    spans: Vec<(Section, Range<usize>)>,
}

impl FlatText {
    /// Flattens normalized sections. Sections are sorted into canonical order and empty
    /// sections are omitted.
    pub fn from_sections(mut sections: Vec<(Section, Vec<String>)>) -> Self {
        sections.sort_by_key(|(section, _)| *section);
        let mut flat = Self::default();
        for (section, tokens) in sections {
            if tokens.is_empty() {
                continue;
            }
            if !flat.text.is_empty() {
                flat.text.push(' ');
            }
            let start = flat.text.len();
            flat.text.push_str(&tokens.join(" "));
            flat.spans.push((section, start..flat.text.len()));
        }
        flat
    }

    /// Returns the full flattened text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text of one section, or the empty string.
    pub fn section(&self, section: Section) -> &str {
        self.spans
            .iter()
            .find(|(s, _)| *s == section)
            .map_or("", |(_, span)| &self.text[span.clone()])
    }

    /// Returns the tokens of one section.
    pub fn section_tokens(&self, section: Section) -> impl Iterator<Item = &str> {
        self.section(section).split_whitespace()
    }

    /// Iterates over the present sections and their text, in canonical order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> {
        self.spans
            .iter()
            .map(|(section, span)| (*section, &self.text[span.clone()]))
    }

    /// Iterates over the distinct unigrams of the whole text.
    pub fn unigrams(&self) -> HashSet<&str> {
        self.text.split_whitespace().collect()
    }

    /// Counts n-grams section by section, so no n-gram crosses a section boundary.
    pub fn term_counts(&self, ngram_min: usize, ngram_max: usize) -> TermCounts {
        let mut counts = TermCounts::new();
        for (_, text) in self.sections() {
            let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
            counts.add_ngrams(&tokens, ngram_min, ngram_max, 1.0);
        }
        counts
    }

    /// Renders the text with a visible `[section]` marker before each section.
    pub fn marked(&self) -> String {
        self.sections()
            .map(|(section, text)| format!("[{section}] {text}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One posting after transformation.
#[derive(Debug, Clone, Serialize)]
pub struct TransformedPosting {
    /// Position in the input list.
    pub index: usize,
    /// Posting identifier: the record's id, or its input position.
    pub id: String,
    /// Display key, unique within the corpus.
    pub key: String,
    /// Normalized sections.
    pub flat: FlatText,
}

/// Where a display key points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTarget {
    /// Position in the input list.
    pub index: usize,
    /// Posting identifier.
    pub id: String,
}

/// A transformed corpus and its display-key map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformedCorpus {
    /// Postings in input order.
    pub postings: Vec<TransformedPosting>,
    /// Display key to the posting it names.
    pub keys: BTreeMap<String, KeyTarget>,
}

impl TransformedCorpus {
    /// Resolves a display key to its posting.
    pub fn resolve(&self, key: &str) -> Option<&KeyTarget> {
        self.keys.get(key)
    }

    /// Returns the number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if there are no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Transforms every posting with a kind's section extractor.
///
/// Titles are tokenized with stopwords kept; every other section is fully normalized.
/// Duplicate titles get a creation-date suffix, then a ` #n` counter if still taken.
pub fn transform_corpus<F>(
    postings: &[Posting],
    normalizer: &Normalizer<'_>,
    extract: F,
) -> TransformedCorpus
where
    F: Fn(&Posting) -> RawSections,
{
    let mut corpus = TransformedCorpus::default();
    for (index, posting) in postings.iter().enumerate() {
        let sections = extract(posting)
            .into_iter()
            .map(|(section, text)| {
                let tokens = match section {
                    Section::Title => normalizer.tokens_keep_stopwords(&text),
                    _ => normalizer.tokens(&text),
                };
                (section, tokens)
            })
            .collect();
        let id = if posting.id.is_empty() {
            index.to_string()
        } else {
            posting.id.clone()
        };
        let key = unique_key(posting, &corpus.keys);
        corpus.keys.insert(
            key.clone(),
            KeyTarget {
                index,
                id: id.clone(),
            },
        );
        corpus.postings.push(TransformedPosting {
            index,
            id,
            key,
            flat: FlatText::from_sections(sections),
        });
    }
    corpus
}

/// Picks a display key for a posting that is not already taken.
fn unique_key(posting: &Posting, taken: &BTreeMap<String, KeyTarget>) -> String {
    let title = match posting.title.trim() {
        "" => "Untitled",
        t => t,
    };
    if !taken.contains_key(title) {
        return title.to_string();
    }
    let created = display_date(&posting.created_at);
    let base = if created.is_empty() {
        title.to_string()
    } else {
        format!("{title} ({created})")
    };
    if !taken.contains_key(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{base} #{n}"))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or(base)
}

/// Returns the section extractor for a kind.
pub fn section_extractor(kind: Kind) -> fn(&Posting) -> RawSections {
    match kind {
        Kind::Job => job_sections,
        Kind::Training => training_sections,
        Kind::Scholarship => scholarship_sections,
    }
}

/// Sections of a job posting.
fn job_sections(p: &Posting) -> RawSections {
    let mut sections = common_sections(p);
    sections.push((
        Section::Details,
        labeled(&[
            ("type", &p.posting_type),
            ("level", &p.level),
            ("salary", &salary(p)),
            ("vacancies", &p.vacancies),
            ("status", &p.status),
        ]),
    ));
    sections.push((Section::Location, p.location.clone()));
    sections.push((Section::Sponsor, p.employer.clone()));
    sections.push((Section::Dates, dates(p)));
    sections
}

/// Sections of a training posting.
fn training_sections(p: &Posting) -> RawSections {
    let mut sections = common_sections(p);
    sections.push((
        Section::Details,
        labeled(&[
            ("type", &p.posting_type),
            ("level", &p.level),
            ("duration", &p.duration),
            ("slots", &p.vacancies),
            ("status", &p.status),
        ]),
    ));
    sections.push((Section::Location, p.location.clone()));
    sections.push((Section::Sponsor, p.provider.clone()));
    sections.push((Section::Dates, dates(p)));
    sections
}

/// Sections of a scholarship posting.
fn scholarship_sections(p: &Posting) -> RawSections {
    let mut sections = common_sections(p);
    sections.push((
        Section::Details,
        labeled(&[
            ("type", &p.scholarship_type),
            ("level", &p.level),
            ("duration", &p.duration),
            ("slots", &p.vacancies),
            ("status", &p.status),
        ]),
    ));
    sections.push((Section::Sponsor, p.sponsor.clone()));
    sections.push((Section::Dates, dates(p)));
    sections
}

/// Sections every kind has: title, description, requirements and skills.
fn common_sections(p: &Posting) -> RawSections {
    vec![
        (Section::Title, p.title.clone()),
        (Section::Description, p.description.clone()),
        (Section::Requirements, requirements(p)),
        (Section::Skills, p.skills.clone()),
    ]
}

/// Collects the explicit requirements and the description's requirement sentences.
fn requirements(p: &Posting) -> String {
    let sentences = SENTENCE
        .split(&p.description)
        .map(str::trim)
        .filter(|s| REQUIREMENT.is_match(s))
        .map(str::to_string);
    join_nonempty(iter::once(p.requirements.clone()).chain(sentences), ". ")
}

/// Renders the salary range, preferring the written range.
fn salary(p: &Posting) -> String {
    if !p.salary_range.is_empty() {
        return p.salary_range.clone();
    }
    join_nonempty([p.salary_min.clone(), p.salary_max.clone()], " - ")
}

/// Renders the date lines.
fn dates(p: &Posting) -> String {
    labeled(&[
        ("start", &p.start_date),
        ("end", &p.end_date),
        ("expires", &p.expiration_date),
    ])
}

/// Renders `label: value` lines for the non-empty values.
fn labeled(pairs: &[(&str, &String)]) -> String {
    join_nonempty(
        pairs
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| format!("{label}: {value}")),
        "\n",
    )
}

#[cfg(test)]
mod tests {
    use fitr_text::{Lexicon, Stopwords};
    use serde_json::json;

    use super::*;

    fn posting(value: serde_json::Value) -> Posting {
        Posting::from_value(value)
    }

    fn transform(kind: Kind, postings: &[Posting]) -> TransformedCorpus {
        let lexicon = Lexicon::load();
        let normalizer = Normalizer::new(&lexicon, Stopwords::from_words(kind.domain_stopwords()));
        transform_corpus(postings, &normalizer, section_extractor(kind))
    }

    #[test]
    fn sections_in_canonical_order() {
        let corpus = transform(
            Kind::Job,
            &[posting(json!({
                "title": "Data Analyst",
                "description": "Analyze sales dashboards. Must have SQL skills.",
                "skills": "sql, tableau",
                "level": "Senior",
                "location": "Cebu",
                "employer": "Acme",
                "expiration_date": "2026-12-01"
            }))],
        );
        let flat = &corpus.postings[0].flat;
        let order: Vec<_> = flat.sections().map(|(s, _)| s).collect();

        assert_eq!(order[0], Section::Title);
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        for section in [
            Section::Description,
            Section::Details,
            Section::Requirements,
            Section::Skills,
            Section::Location,
            Section::Sponsor,
        ] {
            assert!(order.contains(&section), "missing {section}");
        }
        assert!(flat.section(Section::Details).contains("senior"));
        assert_eq!(flat.section(Section::Title), "data analyst");
        assert_eq!(flat.section(Section::Skills), "sql tableau");
        assert!(flat.section(Section::Requirements).contains("sql"));
        assert!(!flat.section(Section::Requirements).contains("dashboard"));
    }

    #[test]
    fn title_keeps_stopwords() {
        let corpus = transform(
            Kind::Job,
            &[posting(json!({"title": "Chef of the Bakery", "description": "Chef of the bakery"}))],
        );
        let flat = &corpus.postings[0].flat;
        assert_eq!(flat.section(Section::Title), "chef of the bakeri");
        assert_eq!(flat.section(Section::Description), "chef bakeri");
    }

    #[test]
    fn explicit_requirements_lead() {
        let corpus = transform(
            Kind::Scholarship,
            &[posting(json!({
                "title": "Nursing Grant",
                "qualifications": "Nursing enrollee",
                "description": "Open to residents. Applicants must be eligible for licensure."
            }))],
        );
        let requirements = corpus.postings[0].flat.section(Section::Requirements);
        assert!(requirements.starts_with("nurs"));
        assert!(requirements.contains("licensur"));
        assert!(!requirements.contains("resid"));
    }

    #[test]
    fn scholarship_has_sponsor_not_location() {
        let corpus = transform(
            Kind::Scholarship,
            &[posting(json!({"title": "Merit", "sponsor": "Rotary Foundation", "location": "Manila"}))],
        );
        let flat = &corpus.postings[0].flat;
        assert_eq!(flat.section(Section::Location), "");
        assert_eq!(flat.section(Section::Sponsor), "rotari foundat");
    }

    #[test]
    fn spans_relocate_sections() {
        let flat = FlatText::from_sections(vec![
            (Section::Skills, vec!["sql".into(), "python".into()]),
            (Section::Title, vec!["analyst".into()]),
            (Section::Details, vec![]),
        ]);
        assert_eq!(flat.text(), "analyst sql python");
        assert_eq!(flat.section(Section::Skills), "sql python");
        assert_eq!(flat.section(Section::Details), "");
        assert_eq!(flat.marked(), "[title] analyst\n[skills] sql python");
    }

    #[test]
    fn ngrams_stay_within_sections() {
        let flat = FlatText::from_sections(vec![
            (Section::Title, vec!["analyst".into()]),
            (Section::Skills, vec!["sql".into(), "python".into()]),
        ]);
        let counts = flat.term_counts(1, 2);
        assert!(counts.contains("sql python"));
        assert!(!counts.contains("analyst sql"));
    }

    #[test]
    fn duplicate_titles_are_disambiguated() {
        let corpus = transform(
            Kind::Job,
            &[
                posting(json!({"id": "a", "title": "Cook", "created_at": "2024-01-02T10:00:00Z"})),
                posting(json!({"id": "b", "title": "Cook", "created_at": "2024-03-04T10:00:00Z"})),
                posting(json!({"id": "c", "title": "Cook", "created_at": "2024-03-04"})),
                posting(json!({"title": "Cook"})),
            ],
        );
        let keys: Vec<_> = corpus.postings.iter().map(|p| p.key.as_str()).collect();

        assert_eq!(
            keys,
            vec!["Cook", "Cook (2024-03-04)", "Cook (2024-03-04) #2", "Cook #2"]
        );
        assert_eq!(corpus.keys.len(), 4);
        assert_eq!(corpus.resolve("Cook (2024-03-04)").unwrap().id, "b");
        assert_eq!(corpus.resolve("Cook #2").unwrap().id, "3");
        assert_eq!(corpus.resolve("Cook #2").unwrap().index, 3);
    }

    #[test]
    fn empty_title_gets_placeholder_key() {
        let corpus = transform(Kind::Training, &[posting(json!({"description": "docker"}))]);
        assert_eq!(corpus.postings[0].key, "Untitled");
        assert_eq!(corpus.postings[0].flat.section(Section::Title), "");
    }
}
