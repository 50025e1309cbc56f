//! Deterministic fallback extraction: fixed vocabulary membership checks plus
//! a handful of regexes. Always available, never fails; a signal that is not
//! found simply yields an empty or absent field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::{CandidateProfile, EducationEntry};

/// Common tech skills, canonical spellings.
const SKILL_VOCAB: &[&str] = &[
    "JavaScript",
    "React",
    "Node.js",
    "TypeScript",
    "HTML",
    "CSS",
    "Python",
    "Java",
    "C#",
    "C++",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Firebase",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "CI/CD",
    "REST API",
    "GraphQL",
    "Machine Learning",
    "Data Science",
    "Artificial Intelligence",
    "DevOps",
    "Agile",
    "Scrum",
    "Project Management",
];

const TITLE_VOCAB: &[&str] = &[
    "Software Engineer",
    "Developer",
    "Product Manager",
    "Designer",
    "Data Scientist",
    "Project Manager",
    "Director",
    "VP",
    "CTO",
    "CEO",
];

const DEGREE_VOCAB: &[&str] = &[
    "Bachelor's",
    "Master's",
    "PhD",
    "Doctorate",
    "Associate's",
    "BS",
    "BA",
    "MS",
    "MA",
    "MBA",
    "MD",
    "JD",
];

const FIELD_VOCAB: &[&str] = &[
    "Computer Science",
    "Engineering",
    "Business",
    "Marketing",
    "Finance",
    "Economics",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Psychology",
    "Sociology",
    "History",
    "English",
];

static EXPERIENCE_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)experience|work|employment").expect("experience section regex"));
static EDUCATION_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)education|degree|university|college|school").expect("education section regex")
});
static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[\s-]*(?:year|yr)s?").expect("years regex"));

static SKILL_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile_vocab(SKILL_VOCAB));
static TITLE_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile_vocab(TITLE_VOCAB));
static DEGREE_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile_vocab(DEGREE_VOCAB));
static FIELD_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| compile_vocab(FIELD_VOCAB));

fn compile_vocab(vocab: &[&'static str]) -> Vec<(&'static str, Regex)> {
    vocab
        .iter()
        .map(|kw| (*kw, keyword_regex(kw)))
        .collect()
}

/// Case-insensitive whole-keyword regex. `\b` only applies next to word
/// characters, so keywords ending in `#`, `+` or `/` skip the trailing
/// boundary ("C#", "C++").
fn keyword_regex(keyword: &str) -> Regex {
    let escaped = regex::escape(keyword);
    let first_word = keyword.chars().next().is_some_and(|c| c.is_alphanumeric());
    let last_word = keyword.chars().last().is_some_and(|c| c.is_alphanumeric());
    let left = if first_word { r"\b" } else { "" };
    let right = if last_word { r"\b" } else { "" };
    Regex::new(&format!("(?i){left}{escaped}{right}")).expect("vocab keyword regex")
}

fn vocab_hits(compiled: &[(&'static str, Regex)], text: &str) -> Vec<String> {
    compiled
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(kw, _)| (*kw).to_string())
        .collect()
}

/// Everything the deterministic pass can recover from raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackExtraction {
    pub skills: Vec<String>,
    pub has_experience_section: bool,
    /// First `N years`-style mention, if any.
    pub years: Option<u32>,
    pub job_titles: Vec<String>,
    pub has_education_section: bool,
    pub degrees: Vec<String>,
    pub fields: Vec<String>,
}

impl FallbackExtraction {
    /// Profile view of the fallback signals. Dated experience entries cannot
    /// be recovered from regexes, so the entry list stays empty and detected
    /// years are carried separately by the caller.
    pub fn to_profile(&self) -> CandidateProfile {
        let education = self
            .degrees
            .iter()
            .map(|d| EducationEntry::new(d.clone(), ""))
            .collect();
        CandidateProfile::new(self.skills.clone(), Vec::new(), education)
    }
}

/// Run the deterministic extraction over raw resume text.
pub fn extract(text: &str) -> FallbackExtraction {
    let years = YEARS_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    FallbackExtraction {
        skills: vocab_hits(&SKILL_RES, text),
        has_experience_section: EXPERIENCE_SECTION_RE.is_match(text),
        years,
        job_titles: vocab_hits(&TITLE_RES, text),
        has_education_section: EDUCATION_SECTION_RE.is_match(text),
        degrees: vocab_hits(&DEGREE_RES, text),
        fields: vocab_hits(&FIELD_RES, text),
    }
}
