//! Candidate profile value objects and the fields derived from them.
//!
//! A `CandidateProfile` is built once per analysis run (by the AI extractor or
//! the deterministic fallback) and never mutated afterwards. The two derived
//! quantities the scorers consume live here: total experience years summed
//! over entry date spans, and the highest degree picked via a fixed keyword
//! rank table.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Ranked degree keywords, highest first. Rank 0 (`certificate`) still counts
/// as a recognized credential for `highest_degree`, but no education
/// requirement tier accepts it.
const DEGREE_RANKS: &[(&str, i8)] = &[
    ("phd", 5),
    ("doctorate", 5),
    ("doctor", 5),
    ("master", 4),
    ("mba", 4),
    ("bachelor", 3),
    ("undergraduate", 3),
    ("associate", 2),
    ("diploma", 1),
    ("certificate", 0),
];

/// One employment span. `end_date == "present"` (any case) resolves to the
/// current date when the span is summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl ExperienceEntry {
    pub fn new(
        company: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Whole months covered by this entry as of `now`. Unparsable or inverted
    /// spans contribute zero.
    fn months_at(&self, now: NaiveDate) -> u32 {
        let Some(start) = parse_resume_date(&self.start_date) else {
            return 0;
        };
        let end = if self.end_date.trim().eq_ignore_ascii_case("present") {
            now
        } else {
            match parse_resume_date(&self.end_date) {
                Some(d) => d,
                None => return 0,
            }
        };
        let months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
        months.max(0) as u32
    }
}

/// One education credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
}

impl EducationEntry {
    pub fn new(degree: impl Into<String>, institution: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            institution: institution.into(),
        }
    }
}

/// Structured candidate data extracted from free-text resume content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Deduplicated (case-insensitively, first spelling wins), original order.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl CandidateProfile {
    /// Build a profile, deduplicating skills case-insensitively while keeping
    /// the first spelling and the original order.
    pub fn new(
        skills: Vec<String>,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
    ) -> Self {
        Self {
            skills: dedup_skills(skills),
            experience,
            education,
        }
    }

    /// Completely empty profile; used when the resume text itself is missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total experience in whole years, floored, as of today.
    pub fn total_experience_years(&self) -> u32 {
        self.total_experience_years_at(Utc::now().date_naive())
    }

    /// Same as [`total_experience_years`], with an injected "now" for tests.
    pub fn total_experience_years_at(&self, now: NaiveDate) -> u32 {
        let months: u32 = self.experience.iter().map(|e| e.months_at(now)).sum();
        months / 12
    }

    /// The degree string of the entry containing the highest-ranked keyword.
    /// Ties keep the first entry encountered; no recognized keyword → `None`.
    pub fn highest_degree(&self) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut best_rank: i8 = -1;
        for edu in &self.education {
            let lower = edu.degree.to_lowercase();
            for &(keyword, rank) in DEGREE_RANKS {
                if lower.contains(keyword) && rank > best_rank {
                    best_rank = rank;
                    best = Some(edu.degree.as_str());
                }
            }
        }
        best
    }
}

fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(skills.len());
    let mut out = Vec::with_capacity(skills.len());
    for s in skills {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM`, or bare `YYYY` (mapped to January 1st).
fn parse_resume_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(year) = s.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn skills_dedup_keeps_first_spelling_and_order() {
        let p = CandidateProfile::new(
            vec![
                "React".into(),
                "AWS".into(),
                "react".into(),
                " aws ".into(),
                "Docker".into(),
            ],
            vec![],
            vec![],
        );
        assert_eq!(p.skills, vec!["React", "AWS", "Docker"]);
    }

    #[test]
    fn experience_years_sum_months_and_floor() {
        let p = CandidateProfile::new(
            vec![],
            vec![
                ExperienceEntry::new("Acme", "Dev", "2019-01", "2020-07"), // 18 months
                ExperienceEntry::new("Globex", "Dev", "2021-03", "2022-01"), // 10 months
            ],
            vec![],
        );
        // 28 months -> 2 years
        assert_eq!(p.total_experience_years_at(date(2024, 1, 1)), 2);
    }

    #[test]
    fn present_resolves_to_now() {
        let p = CandidateProfile::new(
            vec![],
            vec![ExperienceEntry::new("Acme", "Dev", "2020-01", "Present")],
            vec![],
        );
        assert_eq!(p.total_experience_years_at(date(2024, 1, 1)), 4);
    }

    #[test]
    fn unparsable_and_inverted_spans_contribute_zero() {
        let p = CandidateProfile::new(
            vec![],
            vec![
                ExperienceEntry::new("Acme", "Dev", "sometime", "2020-01"),
                ExperienceEntry::new("Globex", "Dev", "2022-06", "2021-01"),
                ExperienceEntry::new("Initech", "Dev", "2020-01", "2021-01"),
            ],
            vec![],
        );
        assert_eq!(p.total_experience_years_at(date(2024, 1, 1)), 1);
    }

    #[test]
    fn bare_year_dates_parse() {
        let p = CandidateProfile::new(
            vec![],
            vec![ExperienceEntry::new("Acme", "Dev", "2018", "2021")],
            vec![],
        );
        assert_eq!(p.total_experience_years_at(date(2024, 1, 1)), 3);
    }

    #[test]
    fn highest_degree_picks_top_rank() {
        let p = CandidateProfile::new(
            vec![],
            vec![],
            vec![
                EducationEntry::new("Bachelor of Science", "State U"),
                EducationEntry::new("Master of Engineering", "Tech U"),
                EducationEntry::new("Diploma in Welding", "Trade School"),
            ],
        );
        assert_eq!(p.highest_degree(), Some("Master of Engineering"));
    }

    #[test]
    fn highest_degree_tie_keeps_first_entry() {
        let p = CandidateProfile::new(
            vec![],
            vec![],
            vec![
                EducationEntry::new("MBA", "Biz School"),
                EducationEntry::new("Master of Arts", "State U"),
            ],
        );
        assert_eq!(p.highest_degree(), Some("MBA"));
    }

    #[test]
    fn certificate_rank_zero_still_recognized() {
        let p = CandidateProfile::new(
            vec![],
            vec![],
            vec![EducationEntry::new("Certificate in First Aid", "Red Cross")],
        );
        assert_eq!(p.highest_degree(), Some("Certificate in First Aid"));
    }

    #[test]
    fn no_keyword_yields_none() {
        let p = CandidateProfile::new(
            vec![],
            vec![],
            vec![EducationEntry::new("Intensive Bootcamp", "Somewhere")],
        );
        assert_eq!(p.highest_degree(), None);
    }
}
