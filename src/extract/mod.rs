//! Resume extraction: AI primary path with a deterministic fallback tier.
//!
//! Order per run: empty-text check → one completion-service attempt →
//! deterministic vocabulary/regex pass. Service failure of any kind (transport
//! error, timeout, non-JSON payload, schema mismatch) is absorbed here and
//! downgrades to the fallback; the extractor never returns an error.

pub mod fallback;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::ai::{strip_code_fences, CompletionClient, CompletionRequest, DynCompletionClient};
use crate::profile::{CandidateProfile, EducationEntry, ExperienceEntry};

const EXTRACT_SYSTEM_PROMPT: &str = "\
You are an expert HR assistant that specializes in resume analysis. \
Extract key information from the resume including: \
skills (technical and soft skills); \
work experience entries with company, title, start_date and end_date \
(use \"present\" for current positions, dates as YYYY-MM); \
education entries with degree and institution; \
contact information; projects; certifications. \
Return ONLY a JSON object with keys: skills (array of strings), \
experience (array of objects), education (array of objects), \
contact, projects, certifications.";

/// Which tier produced the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Structured-completion service returned a usable payload.
    Service,
    /// Deterministic vocabulary/regex pass.
    Fallback,
    /// Resume text was empty; nothing to extract.
    Empty,
}

/// Extraction result consumed by the pipeline. `years` and `job_titles` are
/// carried next to the profile because the fallback tier recovers them
/// without dated experience entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub profile: CandidateProfile,
    pub years: u32,
    pub job_titles: Vec<String>,
    pub source: ExtractionSource,
}

impl Extraction {
    fn empty() -> Self {
        Self {
            profile: CandidateProfile::empty(),
            years: 0,
            job_titles: Vec::new(),
            source: ExtractionSource::Empty,
        }
    }
}

/// Turns raw resume text into a structured candidate profile.
pub struct Extractor {
    client: DynCompletionClient,
}

impl Extractor {
    pub fn new(client: DynCompletionClient) -> Self {
        Self { client }
    }

    /// Run extraction. Infallible: empty text yields an empty extraction, a
    /// failed or unusable service call yields the deterministic fallback.
    pub async fn extract(&self, resume_text: &str) -> Extraction {
        if resume_text.trim().is_empty() {
            debug!("empty resume text, skipping extraction");
            return Extraction::empty();
        }

        let user = format!("Extract key information from this resume:\n\n{resume_text}");
        let req = CompletionRequest {
            system: EXTRACT_SYSTEM_PROMPT,
            user: &user,
            temperature: 0.2,
            max_tokens: 1200,
        };

        if let Some(raw) = self.client.complete(&req).await {
            if let Some(profile) = parse_profile_payload(&raw) {
                let years = profile.total_experience_years();
                let job_titles = profile
                    .experience
                    .iter()
                    .map(|e| e.title.clone())
                    .filter(|t| !t.is_empty())
                    .collect();
                return Extraction {
                    profile,
                    years,
                    job_titles,
                    source: ExtractionSource::Service,
                };
            }
            warn!(
                provider = self.client.provider_name(),
                "extraction payload unusable, using deterministic fallback"
            );
        }

        let fb = fallback::extract(resume_text);
        Extraction {
            profile: fb.to_profile(),
            years: fb.years.unwrap_or(0),
            job_titles: fb.job_titles.clone(),
            source: ExtractionSource::Fallback,
        }
    }
}

/* ----------------------------
Wire payload validation
---------------------------- */

#[derive(Debug, Default, Deserialize)]
struct WireProfile {
    #[serde(default)]
    skills: Vec<serde_json::Value>,
    #[serde(default)]
    experience: Vec<WireExperience>,
    #[serde(default)]
    education: Vec<WireEducation>,
}

#[derive(Debug, Default, Deserialize)]
struct WireExperience {
    #[serde(default)]
    company: String,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "startDate")]
    start_date: String,
    #[serde(default, alias = "endDate")]
    end_date: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireEducation {
    #[serde(default)]
    degree: String,
    #[serde(default)]
    institution: String,
}

/// Validate an untyped service payload into a profile. `None` when the text is
/// not JSON, does not match the schema, or carries no candidate data at all
/// (an empty-but-valid object is as unusable as a parse failure).
pub(crate) fn parse_profile_payload(raw: &str) -> Option<CandidateProfile> {
    let cleaned = strip_code_fences(raw);
    let wire: WireProfile = serde_json::from_str(cleaned).ok()?;

    // Skills may arrive as non-strings from a confused model; keep strings only.
    let skills: Vec<String> = wire
        .skills
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    let experience: Vec<ExperienceEntry> = wire
        .experience
        .into_iter()
        .filter(|e| !(e.company.is_empty() && e.title.is_empty()))
        .map(|e| ExperienceEntry::new(e.company, e.title, e.start_date, e.end_date))
        .collect();

    let education: Vec<EducationEntry> = wire
        .education
        .into_iter()
        .filter(|e| !e.degree.is_empty())
        .map(|e| EducationEntry::new(e.degree, e.institution))
        .collect();

    if skills.is_empty() && experience.is_empty() && education.is_empty() {
        return None;
    }
    Some(CandidateProfile::new(skills, experience, education))
}
