//! Pipeline orchestration: extract → match → score → recommend, as plain
//! ordered function composition. One `Analyzer` per process is fine; every
//! invocation builds fresh value objects and shares no mutable state.
//!
//! The pipeline never returns an error. Each stage absorbs its own failures
//! and hands a fully-formed value to the next one.

use tracing::info;

use crate::ai::{build_client_from_config, DynCompletionClient};
use crate::config::{AiConfig, ScoringConfig};
use crate::extract::{Extraction, Extractor};
use crate::job::JobRequirement;
use crate::matcher::partition_skills;
use crate::recommend::{RecommendationContext, RecommendationGenerator};
use crate::result::{EducationSummary, ExperienceSummary, MatchResult, SkillBreakdown};
use crate::scoring::{education_score, experience_score, skill_score, SubScores};

/// Short anonymized id for diagnostics. Resume text is never logged raw.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// The matching pipeline: completion client + scoring parameters.
pub struct Analyzer {
    extractor: Extractor,
    recommender: RecommendationGenerator,
    scoring: ScoringConfig,
}

impl Analyzer {
    pub fn new(client: DynCompletionClient, scoring: ScoringConfig) -> Self {
        let extractor = Extractor::new(client.clone());
        let recommender = RecommendationGenerator::new(client, scoring.recommendations.clone());
        Self {
            extractor,
            recommender,
            scoring,
        }
    }

    /// Build from on-disk config: `config/ai.json` (missing file → AI path
    /// disabled, fallback extraction only) and `config/scoring.toml`
    /// (missing file → canonical 70/20/10 weights).
    pub fn from_config_files() -> Self {
        let ai_cfg = AiConfig::load_or_disabled("config/ai.json");
        let client = build_client_from_config(&ai_cfg);
        Self::new(client, ScoringConfig::load())
    }

    /// Analyze a resume, optionally against a job requirement profile.
    ///
    /// Always returns a `MatchResult`: empty text yields zeroed fields, a
    /// missing job skips matching/scoring/recommendations, and service
    /// failures degrade tier by tier (see `extract` and `recommend`).
    pub async fn analyze(
        &self,
        resume_text: &str,
        job: Option<&JobRequirement>,
    ) -> MatchResult {
        let extraction = self.extractor.extract(resume_text).await;
        let Extraction {
            profile,
            years,
            job_titles,
            source,
        } = extraction;

        let mut result = MatchResult {
            extracted_skills: profile.skills.clone(),
            experience: ExperienceSummary {
                years,
                job_titles,
            },
            education: EducationSummary {
                highest_degree: profile.highest_degree().map(str::to_string),
            },
            ..MatchResult::default()
        };

        let Some(job) = job else {
            info!(
                id = %anon_hash(resume_text),
                source = ?source,
                skills = result.extracted_skills.len(),
                "resume extracted, no job profile to match against"
            );
            return result;
        };

        let required = job.skill_names();
        let breakdown: SkillBreakdown = partition_skills(&profile.skills, &required);

        let sub = SubScores {
            skill: skill_score(breakdown.matched.len(), required.len(), &self.scoring.weights),
            experience: experience_score(years, job.experience_level, &self.scoring.weights),
            education: education_score(
                &job.education,
                result.education.highest_degree.as_deref(),
                &self.scoring.weights,
            ),
        };
        result.match_score = sub.composite();
        result.skills = breakdown;

        let ctx = RecommendationContext {
            job,
            extracted_skills: &result.extracted_skills,
            breakdown: &result.skills,
            match_score: result.match_score,
        };
        result.recommendations = self.recommender.generate(&ctx).await;

        info!(
            id = %anon_hash(resume_text),
            source = ?source,
            matched = result.skills.matched.len(),
            missing = result.skills.missing.len(),
            score = result.match_score,
            "resume matched against job profile"
        );
        result
    }
}
