//! Recommendation generation: asks the completion service for 3-5 actionable
//! suggestions from the full match context. Service or parse failure degrades
//! to an empty list; that failure is never fatal to the match computation.
//!
//! A deterministic template tier exists behind
//! `recommendations.deterministic_fallback` (default off), so the
//! out-of-the-box guarantee stays exactly "empty list on failure".

use serde_json::Value;
use tracing::debug;

use crate::ai::{strip_code_fences, CompletionClient, CompletionRequest, DynCompletionClient};
use crate::config::RecommendationConfig;
use crate::job::JobRequirement;
use crate::result::SkillBreakdown;

const RECOMMEND_SYSTEM_PROMPT: &str = "\
You are an expert HR assistant that specializes in providing career advice \
and recommendations. Return ONLY a JSON object with a \"recommendations\" \
key holding an array of 3-5 short, actionable strings.";

/// Everything the generator needs from the finished match.
#[derive(Debug, Clone)]
pub struct RecommendationContext<'a> {
    pub job: &'a JobRequirement,
    pub extracted_skills: &'a [String],
    pub breakdown: &'a SkillBreakdown,
    pub match_score: u8,
}

pub struct RecommendationGenerator {
    client: DynCompletionClient,
    config: RecommendationConfig,
}

impl RecommendationGenerator {
    pub fn new(client: DynCompletionClient, config: RecommendationConfig) -> Self {
        Self { client, config }
    }

    /// One service attempt, then degradation. Output is capped at the
    /// configured maximum (5 by default) and never errors.
    pub async fn generate(&self, ctx: &RecommendationContext<'_>) -> Vec<String> {
        let user = build_prompt(ctx);
        let req = CompletionRequest {
            system: RECOMMEND_SYSTEM_PROMPT,
            user: &user,
            temperature: 0.7,
            max_tokens: 500,
        };

        if let Some(raw) = self.client.complete(&req).await {
            if let Some(list) = parse_recommendations(&raw, self.config.max) {
                return list;
            }
            debug!("recommendation payload unusable");
        }

        if self.config.deterministic_fallback {
            template_recommendations(ctx, self.config.max)
        } else {
            Vec::new()
        }
    }
}

fn build_prompt(ctx: &RecommendationContext<'_>) -> String {
    format!(
        "Based on the resume analysis and job match, provide 3-5 specific \
recommendations for the candidate.\n\n\
Job Title: {}\n\
Job Description: {}\n\
Required Skills: {}\n\n\
Candidate Skills: {}\n\
Matched Skills: {}\n\
Missing Skills: {}\n\
Additional Skills: {}\n\n\
Match Score: {}%\n\n\
Provide actionable recommendations to improve the candidate's chances of \
getting this job.",
        ctx.job.title,
        ctx.job.description,
        ctx.job.skill_names().join(", "),
        ctx.extracted_skills.join(", "),
        ctx.breakdown.matched.join(", "),
        ctx.breakdown.missing.join(", "),
        ctx.breakdown.additional.join(", "),
        ctx.match_score,
    )
}

/// Validate the untyped payload: either `{"recommendations": [...]}` or a
/// bare JSON array. Non-string elements are dropped; `None` when nothing
/// string-valued remains.
pub(crate) fn parse_recommendations(raw: &str, max: usize) -> Option<Vec<String>> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).ok()?;
    let items = match &value {
        Value::Array(a) => a.as_slice(),
        Value::Object(o) => o.get("recommendations")?.as_array()?.as_slice(),
        _ => return None,
    };
    let out: Vec<String> = items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(max)
        .collect();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Deterministic tier: missing-skill prompts first, then a score-band nudge.
fn template_recommendations(ctx: &RecommendationContext<'_>, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    for skill in ctx.breakdown.missing.iter().take(3) {
        out.push(format!(
            "Add concrete evidence of {skill} to your resume, or build it through a small project."
        ));
    }
    if ctx.match_score < 50 {
        out.push(format!(
            "Your profile covers only part of the {} requirements; consider tailoring your resume to the role's core skills.",
            ctx.job.title
        ));
    } else if !ctx.breakdown.additional.is_empty() {
        out.push(
            "Highlight your additional skills in a dedicated section so they support, not bury, the required ones."
                .to_string(),
        );
    }
    out.truncate(max);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{DisabledClient, MockClient};
    use crate::job::ExperienceLevel;
    use std::sync::Arc;

    fn ctx_parts() -> (JobRequirement, Vec<String>, SkillBreakdown) {
        let job = JobRequirement::new("Frontend Engineer", ExperienceLevel::MidLevel)
            .with_skills(["React", "GraphQL"]);
        let extracted = vec!["React".to_string(), "Rust".to_string()];
        let breakdown = SkillBreakdown {
            matched: vec!["React".into()],
            missing: vec!["GraphQL".into()],
            additional: vec!["Rust".into()],
        };
        (job, extracted, breakdown)
    }

    #[test]
    fn parses_object_and_bare_array() {
        let obj = r#"{"recommendations": ["Do A", "Do B"]}"#;
        assert_eq!(
            parse_recommendations(obj, 5).unwrap(),
            vec!["Do A", "Do B"]
        );
        let arr = r#"["Do A", "Do B", "Do C"]"#;
        assert_eq!(parse_recommendations(arr, 2).unwrap(), vec!["Do A", "Do B"]);
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(parse_recommendations("nope", 5).is_none());
        assert!(parse_recommendations(r#"{"recommendations": []}"#, 5).is_none());
        assert!(parse_recommendations(r#"{"other": 1}"#, 5).is_none());
        assert!(parse_recommendations(r#"{"recommendations": [1, 2]}"#, 5).is_none());
    }

    #[test]
    fn fenced_array_parses() {
        let fenced = "```json\n[\"Learn GraphQL\"]\n```";
        assert_eq!(
            parse_recommendations(fenced, 5).unwrap(),
            vec!["Learn GraphQL"]
        );
    }

    #[tokio::test]
    async fn failure_yields_empty_list_by_default() {
        let (job, extracted, breakdown) = ctx_parts();
        let ctx = RecommendationContext {
            job: &job,
            extracted_skills: &extracted,
            breakdown: &breakdown,
            match_score: 61,
        };
        let gen = RecommendationGenerator::new(
            Arc::new(DisabledClient),
            RecommendationConfig::default(),
        );
        assert!(gen.generate(&ctx).await.is_empty());
    }

    #[tokio::test]
    async fn deterministic_tier_when_enabled() {
        let (job, extracted, breakdown) = ctx_parts();
        let ctx = RecommendationContext {
            job: &job,
            extracted_skills: &extracted,
            breakdown: &breakdown,
            match_score: 61,
        };
        let cfg = RecommendationConfig {
            deterministic_fallback: true,
            max: 5,
        };
        let gen = RecommendationGenerator::new(Arc::new(DisabledClient), cfg);
        let recs = gen.generate(&ctx).await;
        assert!(!recs.is_empty());
        assert!(recs.len() <= 5);
        assert!(recs[0].contains("GraphQL"));
    }

    #[tokio::test]
    async fn service_list_is_capped_at_max() {
        let (job, extracted, breakdown) = ctx_parts();
        let ctx = RecommendationContext {
            job: &job,
            extracted_skills: &extracted,
            breakdown: &breakdown,
            match_score: 61,
        };
        let payload =
            r#"{"recommendations": ["1", "2", "3", "4", "5", "6", "7"]}"#;
        let gen = RecommendationGenerator::new(
            Arc::new(MockClient::new([payload])),
            RecommendationConfig::default(),
        );
        assert_eq!(gen.generate(&ctx).await.len(), 5);
    }
}
