//! Match result shape returned by the pipeline.
//!
//! This is the JSON the external collaborators (application views, dashboards)
//! consume. The original service wrote the `skills` key twice (extracted list,
//! then the breakdown, silently overwriting the first); here the breakdown
//! keeps the `skills` key and the extracted list gets its own
//! `extracted_skills` field.

use serde::{Deserialize, Serialize};

/// Required-skill partition plus candidate extras.
/// `matched` and `missing` together reconstruct the job's required skills in
/// their original order; `additional` preserves candidate-skill order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub additional: Vec<String>,
}

/// Condensed experience view carried on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSummary {
    pub years: u32,
    pub job_titles: Vec<String>,
}

/// Condensed education view carried on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationSummary {
    pub highest_degree: Option<String>,
}

/// Complete outcome of one `analyze` run. Always fully formed: every failure
/// upstream degrades to empty/zeroed fields, never to an absent result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub skills: SkillBreakdown,
    pub extracted_skills: Vec<String>,
    pub experience: ExperienceSummary,
    pub education: EducationSummary,
    /// 0..=100.
    pub match_score: u8,
    /// 0..=5 entries.
    pub recommendations: Vec<String>,
}

impl MatchResult {
    /// Result for an empty/missing resume: everything absent or zero.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_has_expected_keys() {
        let r = MatchResult {
            skills: SkillBreakdown {
                matched: vec!["React".into()],
                missing: vec!["GraphQL".into()],
                additional: vec!["Rust".into()],
            },
            extracted_skills: vec!["React".into(), "Rust".into()],
            experience: ExperienceSummary {
                years: 4,
                job_titles: vec!["Developer".into()],
            },
            education: EducationSummary {
                highest_degree: Some("Bachelor of Science".into()),
            },
            match_score: 68,
            recommendations: vec!["Learn GraphQL basics.".into()],
        };

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["skills"]["matched"], serde_json::json!(["React"]));
        assert_eq!(v["skills"]["missing"], serde_json::json!(["GraphQL"]));
        assert_eq!(v["skills"]["additional"], serde_json::json!(["Rust"]));
        assert_eq!(v["extracted_skills"], serde_json::json!(["React", "Rust"]));
        assert_eq!(v["experience"]["years"], 4);
        assert_eq!(v["education"]["highest_degree"], "Bachelor of Science");
        assert_eq!(v["match_score"], 68);
        assert!(v["recommendations"].is_array());
    }

    #[test]
    fn empty_result_is_zeroed() {
        let v = serde_json::to_value(MatchResult::empty()).unwrap();
        assert_eq!(v["match_score"], 0);
        assert_eq!(v["experience"]["years"], 0);
        assert_eq!(v["education"]["highest_degree"], serde_json::Value::Null);
        assert_eq!(v["skills"]["matched"], serde_json::json!([]));
    }
}
