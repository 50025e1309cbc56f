//! Sub-scorers and the composite match score. Pure functions over extracted
//! data and the job profile; weights come from `ScoringConfig` (70/20/10 by
//! default) and each dimension is independently bounded by its weight.

use crate::config::ScoreWeights;
use crate::job::ExperienceLevel;

/// The three bounded dimensions before composition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubScores {
    pub skill: f32,
    pub experience: f32,
    pub education: f32,
}

impl SubScores {
    /// Composite 0-100 integer: `round(min(100, skill + experience +
    /// education))`. The cap is a guard against rounding pushing past 100,
    /// not a normal-path occurrence.
    pub fn composite(&self) -> u8 {
        let total = self.skill + self.experience + self.education;
        total.min(100.0).round() as u8
    }
}

/// Proportion of required skills matched, scaled by the skill weight.
/// Defined as 0 when nothing is required (degenerate input, not an error).
pub fn skill_score(matched: usize, required: usize, weights: &ScoreWeights) -> f32 {
    if required == 0 {
        return 0.0;
    }
    (matched as f32 / required as f32) * weights.skill
}

/// Full experience weight when candidate years meet the level's threshold,
/// otherwise proportional. The `>=` branch is checked first on purpose: a
/// zero threshold (entry level) is always met, so it always yields the full
/// weight, never 0/0.
pub fn experience_score(
    candidate_years: u32,
    level: ExperienceLevel,
    weights: &ScoreWeights,
) -> f32 {
    let required_years = level.required_years();
    if candidate_years >= required_years {
        weights.experience
    } else {
        // required_years > 0 here, since candidate_years >= 0 always.
        (candidate_years as f32 / required_years as f32) * weights.experience
    }
}

/// Binary education score: the full weight only when the requirement's
/// keyword tier is satisfied by the candidate's highest degree.
///
/// Hierarchy: a "bachelor" requirement accepts bachelor/master/phd; "master"
/// accepts master/phd; "phd" accepts only phd; "high school" only an exact
/// "high school" credential. A requirement matching none of the four
/// keywords scores 0 regardless of the candidate.
pub fn education_score(
    requirement: &str,
    highest_degree: Option<&str>,
    weights: &ScoreWeights,
) -> f32 {
    let Some(degree) = highest_degree else {
        return 0.0;
    };
    let req = requirement.to_lowercase();
    let deg = degree.to_lowercase();

    let satisfied = if req.contains("bachelor") {
        deg.contains("bachelor") || deg.contains("master") || deg.contains("phd")
    } else if req.contains("master") {
        deg.contains("master") || deg.contains("phd")
    } else if req.contains("phd") {
        deg.contains("phd")
    } else if req.contains("high school") {
        deg.contains("high school")
    } else {
        false
    };

    if satisfied {
        weights.education
    } else {
        0.0
    }
}
