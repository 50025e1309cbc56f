//! Skill partitioning: split a job's required skills against candidate skills
//! into matched / missing / additional. Pure logic, no I/O.
//!
//! The match rule is deliberately loose: a required skill counts as matched
//! when it is a case-insensitive substring of any candidate skill or vice
//! versa ("React" matches "React.js", "AWS" matches "aws lambda"). Exact
//! equality is a special case of the rule.

use crate::result::SkillBreakdown;

/// Bidirectional case-insensitive containment.
fn skills_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Partition `required` into matched/missing (original required order) and
/// collect candidate skills not covering any requirement (original candidate
/// order).
pub fn partition_skills(candidate: &[String], required: &[&str]) -> SkillBreakdown {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for &req in required {
        if candidate.iter().any(|c| skills_overlap(c, req)) {
            matched.push(req.to_string());
        } else {
            missing.push(req.to_string());
        }
    }

    let additional = candidate
        .iter()
        .filter(|c| !required.iter().any(|req| skills_overlap(c, req)))
        .cloned()
        .collect();

    SkillBreakdown {
        matched,
        missing,
        additional,
    }
}
