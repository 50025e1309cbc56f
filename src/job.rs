//! Job requirement profile: what a listing asks for, as consumed by the
//! matcher and scorers. Created by the caller (the job CRUD side is an
//! external collaborator) and treated as read-only here.

use serde::{Deserialize, Serialize};

/// One skill a job asks for. `importance` is carried through serialization
/// untouched; no scoring formula consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill: String,
    #[serde(default)]
    pub importance: String,
}

impl RequiredSkill {
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            importance: String::new(),
        }
    }

    pub fn with_importance(mut self, importance: impl Into<String>) -> Self {
        self.importance = importance.into();
        self
    }
}

/// Seniority band of a listing; each maps to a minimum-years threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    MidLevel,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    /// Minimum years of experience expected for the level.
    pub fn required_years(self) -> u32 {
        match self {
            ExperienceLevel::Entry => 0,
            ExperienceLevel::Junior => 1,
            ExperienceLevel::MidLevel => 3,
            ExperienceLevel::Senior => 5,
            ExperienceLevel::Lead => 8,
            ExperienceLevel::Executive => 10,
        }
    }
}

/// A job's requirement profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<RequiredSkill>,
    pub experience_level: ExperienceLevel,
    /// Free-text education requirement, matched by keyword containment
    /// ("bachelor", "master", "phd", "high school").
    #[serde(default)]
    pub education: String,
}

impl JobRequirement {
    pub fn new(title: impl Into<String>, experience_level: ExperienceLevel) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            required_skills: Vec::new(),
            experience_level,
            education: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(|s| RequiredSkill::new(s)).collect();
        self
    }

    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.education = education.into();
        self
    }

    /// Required skill names in their original order.
    pub fn skill_names(&self) -> Vec<&str> {
        self.required_skills.iter().map(|r| r.skill.as_str()).collect()
    }
}
