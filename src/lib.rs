// src/lib.rs
// Public library surface for integration tests (and potential reuse).
//
// The crate implements the resume-to-job matching pipeline: structured
// extraction from free-text resume content (completion service with a
// deterministic fallback), skill partitioning, weighted 0-100 scoring, and
// improvement recommendations. HTTP routing, persistence and file storage are
// external collaborators and live outside this crate.

pub mod ai;
pub mod config;
pub mod extract;
pub mod job;
pub mod matcher;
pub mod pipeline;
pub mod profile;
pub mod recommend;
pub mod result;
pub mod scoring;

// ---- Re-exports for stable public API ----
pub use crate::ai::{CompletionClient, DisabledClient, DynCompletionClient, MockClient};
pub use crate::config::{AiConfig, ScoringConfig};
pub use crate::job::{ExperienceLevel, JobRequirement, RequiredSkill};
pub use crate::pipeline::Analyzer;
pub use crate::profile::{CandidateProfile, EducationEntry, ExperienceEntry};
pub use crate::result::{MatchResult, SkillBreakdown};
