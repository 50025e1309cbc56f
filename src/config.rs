//! Configuration: completion-service settings (`config/ai.json`) and scoring
//! parameters (`config/scoring.toml`).
//!
//! Both files are optional at runtime: `AiConfig::default()` disables the AI
//! path, and `ScoringConfig::default()` carries the canonical weights
//! (70/20/10) so the pipeline works with no config present at all.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_SCORING_CONFIG_PATH: &str = "config/scoring.toml";
pub const ENV_SCORING_CONFIG_PATH: &str = "SCORING_CONFIG_PATH";

/// Completion-service config loaded from `config/ai.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    /// "openai" (case-insensitive).
    #[serde(default)]
    pub provider: String,
    /// Optional model override, e.g. "gpt-4o".
    #[serde(default)]
    pub model: Option<String>,
    /// "ENV" means: read from OPENAI_API_KEY.
    #[serde(default)]
    pub api_key: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: String::new(),
            model: None,
            api_key: String::new(),
        }
    }
}

impl AiConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AiConfig = serde_json::from_str(&data)?;

        // Normalize provider
        cfg.provider = cfg.provider.to_lowercase();

        // Resolve api key if "ENV"
        if cfg.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.api_key = match cfg.provider.as_str() {
                "openai" => env::var("OPENAI_API_KEY")
                    .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?,
                other => anyhow::bail!("Unsupported provider in config: {other}"),
            };
        }

        Ok(cfg)
    }

    /// Best-effort load: missing or unreadable file means "AI disabled".
    pub fn load_or_disabled<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_default()
    }
}

fn default_skill_weight() -> f32 {
    70.0
}
fn default_experience_weight() -> f32 {
    20.0
}
fn default_education_weight() -> f32 {
    10.0
}
fn default_max_recommendations() -> usize {
    5
}

/// Sub-score weights; each dimension is independently capped at its weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_skill_weight")]
    pub skill: f32,
    #[serde(default = "default_experience_weight")]
    pub experience: f32,
    #[serde(default = "default_education_weight")]
    pub education: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill: default_skill_weight(),
            experience: default_experience_weight(),
            education: default_education_weight(),
        }
    }
}

/// Scoring parameters loaded from TOML, with canonical defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

/// Recommendation-stage knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// When true, service failure degrades to deterministic template
    /// suggestions instead of the guaranteed empty list.
    #[serde(default)]
    pub deterministic_fallback: bool,
    #[serde(default = "default_max_recommendations")]
    pub max: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            deterministic_fallback: false,
            max: default_max_recommendations(),
        }
    }
}

impl ScoringConfig {
    /// Load from `SCORING_CONFIG_PATH` or the default path; any failure or a
    /// missing file falls back to defaults.
    pub fn load() -> Self {
        let path = env::var(ENV_SCORING_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_SCORING_CONFIG_PATH.to_string());
        match fs::read_to_string(&path) {
            Ok(s) => Self::from_toml_str(&s).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Harden odd values: non-finite or negative weights revert to defaults,
    /// the recommendation cap stays in 0..=5.
    fn sanitize(&mut self) {
        let d = ScoreWeights::default();
        if !self.weights.skill.is_finite() || self.weights.skill < 0.0 {
            self.weights.skill = d.skill;
        }
        if !self.weights.experience.is_finite() || self.weights.experience < 0.0 {
            self.weights.experience = d.experience;
        }
        if !self.weights.education.is_finite() || self.weights.education < 0.0 {
            self.weights.education = d.education;
        }
        if self.recommendations.max > 5 {
            self.recommendations.max = 5;
        }
    }
}
