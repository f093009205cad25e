use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::RevealPolicy;

const DEFAULT_DATA_DIR: &str = ".quizify";
const DEFAULT_MODELS: &str = "gpt-4o-mini,gpt-4o,gpt-3.5-turbo";
const DEFAULT_DIFFICULTY: &str = "hard";
const DEV_ENCRYPTION_KEY: &str = "dev_encryption_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub encryption_key: SecretString,
    pub api_base: Option<String>,
    pub models: Vec<String>,
    pub default_difficulty: String,
    pub difficulty_policy: DifficultyPolicy,
    pub reveal_policy: RevealPolicy,
    pub sample_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let difficulty_policy = difficulty_policy_from_env();

        let mut default_difficulty =
            env::var("QUIZIFY_DEFAULT_DIFFICULTY").unwrap_or_else(|_| DEFAULT_DIFFICULTY.to_string());
        if difficulty_policy.tier(&default_difficulty).is_none() {
            let fallback = difficulty_policy
                .labels()
                .first()
                .map(|label| (*label).to_string())
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());
            log::warn!(
                "QUIZIFY_DEFAULT_DIFFICULTY '{}' is not a difficulty policy label; using '{}'",
                default_difficulty,
                fallback
            );
            default_difficulty = fallback;
        }

        Self {
            data_dir: PathBuf::from(
                env::var("QUIZIFY_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
            ),
            encryption_key: SecretString::from(
                env::var("QUIZIFY_ENCRYPTION_KEY")
                    .unwrap_or_else(|_| DEV_ENCRYPTION_KEY.to_string()),
            ),
            api_base: env::var("QUIZIFY_API_BASE").ok().filter(|base| !base.trim().is_empty()),
            models: models_from_env(),
            default_difficulty,
            difficulty_policy,
            reveal_policy: env::var("QUIZIFY_REVEAL_ANSWERS")
                .map(|value| parse_reveal_policy(&value))
                .unwrap_or(RevealPolicy::OnlyIncorrect),
            sample_mode: env::var("QUIZIFY_SAMPLE_MODE")
                .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn default_model(&self) -> &str {
        self.models
            .first()
            .map(String::as_str)
            .unwrap_or("gpt-4o-mini")
    }

    /// Warn when secrets are running on built-in development values.
    /// A host tool should still start, but not silently.
    pub fn warn_on_insecure_defaults(&self) {
        use secrecy::ExposeSecret;

        if self.encryption_key.expose_secret() == DEV_ENCRYPTION_KEY {
            log::warn!(
                "QUIZIFY_ENCRYPTION_KEY is using the built-in development value; \
                 saved credentials are not protected against local attackers"
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: PathBuf::from(".quizify-test"),
            encryption_key: SecretString::from("test_encryption_key".to_string()),
            api_base: None,
            models: vec!["gpt-4o-mini".to_string(), "gpt-4o".to_string()],
            default_difficulty: "hard".to_string(),
            difficulty_policy: DifficultyPolicy::default(),
            reveal_policy: RevealPolicy::OnlyIncorrect,
            sample_mode: false,
        }
    }
}

/// One difficulty tier: the sampling temperature and the instruction
/// fragment embedded into the generation request.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DifficultyTier {
    pub label: String,
    pub temperature: f32,
    pub description: String,
}

/// Ordered difficulty tiers. Static per process; loaded from the
/// environment or the built-in defaults, never mutated at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyPolicy {
    tiers: Vec<DifficultyTier>,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        DifficultyPolicy {
            tiers: vec![
                DifficultyTier {
                    label: "easy".to_string(),
                    temperature: 0.3,
                    description: "basic facts and general knowledge".to_string(),
                },
                DifficultyTier {
                    label: "medium".to_string(),
                    temperature: 0.5,
                    description: "moderate reasoning and conceptual questions".to_string(),
                },
                DifficultyTier {
                    label: "hard".to_string(),
                    temperature: 0.9,
                    description: "analytical or expert-level, niche knowledge".to_string(),
                },
                DifficultyTier {
                    label: "harder".to_string(),
                    temperature: 1.0,
                    description: "obscure, expert-level, trick questions".to_string(),
                },
            ],
        }
    }
}

impl DifficultyPolicy {
    /// Parse a JSON tier array, e.g.
    /// `[{"label":"easy","temperature":0.2,"description":"..."}]`.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let tiers: Vec<DifficultyTier> = serde_json::from_str(raw).map_err(|err| {
            AppError::ValidationError(format!("Difficulty policy is not a JSON tier array: {}", err))
        })?;
        Self::from_tiers(tiers)
    }

    pub fn from_tiers(tiers: Vec<DifficultyTier>) -> AppResult<Self> {
        if tiers.is_empty() {
            return Err(AppError::ValidationError(
                "Difficulty policy needs at least one tier".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for tier in &tiers {
            if tier.label.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Difficulty tier label must not be blank".to_string(),
                ));
            }
            if tier.description.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Difficulty tier '{}' has no description",
                    tier.label
                )));
            }
            if !(0.0..=1.0).contains(&tier.temperature) {
                return Err(AppError::ValidationError(format!(
                    "Difficulty tier '{}' has temperature {} outside [0, 1]",
                    tier.label, tier.temperature
                )));
            }
            if !seen.insert(tier.label.clone()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate difficulty label: {}",
                    tier.label
                )));
            }
        }

        Ok(DifficultyPolicy { tiers })
    }

    pub fn tier(&self, label: &str) -> Option<&DifficultyTier> {
        self.tiers.iter().find(|tier| tier.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tiers.iter().map(|tier| tier.label.as_str()).collect()
    }
}

fn difficulty_policy_from_env() -> DifficultyPolicy {
    match env::var("QUIZIFY_DIFFICULTY_POLICY") {
        Ok(raw) => match DifficultyPolicy::from_json(&raw) {
            Ok(policy) => policy,
            Err(err) => {
                log::warn!("Ignoring QUIZIFY_DIFFICULTY_POLICY: {}", err);
                DifficultyPolicy::default()
            }
        },
        Err(_) => DifficultyPolicy::default(),
    }
}

fn models_from_env() -> Vec<String> {
    let raw = env::var("QUIZIFY_MODELS").unwrap_or_else(|_| DEFAULT_MODELS.to_string());
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .collect();

    if models.is_empty() {
        log::warn!("QUIZIFY_MODELS has no usable entries; using the default model list");
        return DEFAULT_MODELS.split(',').map(str::to_string).collect();
    }
    models
}

fn parse_reveal_policy(value: &str) -> RevealPolicy {
    match value.trim().to_lowercase().as_str() {
        "always" => RevealPolicy::Always,
        "incorrect" | "only-incorrect" => RevealPolicy::OnlyIncorrect,
        other => {
            log::warn!(
                "Unknown QUIZIFY_REVEAL_ANSWERS value '{}'; revealing answers only when incorrect",
                other
            );
            RevealPolicy::OnlyIncorrect
        }
    }
}
