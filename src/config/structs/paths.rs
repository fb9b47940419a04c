//! Orchestration path table.
//!
//! Every call site refers to a path by [`PathName`] instead of declaring its own
//! model list. Each path owns an ordered candidate list and generation defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{generation, shaping};
use crate::error::{Result, WikilensError};

/// Named orchestration paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathName {
    /// Paid comparison: a single candidate, no fallback.
    ComparisonPremium,
    /// Free comparison: ordered list of free-tier models across providers.
    ComparisonFree,
    /// Follow-up chat: provider-first, then free models.
    Chat,
}

impl PathName {
    pub const ALL: [PathName; 3] = [
        PathName::ComparisonPremium,
        PathName::ComparisonFree,
        PathName::Chat,
    ];

    /// Key of the path under `[paths]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PathName::ComparisonPremium => "comparison_premium",
            PathName::ComparisonFree => "comparison_free",
            PathName::Chat => "chat",
        }
    }
}

impl std::fmt::Display for PathName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One model+provider pairing of a path.
///
/// # Example
/// ```toml
/// [[paths.comparison_free.candidates]]
/// provider = "openrouter"
/// model = "deepseek/deepseek-chat-v3-0324:free"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CandidateConfig {
    /// Provider id, matching a key under `[llm.providers]`.
    pub provider: String,
    /// Model id sent to the provider.
    pub model: String,
    /// Whether calls to this model are billed.
    #[serde(default)]
    pub paid: bool,
}

impl CandidateConfig {
    fn new(provider: &str, model: &str, paid: bool) -> Self {
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            paid,
        }
    }
}

/// Configuration of one orchestration path.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PathConfig {
    /// Candidates tried strictly in this order.
    #[serde(default)]
    pub candidates: Vec<CandidateConfig>,

    /// Sampling temperature in `0.0..=2.0`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token budget.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-article character budget; `None` leaves articles unshaped.
    #[serde(default)]
    pub shaping_budget: Option<usize>,
}

impl PathConfig {
    /// Validates path parameters against the provider table.
    pub fn validate(&self, name: PathName, providers: &super::LLMConfig) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(WikilensError::Configuration(format!(
                "paths.{}: temperature {} out of range [0.0, 2.0]",
                name, self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(WikilensError::Configuration(format!(
                "paths.{}: max_tokens cannot be 0",
                name
            )));
        }
        if self.shaping_budget == Some(0) {
            return Err(WikilensError::Configuration(format!(
                "paths.{}: shaping_budget cannot be 0",
                name
            )));
        }
        for candidate in &self.candidates {
            let known = providers
                .providers
                .get(&candidate.provider)
                .map(|p| p.effective_base(&candidate.provider).is_some())
                .unwrap_or_else(|| super::builtin_base_url(&candidate.provider).is_some());
            if !known {
                return Err(WikilensError::Configuration(format!(
                    "paths.{}: provider '{}' of model '{}' not found in [llm.providers]",
                    name, candidate.provider, candidate.model
                )));
            }
        }
        Ok(())
    }
}

/// Table of all orchestration paths.
///
/// # Example
/// ```toml
/// [paths.comparison_premium]
/// temperature = 0.6
/// max_tokens = 4000
/// shaping_budget = 6000
///
/// [[paths.comparison_premium.candidates]]
/// provider = "openai"
/// model = "gpt-4o"
/// paid = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_comparison_premium")]
    pub comparison_premium: PathConfig,

    #[serde(default = "default_comparison_free")]
    pub comparison_free: PathConfig,

    #[serde(default = "default_chat")]
    pub chat: PathConfig,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            comparison_premium: default_comparison_premium(),
            comparison_free: default_comparison_free(),
            chat: default_chat(),
        }
    }
}

impl PathsConfig {
    /// Looks up a path by name.
    pub fn get(&self, name: PathName) -> &PathConfig {
        match name {
            PathName::ComparisonPremium => &self.comparison_premium,
            PathName::ComparisonFree => &self.comparison_free,
            PathName::Chat => &self.chat,
        }
    }

    /// Validates every path.
    pub fn validate(&self, providers: &super::LLMConfig) -> Result<()> {
        for name in PathName::ALL {
            self.get(name).validate(name, providers)?;
        }
        // 只有高级对比会截断文章
        if self.chat.shaping_budget.is_some() {
            return Err(WikilensError::Configuration(
                "paths.chat: shaping_budget is not supported on the chat path".to_string(),
            ));
        }
        if self.comparison_premium.candidates.len() > 1 {
            return Err(WikilensError::Configuration(format!(
                "paths.comparison_premium: expected a single candidate, found {}",
                self.comparison_premium.candidates.len()
            )));
        }
        Ok(())
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    generation::COMPARISON_FREE_MAX_TOKENS
}

fn default_comparison_premium() -> PathConfig {
    PathConfig {
        candidates: vec![CandidateConfig::new("openai", "gpt-4o", true)],
        temperature: generation::COMPARISON_PREMIUM_TEMPERATURE,
        max_tokens: generation::COMPARISON_PREMIUM_MAX_TOKENS,
        shaping_budget: Some(shaping::DEFAULT_PREMIUM_BUDGET),
    }
}

fn default_comparison_free() -> PathConfig {
    PathConfig {
        candidates: vec![
            CandidateConfig::new("openrouter", "deepseek/deepseek-chat-v3-0324:free", false),
            CandidateConfig::new("groq", "llama-3.3-70b-versatile", false),
            CandidateConfig::new("openrouter", "meta-llama/llama-3.3-70b-instruct:free", false),
            CandidateConfig::new("openrouter", "google/gemma-3-27b-it:free", false),
        ],
        temperature: generation::COMPARISON_FREE_TEMPERATURE,
        max_tokens: generation::COMPARISON_FREE_MAX_TOKENS,
        shaping_budget: None,
    }
}

fn default_chat() -> PathConfig {
    PathConfig {
        candidates: vec![
            CandidateConfig::new("groq", "llama-3.1-8b-instant", false),
            CandidateConfig::new("openrouter", "deepseek/deepseek-chat-v3-0324:free", false),
            CandidateConfig::new("openrouter", "mistralai/mistral-7b-instruct:free", false),
        ],
        temperature: generation::CHAT_TEMPERATURE,
        max_tokens: generation::CHAT_MAX_TOKENS,
        shaping_budget: None,
    }
}
