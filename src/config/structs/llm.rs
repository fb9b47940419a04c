//! LLM provider configuration structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikilensError};

/// LLM API wire format.
///
/// Determines which backend encodes the request. If [`ProviderConfig::api_style`]
/// is `None`, the style is inferred from the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// OpenAI chat completions (also OpenRouter, Groq and other compatible APIs).
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic Messages API.
    Claude,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::OpenAI => write!(f, "openai"),
            ApiStyle::Claude => write!(f, "claude"),
        }
    }
}

impl std::str::FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ApiStyle::OpenAI),
            "claude" | "anthropic" => Ok(ApiStyle::Claude),
            _ => Err(format!("Unknown API style: '{}'", s)),
        }
    }
}

impl ApiStyle {
    /// Infers the wire format from a provider id.
    pub fn infer(provider_name: &str) -> Self {
        match provider_name {
            "claude" | "anthropic" => ApiStyle::Claude,
            _ => ApiStyle::OpenAI,
        }
    }
}

/// Built-in provider ids with their default base URL and key variable.
const BUILTIN_PROVIDERS: &[(&str, &str, &str)] = &[
    ("openai", "https://api.openai.com", "OPENAI_API_KEY"),
    ("openrouter", "https://openrouter.ai/api", "OPENROUTER_API_KEY"),
    ("groq", "https://api.groq.com/openai", "GROQ_API_KEY"),
    ("claude", "https://api.anthropic.com", "ANTHROPIC_API_KEY"),
];

/// Default base URL of a built-in provider.
pub fn builtin_base_url(provider_name: &str) -> Option<&'static str> {
    BUILTIN_PROVIDERS
        .iter()
        .find(|(name, _, _)| *name == provider_name)
        .map(|(_, base, _)| *base)
}

/// Well-known environment variable holding a built-in provider's key.
pub fn builtin_api_key_env(provider_name: &str) -> Option<&'static str> {
    BUILTIN_PROVIDERS
        .iter()
        .find(|(name, _, _)| *name == provider_name)
        .map(|(_, _, env)| *env)
}

/// Provider configuration.
///
/// Settings for one entry under `[llm.providers.<name>]`. Models are not
/// configured here: they belong to the candidates of each orchestration path.
///
/// # Fields
/// - `api_style`: wire format (see [`ApiStyle`])
/// - `endpoint`: base URL or full endpoint (optional for built-in providers)
/// - `api_key`: API key; `None` means the provider is not configured
/// - `headers`: extra request headers (for example OpenRouter's `X-Title`)
///
/// # Example
/// ```toml
/// [llm.providers.openrouter]
/// api_key = "sk-or-..."
/// headers = { "HTTP-Referer" = "https://wikilens.example", "X-Title" = "Wikilens" }
/// ```
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Wire format; inferred from the provider name when omitted.
    #[serde(default)]
    pub api_style: Option<ApiStyle>,

    /// API endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Extra request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::llm::provider::utils::mask_api_key;
        let masked_key = self.api_key.as_deref().map(mask_api_key);
        f.debug_struct("ProviderConfig")
            .field("api_style", &self.api_style)
            .field("endpoint", &self.endpoint)
            .field("api_key", &masked_key)
            .field("headers", &self.headers)
            .finish()
    }
}

impl ProviderConfig {
    /// Wire format used for this provider.
    pub fn effective_api_style(&self, name: &str) -> ApiStyle {
        self.api_style.unwrap_or_else(|| ApiStyle::infer(name))
    }

    /// Configured endpoint, or the built-in default base URL.
    pub fn effective_base(&self, name: &str) -> Option<String> {
        self.endpoint
            .clone()
            .or_else(|| builtin_base_url(name).map(str::to_string))
    }

    /// Whether an API key is present and non-blank.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Validates provider configuration.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.effective_base(name).is_none() {
            return Err(WikilensError::Configuration(format!(
                "Provider '{}': endpoint is required for non built-in providers",
                name
            )));
        }
        if let Some(ref key) = self.api_key
            && key.trim().is_empty()
        {
            return Err(WikilensError::Configuration(format!(
                "Provider '{}': api_key is empty",
                name
            )));
        }
        Ok(())
    }
}

/// LLM configuration.
///
/// # Example
/// ```toml
/// [llm.providers.openai]
/// api_key = "sk-..."
///
/// [llm.providers.local]
/// api_style = "openai"
/// endpoint = "http://localhost:8080/v1/chat/completions"
/// api_key = "unused"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LLMConfig {
    /// Provider settings keyed by provider id.
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
        }
    }
}

impl LLMConfig {
    /// Adds built-in providers missing from a user-supplied map.
    pub fn fill_builtin_providers(&mut self) {
        for (name, _, _) in BUILTIN_PROVIDERS {
            self.providers.entry((*name).to_string()).or_default();
        }
    }
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    BUILTIN_PROVIDERS
        .iter()
        .map(|(name, _, _)| ((*name).to_string(), ProviderConfig::default()))
        .collect()
}
