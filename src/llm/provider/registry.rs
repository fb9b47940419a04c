//! Provider credential registry
//!
//! Resolves `[llm.providers]` once per process and filters path candidates
//! whose provider has no usable key. The filter runs before any network call.

use std::collections::HashMap;

use crate::config::{ApiStyle, LLMConfig, PathConfig, PathName};
use crate::error::{Result, WikilensError};
use crate::llm::ModelCandidate;

/// A provider with everything needed to send a request.
#[derive(Clone)]
pub struct ResolvedProvider {
    pub name: String,
    pub api_style: ApiStyle,
    /// Base URL or full endpoint; completed by the backend suffix.
    pub endpoint: String,
    pub api_key: String,
    pub headers: Vec<(String, String)>,
}

impl std::fmt::Debug for ResolvedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("name", &self.name)
            .field("api_style", &self.api_style)
            .field("endpoint", &self.endpoint)
            .field("api_key", &super::utils::mask_api_key(&self.api_key))
            .field("headers", &self.headers)
            .finish()
    }
}

/// Providers that have an endpoint and a non-blank key.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ResolvedProvider>,
}

impl ProviderRegistry {
    /// Builds the registry from configuration.
    ///
    /// Providers without a key or without an endpoint are left out, so
    /// [`usable_candidates`](Self::usable_candidates) drops their candidates.
    pub fn from_config(config: &LLMConfig) -> Self {
        let mut providers = HashMap::new();

        // HashMap 无序，排序后日志输出稳定
        let mut entries: Vec<_> = config.providers.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (name, provider) in entries {
            let Some(api_key) = provider.api_key.as_deref().filter(|k| !k.trim().is_empty())
            else {
                tracing::debug!("Provider '{}' has no API key", name);
                continue;
            };
            let Some(endpoint) = provider.effective_base(name) else {
                tracing::debug!("Provider '{}' has no endpoint", name);
                continue;
            };

            let mut headers: Vec<(String, String)> = provider
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            headers.sort();

            providers.insert(
                name.clone(),
                ResolvedProvider {
                    name: name.clone(),
                    api_style: provider.effective_api_style(name),
                    endpoint,
                    api_key: api_key.to_string(),
                    headers,
                },
            );
        }

        Self { providers }
    }

    /// Registers a provider directly.
    pub fn insert(&mut self, provider: ResolvedProvider) {
        self.providers.insert(provider.name.clone(), provider);
    }

    /// Looks up a usable provider.
    pub fn get(&self, name: &str) -> Option<&ResolvedProvider> {
        self.providers.get(name)
    }

    /// Whether `name` has a usable key.
    pub fn has_credentials(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Candidates of `path` whose provider has credentials, in configured order.
    ///
    /// # Errors
    /// [`WikilensError::Configuration`] when nothing is left: the path is empty
    /// or no candidate's provider has a key.
    pub fn usable_candidates(
        &self,
        name: PathName,
        path: &PathConfig,
    ) -> Result<Vec<ModelCandidate>> {
        let mut usable = Vec::with_capacity(path.candidates.len());

        for candidate in &path.candidates {
            if self.has_credentials(&candidate.provider) {
                usable.push(ModelCandidate::from(candidate));
            } else {
                tracing::debug!(
                    "Skipping {}/{} on path '{}': no API key for provider '{}'",
                    candidate.provider,
                    candidate.model,
                    name,
                    candidate.provider
                );
            }
        }

        if usable.is_empty() {
            let message = if path.candidates.is_empty() {
                rust_i18n::t!("provider.path_empty", path = name.as_str())
            } else {
                rust_i18n::t!("provider.path_no_credentials", path = name.as_str())
            };
            return Err(WikilensError::Configuration(message.to_string()));
        }

        tracing::debug!(
            "Path '{}': {} of {} candidate(s) usable",
            name,
            usable.len(),
            path.candidates.len()
        );
        Ok(usable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CandidateConfig, ProviderConfig};
    use pretty_assertions::assert_eq;

    fn llm_with_keys(keys: &[(&str, &str)]) -> LLMConfig {
        let mut config = LLMConfig::default();
        for (name, key) in keys {
            config.providers.insert(
                (*name).to_string(),
                ProviderConfig {
                    api_key: Some((*key).to_string()),
                    ..Default::default()
                },
            );
        }
        config
    }

    fn path(candidates: &[(&str, &str)]) -> PathConfig {
        PathConfig {
            candidates: candidates
                .iter()
                .map(|(provider, model)| CandidateConfig {
                    provider: (*provider).to_string(),
                    model: (*model).to_string(),
                    paid: false,
                })
                .collect(),
            temperature: 0.7,
            max_tokens: 100,
            shaping_budget: None,
        }
    }

    #[test]
    fn test_candidates_without_keys_are_filtered_in_order() {
        let registry = ProviderRegistry::from_config(&llm_with_keys(&[
            ("openrouter", "sk-or"),
            ("groq", "gsk"),
        ]));
        let path = path(&[
            ("openrouter", "a"),
            ("openai", "b"),
            ("groq", "c"),
            ("openrouter", "d"),
        ]);

        let usable = registry
            .usable_candidates(PathName::ComparisonFree, &path)
            .unwrap();
        let labels: Vec<String> = usable.iter().map(ModelCandidate::label).collect();
        assert_eq!(labels, vec!["openrouter/a", "groq/c", "openrouter/d"]);
    }

    #[test]
    fn test_no_credentials_is_configuration_error() {
        let registry = ProviderRegistry::from_config(&LLMConfig::default());
        let err = registry
            .usable_candidates(PathName::ComparisonPremium, &path(&[("openai", "gpt-4o")]))
            .unwrap_err();
        assert!(matches!(err, WikilensError::Configuration(_)));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_empty_path_is_configuration_error() {
        let registry = ProviderRegistry::from_config(&llm_with_keys(&[("openai", "sk")]));
        let err = registry
            .usable_candidates(PathName::ComparisonPremium, &path(&[]))
            .unwrap_err();
        assert!(matches!(err, WikilensError::Configuration(_)));
    }

    #[test]
    fn test_blank_key_is_not_usable() {
        let registry = ProviderRegistry::from_config(&llm_with_keys(&[("groq", "   ")]));
        assert!(!registry.has_credentials("groq"));
    }

    #[test]
    fn test_custom_provider_without_endpoint_is_skipped() {
        let registry = ProviderRegistry::from_config(&llm_with_keys(&[("local", "key")]));
        assert!(registry.get("local").is_none());
    }

    #[test]
    fn test_resolved_provider_uses_builtin_base_and_style() {
        let registry =
            ProviderRegistry::from_config(&llm_with_keys(&[("claude", "sk-ant-abcdefgh1234")]));
        let claude = registry.get("claude").unwrap();
        assert_eq!(claude.api_style, ApiStyle::Claude);
        assert_eq!(claude.endpoint, "https://api.anthropic.com");
        assert!(!format!("{:?}", claude).contains("abcdefgh"));
    }
}
