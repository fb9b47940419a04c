//! Test utilities for provider tests
//!
//! Builders that point providers and paths at a mock server URL.

use crate::config::{ApiStyle, CandidateConfig, PathConfig};

use super::registry::{ProviderRegistry, ResolvedProvider};

/// 在测试中安装 rustls crypto provider
///
/// reqwest 0.13 + rustls-no-provider 需要手动安装 crypto provider，
/// 生产代码在 main.rs 中完成，测试需要单独调用。
/// 多次调用是安全的（install_default 失败时忽略即可）。
pub fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Create a registry whose providers all point at `base_url`
///
/// - `mock`: OpenAI style, key `sk-test`, extra header `X-Title: wikilens`
/// - `mock-claude`: Claude style, key `sk-ant-test`
///
/// # Example
/// ```
/// use wikilens::llm::provider::test_utils::test_registry;
///
/// let registry = test_registry("http://localhost:8080");
/// assert!(registry.has_credentials("mock"));
/// assert!(!registry.has_credentials("openai"));
/// ```
pub fn test_registry(base_url: &str) -> ProviderRegistry {
    let mut registry = ProviderRegistry::default();
    registry.insert(ResolvedProvider {
        name: "mock".to_string(),
        api_style: ApiStyle::OpenAI,
        endpoint: base_url.to_string(),
        api_key: "sk-test".to_string(),
        headers: vec![("X-Title".to_string(), "wikilens".to_string())],
    });
    registry.insert(ResolvedProvider {
        name: "mock-claude".to_string(),
        api_style: ApiStyle::Claude,
        endpoint: base_url.to_string(),
        api_key: "sk-ant-test".to_string(),
        headers: Vec::new(),
    });
    registry
}

/// Create a path over the `mock` provider with the given models
pub fn test_path(models: &[&str], shaping_budget: Option<usize>) -> PathConfig {
    PathConfig {
        candidates: models
            .iter()
            .map(|model| CandidateConfig {
                provider: "mock".to_string(),
                model: (*model).to_string(),
                paid: false,
            })
            .collect(),
        temperature: 0.7,
        max_tokens: 1000,
        shaping_budget,
    }
}
