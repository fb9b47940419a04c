pub mod backends;
pub mod base;
pub mod fallback;
pub mod registry;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use fallback::{FallbackSuccess, run_candidates};
pub use registry::{ProviderRegistry, ResolvedProvider};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use self::backends::backend_for;
use self::base::send_once;
use self::utils::complete_endpoint;
use crate::config::NetworkConfig;
use crate::error::{Result, WikilensError};
use crate::llm::{
    ChatMessage, ChatRole, FailureKind, FailureReason, GenerationParams, InvocationOutcome,
    ModelCandidate, ModelInvoker,
};

/// 创建 HTTP 客户端
///
/// 每个 [`HttpInvoker`] 持有自己的客户端，超时来自 [`NetworkConfig`]。
pub fn create_http_client(network_config: &NetworkConfig) -> Result<Client> {
    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network_config.request_timeout))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout))
        .build()
        .map_err(|e| {
            WikilensError::Configuration(
                rust_i18n::t!(
                    "provider.http_client_create_failed",
                    error = e.to_string()
                )
                .to_string(),
            )
        })
}

/// Rejects message sequences that can never produce a completion.
///
/// The sequence must be non-empty and end with a non-blank user turn.
fn check_messages(messages: &[ChatMessage]) -> std::result::Result<(), FailureReason> {
    match messages.last() {
        None => Err(FailureReason::new(
            FailureKind::InvalidInput,
            rust_i18n::t!("provider.empty_messages"),
        )),
        Some(last) if last.role != ChatRole::User || last.content.trim().is_empty() => {
            Err(FailureReason::new(
                FailureKind::InvalidInput,
                rust_i18n::t!("provider.last_message_not_user"),
            ))
        }
        Some(_) => Ok(()),
    }
}

/// [`ModelInvoker`] over HTTP
///
/// Dispatches on the provider's [`ApiStyle`](crate::config::ApiStyle) and
/// sends exactly one request per call.
///
/// | Situation | Outcome |
/// |-----------|---------|
/// | 2xx with non-blank text | `Success` (text unchanged) |
/// | 429, 5xx, any other non-2xx | `RecoverableFailure` |
/// | timeout, connection error | `RecoverableFailure` |
/// | 2xx with blank or undecodable body | `RecoverableFailure` |
/// | empty messages, last turn not a user turn | `TerminalFailure` |
/// | provider unknown or without key | `TerminalFailure` |
pub struct HttpInvoker {
    client: Client,
    registry: ProviderRegistry,
}

impl HttpInvoker {
    pub fn new(registry: ProviderRegistry, network_config: &NetworkConfig) -> Result<Self> {
        Ok(Self::with_client(create_http_client(network_config)?, registry))
    }

    pub fn with_client(client: Client, registry: ProviderRegistry) -> Self {
        Self { client, registry }
    }
}

#[async_trait]
impl ModelInvoker for HttpInvoker {
    async fn invoke(
        &self,
        candidate: &ModelCandidate,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> InvocationOutcome {
        if let Err(reason) = check_messages(messages) {
            return InvocationOutcome::TerminalFailure { reason };
        }

        let Some(provider) = self.registry.get(&candidate.provider) else {
            return InvocationOutcome::terminal(
                FailureKind::Configuration,
                rust_i18n::t!(
                    "provider.provider_not_configured",
                    provider = candidate.provider.as_str()
                ),
            );
        };

        let backend = backend_for(provider.api_style);
        let label = candidate.label();
        let endpoint = complete_endpoint(&provider.endpoint, backend.endpoint_suffix());

        let body = match backend.encode_request(&candidate.model, messages, params) {
            Ok(body) => body,
            Err(e) => {
                return InvocationOutcome::terminal(
                    FailureKind::InvalidInput,
                    format!("{}: {}", label, e),
                );
            }
        };

        let mut headers = backend.auth_headers(&provider.api_key);
        headers.extend(provider.headers.iter().cloned());

        tracing::debug!(
            "{} request: backend={}, temperature={}, max_tokens={}, messages={}",
            label,
            backend.name(),
            params.temperature,
            params.max_tokens,
            messages.len()
        );

        let raw = match send_once(&self.client, &endpoint, &headers, &body, &label).await {
            Ok(raw) => raw,
            Err(reason) => return InvocationOutcome::RecoverableFailure { reason },
        };

        match backend.extract_text(&raw) {
            Ok(Some(text)) if !text.trim().is_empty() => InvocationOutcome::Success { text },
            Ok(_) => InvocationOutcome::recoverable(
                FailureKind::EmptyCompletion,
                rust_i18n::t!("provider.empty_completion", label = label.as_str()),
            ),
            Err(e) => InvocationOutcome::recoverable(
                FailureKind::MalformedResponse,
                rust_i18n::t!(
                    "provider.malformed_response",
                    label = label.as_str(),
                    detail = e.to_string()
                ),
            ),
        }
    }
}
