//! LLM abstractions, shared types, and the invoker trait.
//!
//! This module is the comparison core: content shaping, prompt building,
//! single-candidate invocation and the fallback orchestrator.

/// Prompt-building utilities for comparison and chat flows.
pub mod prompt;
/// Built-in invoker backends, credential registry and fallback orchestration.
pub mod provider;
/// Length bounding of article text.
pub mod shaper;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CandidateConfig;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Progress reporting interface for LLM operations.
///
/// The LLM layer reports status changes (fallback switch) through this trait
/// instead of depending on a concrete UI implementation.
pub trait ProgressReporter: Send + Sync {
    /// Appends an informative suffix to a progress message.
    fn append_suffix(&self, suffix: &str);
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One model+provider pairing eligible for an orchestration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidate {
    /// Provider id, matching a key under `[llm.providers]`.
    pub provider: String,
    /// Model id sent to the provider.
    pub model: String,
    /// Whether calls to this model are billed.
    pub paid: bool,
}

impl ModelCandidate {
    pub fn new(provider: impl Into<String>, model: impl Into<String>, paid: bool) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            paid,
        }
    }

    /// `provider/model` label for logs and error messages.
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

impl From<&CandidateConfig> for ModelCandidate {
    fn from(config: &CandidateConfig) -> Self {
        Self::new(&config.provider, &config.model, config.paid)
    }
}

/// Sampling parameters for one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Normalized failure classes produced at the invoker boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Any other non-2xx status.
    HttpStatus(u16),
    /// Request timed out.
    Timeout,
    /// Connection could not be established or broke mid-request.
    Network,
    /// 2xx with an empty or missing completion.
    EmptyCompletion,
    /// 2xx body that could not be decoded.
    MalformedResponse,
    /// Caller input rejected before any network call.
    InvalidInput,
    /// Missing provider or credentials.
    Configuration,
}

/// Why an invocation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureReason {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a single candidate invocation.
///
/// Decides whether the orchestrator advances to the next candidate
/// ([`RecoverableFailure`](Self::RecoverableFailure)) or aborts
/// ([`TerminalFailure`](Self::TerminalFailure)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Success { text: String },
    RecoverableFailure { reason: FailureReason },
    TerminalFailure { reason: FailureReason },
}

impl InvocationOutcome {
    pub fn recoverable(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::RecoverableFailure {
            reason: FailureReason::new(kind, message),
        }
    }

    pub fn terminal(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::TerminalFailure {
            reason: FailureReason::new(kind, message),
        }
    }
}

/// Performs exactly one provider call for one candidate.
///
/// Implementations never retry and never return raw provider errors: every
/// outcome is normalized into an [`InvocationOutcome`].
///
/// # Built-In Implementations
/// - [`HttpInvoker`](provider::HttpInvoker) - OpenAI-compatible and Anthropic endpoints
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        candidate: &ModelCandidate,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> InvocationOutcome;
}
