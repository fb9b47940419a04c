//! Ordered-fallback orchestration
//!
//! Scans the candidates of one path in order. The first success wins, a
//! recoverable failure advances to the next candidate and a terminal failure
//! aborts the scan. There are no retries: each candidate is tried once.

use tracing::{debug, warn};

use crate::config::PathName;
use crate::error::{Result, WikilensError};
use crate::llm::{
    ChatMessage, FailureKind, GenerationParams, InvocationOutcome, ModelCandidate, ModelInvoker,
    ProgressReporter,
};

/// Successful orchestration result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSuccess {
    /// Completion text, exactly as the invoker returned it.
    pub text: String,
    /// Candidate that produced the text.
    pub candidate: ModelCandidate,
    /// Invocations performed, including the successful one.
    pub attempts: usize,
}

/// Runs `candidates` in order until one succeeds.
///
/// # Errors
/// - [`WikilensError::Configuration`] - `candidates` is empty, or a candidate
///   reported a configuration failure
/// - [`WikilensError::InvalidRequest`] - the invoker rejected the messages
/// - [`WikilensError::AllCandidatesExhausted`] - every candidate failed
///   recoverably; `attempts` equals `candidates.len()`
pub async fn run_candidates(
    invoker: &dyn ModelInvoker,
    path: PathName,
    candidates: &[ModelCandidate],
    messages: &[ChatMessage],
    params: &GenerationParams,
    progress: Option<&dyn ProgressReporter>,
) -> Result<FallbackSuccess> {
    if candidates.is_empty() {
        return Err(WikilensError::Configuration(
            rust_i18n::t!("provider.path_empty", path = path.as_str()).to_string(),
        ));
    }

    let mut last_error = None;

    for (i, candidate) in candidates.iter().enumerate() {
        // 切换到后备模型时更新 spinner
        if i > 0
            && let Some(p) = progress
        {
            p.append_suffix(&rust_i18n::t!(
                "provider.fallback_suffix",
                model = candidate.label()
            ));
        }

        debug!(
            "Path '{}': attempt {}/{} with {}",
            path,
            i + 1,
            candidates.len(),
            candidate.label()
        );

        match invoker.invoke(candidate, messages, params).await {
            InvocationOutcome::Success { text } => {
                debug!("Path '{}': {} succeeded", path, candidate.label());
                return Ok(FallbackSuccess {
                    text,
                    candidate: candidate.clone(),
                    attempts: i + 1,
                });
            }
            InvocationOutcome::RecoverableFailure { reason } => {
                warn!(
                    "Path '{}': {} failed [{:?}]: {}",
                    path,
                    candidate.label(),
                    reason.kind,
                    reason.message
                );
                last_error = Some(reason);
            }
            InvocationOutcome::TerminalFailure { reason } => {
                debug!(
                    "Path '{}': {} failed terminally: {}",
                    path,
                    candidate.label(),
                    reason.message
                );
                return Err(match reason.kind {
                    FailureKind::InvalidInput => WikilensError::InvalidRequest(reason.message),
                    _ => WikilensError::Configuration(reason.message),
                });
            }
        }
    }

    Err(WikilensError::AllCandidatesExhausted {
        path: path.as_str().to_string(),
        attempts: candidates.len(),
        last_error: last_error.map(|e| e.message).unwrap_or_default(),
    })
}
