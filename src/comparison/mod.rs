//! Comparison and chat call sites
//!
//! Both flows share the same pipeline: pick a path, check credentials once,
//! build messages, then run the fallback orchestrator over the path's candidates.

pub mod chat;
pub mod tier;

pub use chat::ChatRequest;
pub use tier::{PathPlan, Tier, plan_for, select_path};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, PathName, PathsConfig};
use crate::error::{Result, WikilensError};
use crate::llm::prompt::build_comparison_prompt;
use crate::llm::provider::{FallbackSuccess, HttpInvoker, ProviderRegistry, run_candidates};
use crate::llm::shaper::shape_articles;
use crate::llm::{ChatMessage, ModelCandidate, ModelInvoker, ProgressReporter};

/// Request to compare language editions of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Article text keyed by language code.
    pub articles: BTreeMap<String, String>,
    /// Language name or code the comparison is written in.
    pub output_language: String,
    #[serde(default)]
    pub humor: bool,
    pub tier: Tier,
}

impl ComparisonRequest {
    /// Rejects requests that cannot be prompted.
    ///
    /// One article is accepted; the usual 2..=5 bound is enforced by callers.
    pub fn validate(&self) -> Result<()> {
        if self.articles.is_empty() {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("comparison.no_articles").to_string(),
            ));
        }
        if self.articles.keys().any(|code| code.trim().is_empty()) {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("comparison.blank_language_code").to_string(),
            ));
        }
        if self.output_language.trim().is_empty() {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("comparison.missing_output_language").to_string(),
            ));
        }
        Ok(())
    }
}

/// Generated text plus the candidate that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonOutcome {
    /// Completion text, unchanged.
    pub text: String,
    /// `provider/model` that answered.
    pub model: String,
    /// Invocations performed, including the successful one.
    pub attempts: usize,
}

impl From<FallbackSuccess> for ComparisonOutcome {
    fn from(success: FallbackSuccess) -> Self {
        Self {
            model: success.candidate.label(),
            text: success.text,
            attempts: success.attempts,
        }
    }
}

/// Entry point for comparison and chat requests.
///
/// Holds no per-request state; one service can serve concurrent requests.
pub struct ComparisonService {
    invoker: Arc<dyn ModelInvoker>,
    registry: ProviderRegistry,
    paths: PathsConfig,
}

impl ComparisonService {
    pub fn new(
        invoker: Arc<dyn ModelInvoker>,
        registry: ProviderRegistry,
        paths: PathsConfig,
    ) -> Self {
        Self {
            invoker,
            registry,
            paths,
        }
    }

    /// Builds a service backed by [`HttpInvoker`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = ProviderRegistry::from_config(&config.llm);
        let invoker = HttpInvoker::new(registry.clone(), &config.network)?;
        Ok(Self::new(Arc::new(invoker), registry, config.paths.clone()))
    }

    /// Generates a comparison of the requested editions.
    ///
    /// # Errors
    /// - [`WikilensError::InvalidRequest`] - see [`ComparisonRequest::validate`]
    /// - [`WikilensError::Configuration`] - no candidate of the tier's path has credentials
    /// - [`WikilensError::AllCandidatesExhausted`] - every candidate failed
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<ComparisonOutcome> {
        request.validate()?;

        let plan = select_path(request.tier, &self.paths)?;
        let candidates = self.registry.usable_candidates(plan.name, plan.path)?;

        let articles = match plan.shaping_budget {
            Some(budget) => shape_articles(&request.articles, budget),
            None => request.articles.clone(),
        };

        let messages = build_comparison_prompt(
            request.tier,
            request.humor,
            &request.output_language,
            &articles,
        )
        .into_messages();

        tracing::debug!(
            "Comparison: tier={}, humor={}, languages={}, candidates={}",
            request.tier,
            request.humor,
            articles.len(),
            candidates.len()
        );

        self.run(plan, &candidates, &messages, progress).await
    }

    /// Answers a follow-up question on the chat path.
    pub async fn chat(
        &self,
        request: &ChatRequest,
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<ComparisonOutcome> {
        request.validate()?;

        let plan = plan_for(PathName::Chat, self.paths.get(PathName::Chat));
        let candidates = self.registry.usable_candidates(plan.name, plan.path)?;
        let messages = request.to_messages();

        tracing::debug!(
            "Chat: history={}, candidates={}",
            request.history.len(),
            candidates.len()
        );

        self.run(plan, &candidates, &messages, progress).await
    }

    async fn run(
        &self,
        plan: PathPlan<'_>,
        candidates: &[ModelCandidate],
        messages: &[ChatMessage],
        progress: Option<&dyn ProgressReporter>,
    ) -> Result<ComparisonOutcome> {
        let name = plan.name;
        let success = run_candidates(
            self.invoker.as_ref(),
            name,
            candidates,
            messages,
            &plan.params,
            progress,
        )
        .await?;

        tracing::info!(
            "Path '{}' answered by {} after {} attempt(s)",
            name,
            success.candidate.label(),
            success.attempts
        );
        Ok(success.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::test_utils::{test_path, test_registry};
    use crate::llm::{ChatRole, FailureKind, InvocationOutcome, MockModelInvoker};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn paths(free: &[&str], premium: &[&str]) -> PathsConfig {
        PathsConfig {
            comparison_premium: test_path(premium, Some(20)),
            comparison_free: test_path(free, None),
            chat: test_path(free, None),
        }
    }

    fn request(tier: Tier) -> ComparisonRequest {
        let mut articles = BTreeMap::new();
        articles.insert("en".to_string(), "A".repeat(50));
        articles.insert("fr".to_string(), "B".repeat(10));
        ComparisonRequest {
            articles,
            output_language: "English".into(),
            humor: false,
            tier,
        }
    }

    fn service(invoker: MockModelInvoker, paths: PathsConfig) -> ComparisonService {
        ComparisonService::new(Arc::new(invoker), test_registry("http://unused"), paths)
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut empty = request(Tier::Free);
        empty.articles.clear();
        assert!(matches!(empty.validate(), Err(WikilensError::InvalidRequest(_))));

        let mut no_language = request(Tier::Free);
        no_language.output_language = " ".into();
        assert!(matches!(
            no_language.validate(),
            Err(WikilensError::InvalidRequest(_))
        ));

        let mut blank_code = request(Tier::Free);
        blank_code.articles.insert(String::new(), "x".into());
        assert!(matches!(
            blank_code.validate(),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_premium_shapes_articles() {
        let mut invoker = MockModelInvoker::new();
        invoker
            .expect_invoke()
            .withf(|candidate, messages, params| {
                let user = &messages[1].content;
                candidate.model == "premium-model"
                    && params.max_tokens == 1000
                    && user.contains(&format!("{}...", "A".repeat(20)))
                    && !user.contains(&"A".repeat(21))
            })
            .times(1)
            .returning(|_, _, _| InvocationOutcome::Success {
                text: "premium text".into(),
            });

        let outcome = service(invoker, paths(&["f1"], &["premium-model"]))
            .compare(&request(Tier::Premium), None)
            .await
            .unwrap();

        assert_eq!(outcome.text, "premium text");
        assert_eq!(outcome.model, "mock/premium-model");
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_free_passes_articles_unshaped() {
        let mut invoker = MockModelInvoker::new();
        invoker
            .expect_invoke()
            .withf(|_, messages, _| messages[1].content.contains(&"A".repeat(50)))
            .times(1)
            .returning(|_, _, _| InvocationOutcome::Success { text: "ok".into() });

        service(invoker, paths(&["f1"], &["p"]))
            .compare(&request(Tier::Free), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_free_fallback_order() {
        let mut seq = Sequence::new();
        let mut invoker = MockModelInvoker::new();
        for model in ["f1", "f2"] {
            invoker
                .expect_invoke()
                .withf(move |candidate, _, _| candidate.model == model)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| {
                    InvocationOutcome::recoverable(FailureKind::RateLimited, "HTTP 429")
                });
        }
        invoker
            .expect_invoke()
            .withf(|candidate, _, _| candidate.model == "f3")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| InvocationOutcome::Success {
                text: "third".into(),
            });

        let outcome = service(invoker, paths(&["f1", "f2", "f3", "f4"], &["p"]))
            .compare(&request(Tier::Free), None)
            .await
            .unwrap();

        assert_eq!(outcome.text, "third");
        assert_eq!(outcome.attempts, 3);
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_call() {
        let mut invoker = MockModelInvoker::new();
        invoker.expect_invoke().times(0);

        let mut req = request(Tier::Free);
        req.articles.clear();
        let err = service(invoker, paths(&["f1"], &["p"]))
            .compare(&req, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WikilensError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_chat_uses_chat_path() {
        let mut invoker = MockModelInvoker::new();
        invoker
            .expect_invoke()
            .withf(|_, messages, params| {
                messages.len() == 2
                    && messages[0].role == ChatRole::System
                    && messages[1].content == "Which is longer?"
                    && params.max_tokens == 1000
            })
            .times(1)
            .returning(|_, _, _| InvocationOutcome::Success {
                text: "The English one.".into(),
            });

        let outcome = service(invoker, paths(&["c1"], &["p"]))
            .chat(
                &ChatRequest {
                    prior_comparison: "en is long".into(),
                    article_title: "Rome".into(),
                    languages: vec!["en".into(), "it".into()],
                    history: Vec::new(),
                    new_message: "Which is longer?".into(),
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(outcome.text, "The English one.");
    }
}
