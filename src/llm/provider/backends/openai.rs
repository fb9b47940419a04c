use serde::{Deserialize, Serialize};

use super::super::base::ApiBackend;
use super::super::utils::OPENAI_API_SUFFIX;
use crate::llm::{ChatMessage, GenerationParams};

/// OpenAI chat completions backend
///
/// Also serves every OpenAI-compatible provider (OpenRouter, Groq, local
/// gateways); only the base URL and key differ.
///
/// # Configuration example
/// ```toml
/// [llm.providers.openrouter]
/// api_key = "sk-or-..."
/// endpoint = "https://openrouter.ai/api" # optional for built-in providers
///
/// [llm.providers.openrouter.headers]
/// HTTP-Referer = "https://example.org"
/// ```
pub struct OpenAIBackend;

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    // 部分免费模型会返回 `"content": null`
    #[serde(default)]
    content: Option<String>,
}

impl ApiBackend for OpenAIBackend {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn endpoint_suffix(&self) -> &'static str {
        OPENAI_API_SUFFIX
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), format!("Bearer {}", api_key))]
    }

    fn encode_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> serde_json::Result<serde_json::Value> {
        let request = OpenAIRequest {
            model,
            messages: messages
                .iter()
                .map(|m| MessagePayload {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };
        serde_json::to_value(request)
    }

    fn extract_text(&self, body: &str) -> serde_json::Result<Option<String>> {
        let response: OpenAIResponse = serde_json::from_str(body)?;
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params() -> GenerationParams {
        GenerationParams {
            temperature: 0.7,
            max_tokens: 3000,
        }
    }

    #[test]
    fn test_encode_keeps_roles_and_order() {
        let messages = vec![
            ChatMessage::system("persona"),
            ChatMessage::user("question"),
            ChatMessage::assistant("answer"),
            ChatMessage::user("follow-up"),
        ];
        let body = OpenAIBackend
            .encode_request("deepseek/deepseek-chat-v3-0324:free", &messages, &params())
            .unwrap();

        assert_eq!(body["model"], "deepseek/deepseek-chat-v3-0324:free");
        assert_eq!(body["max_tokens"], 3000);
        let roles: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(body["messages"][3]["content"], "follow-up");
    }

    #[test]
    fn test_extract_first_choice() {
        let text = OpenAIBackend
            .extract_text(
                r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#,
            )
            .unwrap();
        assert_eq!(text.as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_missing_content() {
        assert_eq!(
            OpenAIBackend
                .extract_text(r#"{"choices":[{"message":{"content":null}}]}"#)
                .unwrap(),
            None
        );
        assert_eq!(OpenAIBackend.extract_text(r#"{"choices":[]}"#).unwrap(), None);
        assert_eq!(OpenAIBackend.extract_text("{}").unwrap(), None);
    }

    #[test]
    fn test_extract_invalid_json_is_error() {
        assert!(OpenAIBackend.extract_text("<html>gateway</html>").is_err());
    }

    #[test]
    fn test_bearer_auth() {
        assert_eq!(
            OpenAIBackend.auth_headers("sk-test"),
            vec![("Authorization".to_string(), "Bearer sk-test".to_string())]
        );
    }
}
