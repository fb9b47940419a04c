use serde::{Deserialize, Serialize};

use super::super::base::ApiBackend;
use super::super::utils::{ANTHROPIC_VERSION, CLAUDE_API_SUFFIX};
use crate::llm::{ChatMessage, ChatRole, GenerationParams};

/// Anthropic Messages API backend
///
/// System turns are not part of `messages` in this API; they are joined into
/// the top-level `system` field.
pub struct ClaudeBackend;

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<MessagePayload<'a>>,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ApiBackend for ClaudeBackend {
    fn name(&self) -> &'static str {
        "Claude"
    }

    fn endpoint_suffix(&self) -> &'static str {
        CLAUDE_API_SUFFIX
    }

    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)> {
        vec![
            ("x-api-key".to_string(), api_key.to_string()),
            ("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()),
        ]
    }

    fn encode_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> serde_json::Result<serde_json::Value> {
        let system_parts: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect();

        let request = ClaudeRequest {
            model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system: (!system_parts.is_empty()).then(|| system_parts.join("\n\n")),
            messages: messages
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .map(|m| MessagePayload {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };
        serde_json::to_value(request)
    }

    fn extract_text(&self, body: &str) -> serde_json::Result<Option<String>> {
        let response: ClaudeResponse = serde_json::from_str(body)?;
        let parts: Vec<String> = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(parts.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_system_turns_move_to_top_level() {
        let messages = vec![
            ChatMessage::system("comparison context"),
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
            ChatMessage::user("q2"),
        ];
        let body = ClaudeBackend
            .encode_request(
                "claude-sonnet-4-5",
                &messages,
                &GenerationParams {
                    temperature: 0.7,
                    max_tokens: 1000,
                },
            )
            .unwrap();

        assert_eq!(body["system"], "comparison context");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[2]["content"], "q2");
    }

    #[test]
    fn test_no_system_field_without_system_turn() {
        let body = ClaudeBackend
            .encode_request(
                "m",
                &[ChatMessage::user("hi")],
                &GenerationParams {
                    temperature: 0.0,
                    max_tokens: 10,
                },
            )
            .unwrap();
        assert!(body.get("system").is_none());
    }

    #[test]
    fn test_extract_joins_text_blocks() {
        let body = r#"{"content":[
            {"type":"text","text":"Part one"},
            {"type":"tool_use","id":"x"},
            {"type":"text","text":"Part two"}
        ]}"#;
        assert_eq!(
            ClaudeBackend.extract_text(body).unwrap().as_deref(),
            Some("Part one\nPart two")
        );
    }

    #[test]
    fn test_extract_without_text_blocks() {
        assert_eq!(ClaudeBackend.extract_text(r#"{"content":[]}"#).unwrap(), None);
    }

    #[test]
    fn test_auth_headers() {
        let headers = ClaudeBackend.auth_headers("sk-ant-test");
        assert!(headers.contains(&("x-api-key".to_string(), "sk-ant-test".to_string())));
        assert!(headers.contains(&("anthropic-version".to_string(), "2023-06-01".to_string())));
    }
}
