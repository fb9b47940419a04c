//! Endpoint and credential helpers shared by the backends

/// Anthropic Messages API endpoint suffix
pub const CLAUDE_API_SUFFIX: &str = "/v1/messages";

/// OpenAI-compatible chat completions endpoint suffix
pub const OPENAI_API_SUFFIX: &str = "/v1/chat/completions";

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Turns a configured provider endpoint into the request URL.
///
/// `endpoint` is either a base (`https://openrouter.ai/api`) or the full
/// request URL. A base that already ends in `/v1` only gets the rest of the
/// suffix, since OpenRouter and Groq document their bases that way.
///
/// # Example
/// ```
/// use wikilens::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://openrouter.ai/api/", "/v1/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// assert_eq!(
///     complete_endpoint("https://openrouter.ai/api/v1", "/v1/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(endpoint: &str, suffix: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.ends_with(suffix) {
        return base.to_string();
    }
    match suffix.strip_prefix("/v1") {
        Some(rest) if base.ends_with("/v1") => format!("{}{}", base, rest),
        _ => format!("{}{}", base, suffix),
    }
}

/// Masks an API key for logs and `config show`.
///
/// Keys longer than 8 characters keep their first and last 4 characters;
/// shorter keys become `****`. Counts `char`s, so non-ASCII keys are safe.
///
/// # Example
/// ```
/// use wikilens::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("sk-or-v1-abcdefgh"), "sk-o...efgh");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    let len = key.chars().count();
    if len <= 8 {
        return "****".to_string();
    }
    let head: String = key.chars().take(4).collect();
    let tail: String = key.chars().skip(len - 4).collect();
    format!("{}...{}", head, tail)
}
