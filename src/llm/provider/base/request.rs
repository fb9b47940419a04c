//! 单次 HTTP 请求发送
//!
//! 每个 candidate 只发送一次请求，不做内部重试。所有失败在这里归类为
//! [`FailureReason`]，原始的 reqwest 错误不会传出本模块。

use reqwest::{Client, StatusCode};

use super::response::truncate_for_preview;
use crate::llm::{FailureKind, FailureReason};

/// 按 HTTP 状态码归类失败
fn classify_status(status: StatusCode) -> FailureKind {
    if status == StatusCode::TOO_MANY_REQUESTS {
        FailureKind::RateLimited
    } else if status.is_server_error() {
        FailureKind::ServerError
    } else {
        FailureKind::HttpStatus(status.as_u16())
    }
}

/// 按网络层错误归类失败
fn classify_transport(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    }
}

/// 发送一次 POST 请求，返回 2xx 响应体
///
/// # Arguments
/// * `client` - HTTP 客户端
/// * `endpoint` - API 端点
/// * `headers` - 额外的请求头
/// * `body` - 请求体
/// * `label` - `provider/model` 标签（用于日志和错误信息）
pub async fn send_once(
    client: &Client,
    endpoint: &str,
    headers: &[(String, String)],
    body: &serde_json::Value,
    label: &str,
) -> Result<String, FailureReason> {
    let mut req = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        req = req.header(key.as_str(), value.as_str());
    }

    tracing::debug!("Sending request for {} to: {}", label, endpoint);

    let response = req.json(body).send().await.map_err(|e| {
        let kind = classify_transport(&e);
        tracing::debug!("{} request failed [{:?}]: {}", label, kind, e);
        let message = match kind {
            FailureKind::Timeout => {
                rust_i18n::t!("provider.request_timeout", label = label, detail = e.to_string())
            }
            _ => rust_i18n::t!(
                "provider.connection_failed",
                label = label,
                detail = e.to_string()
            ),
        };
        FailureReason::new(kind, message)
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        FailureReason::new(
            FailureKind::Network,
            rust_i18n::t!("provider.read_body_failed", label = label, detail = e.to_string()),
        )
    })?;

    tracing::debug!("{} response status: {}", label, status);

    if !status.is_success() {
        return Err(FailureReason::new(
            classify_status(status),
            format!("{}: HTTP {}: {}", label, status, truncate_for_preview(&text)),
        ));
    }

    Ok(text)
}
