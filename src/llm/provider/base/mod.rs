//! Provider 公共抽象和辅助函数
//!
//! 提取各 backend 的通用逻辑，减少重复代码。
//!
//! 模块结构：
//! - `request` - 单次 HTTP 请求发送与失败归类
//! - `response` - 响应文本预览
//! - `ApiBackend` trait - 各 backend 只需实现请求编码和响应解码

pub mod request;
pub mod response;

pub use request::send_once;
pub use response::*;

use crate::llm::{ChatMessage, GenerationParams};

/// 内部 trait：每个 backend 只需实现自己独有的部分
///
/// 发送、状态码归类和空响应检查由 [`HttpInvoker`](super::HttpInvoker) 统一完成。
pub(crate) trait ApiBackend: Send + Sync {
    /// Backend 名称（用于日志）
    fn name(&self) -> &'static str;

    /// Endpoint 路径后缀
    fn endpoint_suffix(&self) -> &'static str;

    /// 认证相关请求头
    fn auth_headers(&self, api_key: &str) -> Vec<(String, String)>;

    /// 编码请求体
    fn encode_request(
        &self,
        model: &str,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> serde_json::Result<serde_json::Value>;

    /// 从 2xx 响应体中提取补全文本（`None` 表示缺失）
    fn extract_text(&self, body: &str) -> serde_json::Result<Option<String>>;
}
