pub mod claude;
pub mod openai;

pub use claude::ClaudeBackend;
pub use openai::OpenAIBackend;

use super::base::ApiBackend;
use crate::config::ApiStyle;

/// 按 API 风格选择 backend
pub(crate) fn backend_for(style: ApiStyle) -> &'static dyn ApiBackend {
    match style {
        ApiStyle::OpenAI => &OpenAIBackend,
        ApiStyle::Claude => &ClaudeBackend,
    }
}
