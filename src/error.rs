use thiserror::Error;

pub type Result<T> = std::result::Result<T, WikilensError>;

#[derive(Error, Debug)]
pub enum WikilensError {
    /// Nothing usable is configured for the selected path (missing keys, empty candidate list).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input rejected before any network call.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every candidate of a path failed with a recoverable error.
    #[error("All {attempts} candidate(s) of path '{path}' failed; last error: {last_error}")]
    AllCandidatesExhausted {
        path: String,
        attempts: usize,
        last_error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    /// 通用错误类型，用于不适合其他分类的错误
    #[error("{0}")]
    Other(String),
}

/// Caller-facing remediation class of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Nothing configured: contact support / fix configuration.
    ServiceUnavailable,
    /// Every provider rejected the request: try again later.
    TryAgainLater,
    /// Bad input: fix the selection.
    FixSelection,
    /// Anything else.
    Internal,
}

impl WikilensError {
    /// Classifies the error for user-facing remediation.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WikilensError::Configuration(_) | WikilensError::ConfigParse(_) => {
                ErrorCategory::ServiceUnavailable
            }
            WikilensError::AllCandidatesExhausted { .. } => ErrorCategory::TryAgainLater,
            WikilensError::InvalidRequest(_) => ErrorCategory::FixSelection,
            WikilensError::Io(_) | WikilensError::Serde(_) | WikilensError::Other(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Stable code for JSON output, one per [`ErrorCategory`].
    pub fn code(&self) -> &'static str {
        match self.category() {
            ErrorCategory::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCategory::TryAgainLater => "ALL_CANDIDATES_EXHAUSTED",
            ErrorCategory::FixSelection => "INVALID_REQUEST",
            ErrorCategory::Internal => "INTERNAL_ERROR",
        }
    }

    /// 获取错误的解决建议
    ///
    /// 按 [`ErrorCategory`] 给出建议；缺 key 和限流有更具体的提示。
    pub fn suggestion(&self) -> Option<String> {
        match self {
            WikilensError::Configuration(msg) if msg.contains("API key") => {
                return Some(rust_i18n::t!("error.suggestion.api_key").to_string());
            }
            WikilensError::AllCandidatesExhausted { last_error, .. }
                if last_error.contains("429") =>
            {
                return Some(rust_i18n::t!("error.suggestion.rate_limited").to_string());
            }
            _ => {}
        }

        let suggestion = match self.category() {
            ErrorCategory::ServiceUnavailable => {
                rust_i18n::t!("error.suggestion.service_unavailable")
            }
            ErrorCategory::TryAgainLater => rust_i18n::t!("error.suggestion.try_again"),
            ErrorCategory::FixSelection => rust_i18n::t!("error.suggestion.fix_selection"),
            ErrorCategory::Internal => return None,
        };
        Some(suggestion.to_string())
    }
}
