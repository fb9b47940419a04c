use serde::Serialize;

use crate::error::{Result, WikilensError};

/// JSON 错误输出结构（统一）
#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorJson {
    pub fn from_error(err: &WikilensError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            suggestion: err.suggestion(),
        }
    }
}

/// 通用的 JSON 输出结构
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorJson>,
}

/// 输出 JSON 格式的成功结果
pub fn output_json_success<T: Serialize>(data: T) -> Result<()> {
    let output = JsonOutput {
        success: true,
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// 输出 JSON 格式的错误
///
/// # 示例
/// ```no_run
/// use wikilens::commands::json;
/// use wikilens::error::WikilensError;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// json::output_json_error::<String>(&WikilensError::InvalidRequest("no articles".into()))?;
/// # Ok(())
/// # }
/// ```
pub fn output_json_error<T: Serialize>(err: &WikilensError) -> Result<()> {
    let output = JsonOutput::<T> {
        success: false,
        data: None,
        error: Some(ErrorJson::from_error(err)),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_json_shape() {
        let err = WikilensError::AllCandidatesExhausted {
            path: "comparison_free".into(),
            attempts: 4,
            last_error: "HTTP 503".into(),
        };
        let output = JsonOutput::<String> {
            success: false,
            data: None,
            error: Some(ErrorJson::from_error(&err)),
        };
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert_eq!(value["error"]["code"], "ALL_CANDIDATES_EXHAUSTED");
        assert!(value["error"]["message"].as_str().unwrap().contains("4 candidate"));
    }

    #[test]
    fn test_internal_errors_share_one_code() {
        let io = ErrorJson::from_error(&WikilensError::Io(std::io::Error::other("disk")));
        let other = ErrorJson::from_error(&WikilensError::Other("boom".into()));
        assert_eq!(io.code, "INTERNAL_ERROR");
        assert_eq!(other.code, "INTERNAL_ERROR");
    }
}
