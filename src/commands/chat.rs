use std::path::Path;

use crate::comparison::{ChatRequest, ComparisonOutcome, ComparisonService};
use crate::config::AppConfig;
use crate::error::{Result, WikilensError};
use crate::llm::{ChatMessage, ProgressReporter};
use crate::ui;

use super::compare::read_input_file;
use super::json;
use super::options::ChatOptions;

/// 读取历史对话文件（JSON 数组）
pub fn load_history(path: &Path) -> Result<Vec<ChatMessage>> {
    let content = read_input_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        WikilensError::InvalidRequest(
            rust_i18n::t!(
                "chat.bad_history",
                path = path.display().to_string(),
                error = e.to_string()
            )
            .to_string(),
        )
    })
}

pub fn build_request(options: &ChatOptions<'_>) -> Result<ChatRequest> {
    let history = match options.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    let request = ChatRequest {
        prior_comparison: read_input_file(options.comparison)?,
        article_title: options.title.to_string(),
        languages: options
            .languages
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        history,
        new_message: options.message.to_string(),
    };
    request.validate()?;
    Ok(request)
}

pub async fn run(options: &ChatOptions<'_>, config: &AppConfig) -> Result<()> {
    let result = chat(options, config).await;

    if options.json {
        match &result {
            Ok(outcome) => json::output_json_success(outcome)?,
            Err(e) => json::output_json_error::<ComparisonOutcome>(e)?,
        }
        return result.map(|_| ());
    }

    let outcome = result?;
    println!("{}", outcome.text);
    println!();
    println!(
        "{}",
        ui::dim(
            &rust_i18n::t!(
                "compare.answered_by",
                model = outcome.model.as_str(),
                attempts = outcome.attempts
            ),
            options.effective_colored()
        )
    );
    Ok(())
}

async fn chat(options: &ChatOptions<'_>, config: &AppConfig) -> Result<ComparisonOutcome> {
    let request = build_request(options)?;
    let service = ComparisonService::from_config(config)?;

    let spinner = (!options.json)
        .then(|| ui::Spinner::new(&rust_i18n::t!("spinner.thinking"), options.effective_colored()));

    let outcome = service
        .chat(&request, spinner.as_ref().map(|s| s as &dyn ProgressReporter))
        .await;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_history() {
        let history = file(r#"[{"role":"user","content":"q"},{"role":"assistant","content":"a"}]"#);
        let messages = load_history(history.path()).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_bad_history_is_invalid_request() {
        let history = file(r#"[{"role":"narrator","content":"q"}]"#);
        assert!(matches!(
            load_history(history.path()),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_build_request_trims_languages() {
        let comparison = file("The editions differ.");
        let languages = vec![" en".to_string(), "".to_string(), "fr ".to_string()];
        let options = ChatOptions {
            comparison: comparison.path(),
            title: "Paris",
            languages: &languages,
            history: None,
            message: "Which is longer?",
            json: false,
            colored: false,
        };

        let request = build_request(&options).unwrap();
        assert_eq!(request.languages, vec!["en", "fr"]);
        assert!(request.history.is_empty());
        assert_eq!(request.prior_comparison, "The editions differ.");
    }

    #[test]
    fn test_missing_comparison_file_is_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("paris.md");
        let options = ChatOptions {
            comparison: &missing,
            title: "Paris",
            languages: &[],
            history: None,
            message: "Which is longer?",
            json: false,
            colored: false,
        };

        let err = build_request(&options).unwrap_err();
        assert!(matches!(err, WikilensError::InvalidRequest(_)), "{:?}", err);
        assert!(err.to_string().contains("paris.md"));
    }

    #[test]
    fn test_missing_history_file_is_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_history(&dir.path().join("history.json")),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_build_request_rejects_blank_message() {
        let comparison = file("The editions differ.");
        let options = ChatOptions {
            comparison: comparison.path(),
            title: "Paris",
            languages: &[],
            history: None,
            message: "  ",
            json: false,
            colored: false,
        };
        assert!(matches!(
            build_request(&options),
            Err(WikilensError::InvalidRequest(_))
        ));
    }
}
