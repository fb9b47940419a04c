use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::comparison::{ComparisonOutcome, ComparisonRequest, ComparisonService, Tier};
use crate::config::AppConfig;
use crate::error::{Result, WikilensError};
use crate::llm::ProgressReporter;
use crate::ui;

use super::json;
use super::options::CompareOptions;

/// 解析 `LANG=FILE` 参数
pub fn parse_article_arg(arg: &str) -> Result<(String, PathBuf)> {
    let (lang, path) = arg.split_once('=').ok_or_else(|| {
        WikilensError::InvalidRequest(
            rust_i18n::t!("compare.bad_article_arg", arg = arg).to_string(),
        )
    })?;

    let lang = lang.trim();
    let path = path.trim();
    if lang.is_empty() || path.is_empty() {
        return Err(WikilensError::InvalidRequest(
            rust_i18n::t!("compare.bad_article_arg", arg = arg).to_string(),
        ));
    }
    Ok((lang.to_string(), PathBuf::from(path)))
}

/// 读取所有文章文件，语言代码不可重复
pub fn load_articles(args: &[String]) -> Result<BTreeMap<String, String>> {
    let mut articles = BTreeMap::new();
    for arg in args {
        let (lang, path) = parse_article_arg(arg)?;
        if articles.contains_key(&lang) {
            return Err(WikilensError::InvalidRequest(
                rust_i18n::t!("compare.duplicate_language", lang = lang.as_str()).to_string(),
            ));
        }
        let text = read_input_file(&path)?;
        articles.insert(lang, text);
    }
    Ok(articles)
}

/// 读取用户给出的输入文件；读不到算请求错误
pub(super) fn read_input_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        WikilensError::InvalidRequest(
            rust_i18n::t!(
                "compare.read_failed",
                path = path.display().to_string(),
                error = e.to_string()
            )
            .to_string(),
        )
    })
}

/// 由命令行参数构造请求
pub fn build_request(options: &CompareOptions<'_>) -> Result<ComparisonRequest> {
    let tier: Tier = options.tier.parse()?;
    let request = ComparisonRequest {
        articles: load_articles(options.articles)?,
        output_language: options.output_language.to_string(),
        humor: options.humor,
        tier,
    };
    request.validate()?;
    Ok(request)
}

pub async fn run(options: &CompareOptions<'_>, config: &AppConfig) -> Result<()> {
    let result = compare(options, config).await;

    if options.json {
        match &result {
            Ok(outcome) => json::output_json_success(outcome)?,
            Err(e) => json::output_json_error::<ComparisonOutcome>(e)?,
        }
        return result.map(|_| ());
    }

    let outcome = result?;
    let colored = options.effective_colored();
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
            colored
        )
    );
    Ok(())
}

async fn compare(options: &CompareOptions<'_>, config: &AppConfig) -> Result<ComparisonOutcome> {
    let request = build_request(options)?;
    let service = ComparisonService::from_config(config)?;

    // JSON 模式不显示 spinner
    let spinner = (!options.json).then(|| {
        ui::Spinner::new(
            &rust_i18n::t!(
                "spinner.comparing",
                count = request.articles.len(),
                tier = request.tier.as_str()
            ),
            options.effective_colored(),
        )
    });

    let outcome = service
        .compare(
            &request,
            spinner.as_ref().map(|s| s as &dyn ProgressReporter),
        )
        .await;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn article_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_article_arg() {
        let (lang, path) = parse_article_arg("fr=articles/paris.fr.txt").unwrap();
        assert_eq!(lang, "fr");
        assert_eq!(path, PathBuf::from("articles/paris.fr.txt"));
    }

    #[test]
    fn test_parse_article_arg_rejects_malformed() {
        for arg in ["paris.txt", "=paris.txt", "fr=", " = "] {
            assert!(
                matches!(parse_article_arg(arg), Err(WikilensError::InvalidRequest(_))),
                "{:?}",
                arg
            );
        }
    }

    #[test]
    fn test_load_articles_reads_files() {
        let en = article_file("Paris is the capital of France.");
        let fr = article_file("Paris est la capitale de la France.");
        let args = vec![
            format!("fr={}", fr.path().display()),
            format!("en={}", en.path().display()),
        ];

        let articles = load_articles(&args).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles["fr"], "Paris est la capitale de la France.");
    }

    #[test]
    fn test_load_articles_rejects_duplicate_language() {
        let en = article_file("text");
        let args = vec![
            format!("en={}", en.path().display()),
            format!("en={}", en.path().display()),
        ];
        assert!(matches!(
            load_articles(&args),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_missing_file_is_invalid_request() {
        let args = vec!["en=/nonexistent/wikilens/en.txt".to_string()];
        assert!(matches!(
            load_articles(&args),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_build_request_rejects_unknown_tier() {
        let en = article_file("text");
        let args = vec![format!("en={}", en.path().display())];
        let options = CompareOptions {
            articles: &args,
            output_language: "English",
            humor: false,
            tier: "gold",
            json: false,
            colored: false,
        };
        assert!(matches!(
            build_request(&options),
            Err(WikilensError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_build_request_single_article() {
        let en = article_file("only one edition");
        let args = vec![format!("en={}", en.path().display())];
        let options = CompareOptions {
            articles: &args,
            output_language: "English",
            humor: true,
            tier: "premium",
            json: true,
            colored: true,
        };
        let request = build_request(&options).unwrap();
        assert_eq!(request.tier, Tier::Premium);
        assert!(request.humor);
        assert_eq!(request.articles.len(), 1);
    }
}
