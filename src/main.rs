#[macro_use]
extern crate rust_i18n;

// Re-export all library modules
use wikilens::*;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use cli::{Cli, Commands};
use tokio::runtime::Runtime;

// Initialize i18n for binary crate
// This ensures translations are available in main.rs context
i18n!("locales", fallback = "en");

fn main() -> Result<()> {
    human_panic::setup_panic!();

    // 在解析 CLI 之前初始化语言（支持多语言 help text）
    init_locale_early();

    // 解析 CLI 参数并注入国际化 help text
    let cli = parse_cli_localized()?;

    // 根据 verbose 标志设置日志级别
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 初始化 tracing 日志（写到 stderr，stdout 留给结果和 JSON）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // reqwest 使用 rustls-no-provider，需要显式安装 crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    // compare/chat 需要完整配置；config/init 可以在配置损坏时运行
    let needs_config = matches!(
        &cli.command,
        Commands::Compare { .. } | Commands::Chat { .. }
    );

    let config = if needs_config {
        config::load_config(cli.config.as_deref())?
    } else {
        config::load_config(cli.config.as_deref()).unwrap_or_default()
    };
    let colored = config.ui.colored;

    let rt = Runtime::new()?;

    rt.block_on(async {
        let (result, json) = match &cli.command {
            Commands::Compare {
                articles,
                output_language,
                humor,
                tier,
                json,
            } => {
                let options = commands::CompareOptions {
                    articles,
                    output_language,
                    humor: *humor,
                    tier,
                    json: *json,
                    colored,
                };
                (commands::compare::run(&options, &config).await, *json)
            }
            Commands::Chat {
                comparison,
                title,
                languages,
                history,
                message,
                json,
            } => {
                let options = commands::ChatOptions {
                    comparison,
                    title,
                    languages,
                    history: history.as_deref(),
                    message,
                    json: *json,
                    colored,
                };
                (commands::chat::run(&options, &config).await, *json)
            }
            Commands::Config { action } => (
                commands::config::run(*action, cli.config.as_deref(), colored),
                false,
            ),
            Commands::Init { force } => (commands::init::run(*force, colored), false),
        };

        if let Err(e) = result {
            // JSON 模式下，错误已经以 JSON 输出过了
            if !json {
                ui::error(&e.to_string(), colored);
                if let Some(suggestion) = e.suggestion() {
                    println!();
                    println!("{}", ui::info(&suggestion, colored));
                }
            }
            std::process::exit(1);
        }
        Ok(())
    })
}

/// Parse CLI arguments with localized help text
///
/// Uses clap's derive + runtime override pattern:
/// 1. Get Command from derive macro (type-safe parsing)
/// 2. Override help text at runtime with rust_i18n::t!()
/// 3. Parse and reconstruct the Cli struct
fn parse_cli_localized() -> Result<Cli> {
    let cmd = Cli::command()
        .about(rust_i18n::t!("cli.about").to_string())
        .mut_arg("verbose", |arg| {
            arg.help(rust_i18n::t!("cli.verbose").to_string())
        })
        .mut_arg("config", |arg| {
            arg.help(rust_i18n::t!("cli.config_file").to_string())
        })
        .mut_subcommand("compare", |cmd| {
            cmd.about(rust_i18n::t!("cli.compare").to_string())
                .mut_arg("articles", |arg| {
                    arg.help(rust_i18n::t!("cli.compare.articles").to_string())
                })
                .mut_arg("output_language", |arg| {
                    arg.help(rust_i18n::t!("cli.compare.output_language").to_string())
                })
                .mut_arg("humor", |arg| {
                    arg.help(rust_i18n::t!("cli.compare.humor").to_string())
                })
                .mut_arg("tier", |arg| {
                    arg.help(rust_i18n::t!("cli.compare.tier").to_string())
                })
                .mut_arg("json", |arg| {
                    arg.help(rust_i18n::t!("cli.json").to_string())
                })
        })
        .mut_subcommand("chat", |cmd| {
            cmd.about(rust_i18n::t!("cli.chat").to_string())
                .mut_arg("comparison", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.comparison").to_string())
                })
                .mut_arg("title", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.title").to_string())
                })
                .mut_arg("languages", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.languages").to_string())
                })
                .mut_arg("history", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.history").to_string())
                })
                .mut_arg("message", |arg| {
                    arg.help(rust_i18n::t!("cli.chat.message").to_string())
                })
                .mut_arg("json", |arg| {
                    arg.help(rust_i18n::t!("cli.json").to_string())
                })
        })
        .mut_subcommand("init", |cmd| {
            cmd.about(rust_i18n::t!("cli.init").to_string())
                .mut_arg("force", |arg| {
                    arg.help(rust_i18n::t!("cli.init.force").to_string())
                })
        })
        .mut_subcommand("config", |cmd| {
            cmd.about(rust_i18n::t!("cli.config").to_string())
                .mut_subcommand("show", |s| {
                    s.about(rust_i18n::t!("cli.config.show").to_string())
                })
                .mut_subcommand("validate", |s| {
                    s.about(rust_i18n::t!("cli.config.validate").to_string())
                })
        });

    let matches = cmd.get_matches();
    Cli::from_arg_matches(&matches)
        .map_err(|e| anyhow::anyhow!("Failed to parse CLI arguments: {}", e))
}

/// Initialize locale early in the startup process
///
/// Priority order:
/// 1. Environment variable WIKILENS_UI_LANGUAGE (highest priority)
/// 2. Configuration file ui.language
/// 3. System locale detection
/// 4. Fallback to English
fn init_locale_early() {
    let locale = std::env::var("WIKILENS_UI_LANGUAGE")
        .ok()
        .or_else(|| get_language_from_config().ok())
        .or_else(detect_system_locale)
        .unwrap_or_else(|| "en".to_string());

    rust_i18n::set_locale(&locale);
}

/// Attempt to read language setting from config file
///
/// Only parses the ui.language field, without loading the entire configuration.
fn get_language_from_config() -> Result<String> {
    let config_path = config::get_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if !config_path.exists() {
        return Err(anyhow::anyhow!("Config file not found"));
    }

    let content = std::fs::read_to_string(&config_path)?;
    let config: toml::Value = toml::from_str(&content)?;

    config
        .get("ui")
        .and_then(|ui| ui.get("language"))
        .and_then(|lang| lang.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("ui.language not found in config"))
}

/// Detect system locale using sys-locale crate
///
/// Returns locale in BCP 47 format (e.g., "en", "zh-CN", "ja-JP")
fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().map(|locale| {
        // Normalize locale format: "zh_CN" -> "zh-CN"
        locale.replace('_', "-")
    })
}
