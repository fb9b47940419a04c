//! # wikilens
//!
//! AI 生成的维基百科多语言版本对比。
//!
//! 同一词条在不同语言版本中的内容往往不同：篇幅、侧重点、甚至事实。
//! wikilens 把各语言版本的正文交给大模型，生成一份结构化的对比报告，
//! 并支持针对报告继续追问。
//!
//! ## 功能
//! - **对比**：按 free / premium 两档选择编排路径
//! - **追问**：基于已有对比结果的多轮对话
//! - **多 Provider**：OpenAI、OpenRouter、Groq（OpenAI 兼容）以及 Claude
//! - **顺序 Fallback**：可恢复的失败按配置顺序切换到下一个候选模型
//! - **国际化**：支持中英文
//!
//! ## 快速开始
//!
//! ### 作为 CLI 使用
//! ```bash
//! # 初始化配置
//! wikilens init
//!
//! # 对比两个语言版本
//! wikilens compare -a en=paris.en.txt -a fr=paris.fr.txt -l English --tier free
//!
//! # 追问
//! wikilens chat --comparison out.md --title Paris --languages en,fr -m "Which one is longer?"
//! ```
//!
//! ### 作为库使用
//! ```no_run
//! use std::collections::BTreeMap;
//! use wikilens::comparison::{ComparisonRequest, ComparisonService, Tier};
//! use wikilens::config::load_config;
//!
//! # async fn example() -> wikilens::error::Result<()> {
//! let config = load_config(None)?;
//! let service = ComparisonService::from_config(&config)?;
//!
//! let mut articles = BTreeMap::new();
//! articles.insert("en".to_string(), "Paris is the capital of France.".to_string());
//! articles.insert("fr".to_string(), "Paris est la capitale de la France.".to_string());
//!
//! let request = ComparisonRequest {
//!     articles,
//!     output_language: "English".to_string(),
//!     humor: false,
//!     tier: Tier::Free,
//! };
//! let outcome = service.compare(&request, None).await?;
//! println!("{} (by {})", outcome.text, outcome.model);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模块
//! - [`comparison`] - 对比与追问服务
//! - [`llm`] - 内容裁剪、prompt 构建、模型调用与 fallback
//! - [`commands`] - CLI 命令实现
//! - [`config`] - 配置管理
//! - [`error`] - 统一错误类型
//! - [`ui`] - 用户界面工具
//!
//! ## 配置
//! 配置文件位置：
//! - Linux: `~/.config/wikilens/config.toml`
//! - macOS: `~/Library/Application Support/wikilens/config.toml`
//! - Windows: `%APPDATA%\wikilens\config\config.toml`
//!
//! 示例配置：
//! ```toml
//! [llm.providers.openrouter]
//! api_key = "sk-or-..."
//!
//! [paths.chat]
//! max_tokens = 800
//! ```

#[macro_use]
extern crate rust_i18n;

pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod ui;

// Initialize i18n for library modules
i18n!("locales", fallback = "en");
