//! Top-level application configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::llm::LLMConfig;
use super::network::NetworkConfig;
use super::paths::PathsConfig;

/// Application configuration.
///
/// Effective configuration is merged from multiple sources (low to high):
/// 1. Rust defaults (`Default` + `serde(default)`)
/// 2. User-level config file (platform-specific config directory)
/// 3. Explicit `--config <FILE>`
/// 4. `WIKILENS__*` environment variables
/// 5. Well-known provider key variables (`OPENAI_API_KEY`, `OPENROUTER_API_KEY`, ...)
///
/// # Configuration File Locations
/// - Linux: `~/.config/wikilens/config.toml`
/// - macOS: `~/Library/Application Support/wikilens/config.toml`
/// - Windows: `%APPDATA%\wikilens\config\config.toml`
///
/// # Example
/// ```toml
/// [llm.providers.openrouter]
/// api_key = "sk-or-..."
///
/// [paths.chat]
/// max_tokens = 800
///
/// [ui]
/// colored = true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Provider endpoints and credentials.
    #[serde(default)]
    pub llm: LLMConfig,

    /// Named orchestration paths.
    #[serde(default)]
    pub paths: PathsConfig,

    /// HTTP timeout settings.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Terminal UI behavior.
    #[serde(default)]
    pub ui: UIConfig,
}

impl AppConfig {
    /// Validates configuration consistency.
    pub fn validate(&self) -> Result<()> {
        for (name, provider) in &self.llm.providers {
            provider.validate(name)?;
        }
        self.paths.validate(&self.llm)?;
        self.network.validate()?;
        Ok(())
    }
}

/// UI configuration.
///
/// # Fields
/// - `colored`: enable colored output (default: `true`)
/// - `language`: UI language in BCP 47 format (for example `"en"`, `"zh-CN"`), auto-detected by default
///
/// # Example
/// ```toml
/// [ui]
/// colored = false
/// language = "zh-CN"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UIConfig {
    /// Whether to enable color output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// UI language; `None` means auto-detect from system locale.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            colored: true,
            language: None,
        }
    }
}

fn default_true() -> bool {
    true
}
