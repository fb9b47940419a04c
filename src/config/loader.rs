// 配置加载逻辑
//
// 此文件负责从文件、环境变量和 provider key 变量加载配置。

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, Map, Value};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use super::structs::{AppConfig, PathName, PathsConfig, builtin_api_key_env};
use crate::error::Result;

/// 加载应用配置
///
/// 配置加载优先级（从高到低）：
/// 1. Provider key 变量（`OPENAI_API_KEY` 等），只填充尚未配置的 key
/// 2. 环境变量（WIKILENS__* 前缀，双下划线表示嵌套）
///    - 例如：`WIKILENS__PATHS__CHAT__MAX_TOKENS=800`
///    - 例如：`WIKILENS__UI__COLORED=false`
/// 3. `--config <FILE>` 指定的配置文件
/// 4. 用户配置文件（~/.config/wikilens/config.toml）
/// 5. 默认值（来自 structs 的 Default trait 和 serde(default) 属性）
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    load_config_from(get_config_path(), explicit)
}

/// 从指定的用户配置文件路径加载配置（便于测试）
pub fn load_config_from(user_file: Option<PathBuf>, explicit: Option<&Path>) -> Result<AppConfig> {
    let mut builder = with_path_defaults(Config::builder())?;

    // 1. 用户配置文件（如果存在）
    if let Some(config_path) = user_file
        && config_path.exists()
    {
        tracing::debug!("Loading config file: {}", config_path.display());
        builder = builder.add_source(File::from(config_path));
    }

    // 2. 显式指定的配置文件必须存在
    if let Some(path) = explicit {
        tracing::debug!("Loading explicit config file: {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    // 3. 加载环境变量（WIKILENS__*）
    // 例如：WIKILENS__LLM__PROVIDERS__OPENAI__API_KEY -> llm.providers.openai.api_key
    builder = builder.add_source(
        Environment::with_prefix("WIKILENS")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut app_config: AppConfig = config.try_deserialize()?;

    // 用户只声明了部分 provider 时补齐内置 provider
    app_config.llm.fill_builtin_providers();

    // 4. 内置 provider 的 key 变量
    apply_env_api_keys(&mut app_config);

    Ok(app_config)
}

/// 注册路径默认值
///
/// 文件只覆盖某条路径的部分字段时（例如只写 `max_tokens`），
/// 其余字段仍沿用该路径自己的默认值。
fn with_path_defaults(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>> {
    let defaults = PathsConfig::default();

    for name in PathName::ALL {
        let path = defaults.get(name);
        let prefix = format!("paths.{}", name);

        let candidates: Vec<Map<String, Value>> = path
            .candidates
            .iter()
            .map(|c| {
                let mut entry = Map::new();
                entry.insert("provider".to_string(), Value::from(c.provider.as_str()));
                entry.insert("model".to_string(), Value::from(c.model.as_str()));
                entry.insert("paid".to_string(), Value::from(c.paid));
                entry
            })
            .collect();

        builder = builder
            .set_default(format!("{}.candidates", prefix), candidates)?
            .set_default(
                format!("{}.temperature", prefix),
                f64::from(path.temperature),
            )?
            .set_default(
                format!("{}.max_tokens", prefix),
                i64::from(path.max_tokens),
            )?;

        if let Some(budget) = path.shaping_budget {
            builder = builder.set_default(format!("{}.shaping_budget", prefix), budget as i64)?;
        }
    }

    Ok(builder)
}

/// 用 `OPENAI_API_KEY` 等变量补齐尚未配置的 API key
fn apply_env_api_keys(config: &mut AppConfig) {
    for (name, provider) in config.llm.providers.iter_mut() {
        if provider.is_configured() {
            continue;
        }
        let Some(var) = builtin_api_key_env(name) else {
            continue;
        };
        if let Ok(key) = std::env::var(var)
            && !key.trim().is_empty()
        {
            tracing::debug!("Using {} for provider '{}'", var, name);
            provider.api_key = Some(key);
        }
    }
}

/// 获取配置文件路径
///
/// 返回 ~/.config/wikilens/config.toml
pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wikilens").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// 获取配置目录路径
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wikilens").map(|dirs| dirs.config_dir().to_path_buf())
}
