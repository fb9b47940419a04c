use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::{self, AppConfig, PathName};
use crate::error::{Result, WikilensError};
use crate::llm::provider::ProviderRegistry;
use crate::llm::provider::utils::mask_api_key;
use crate::ui;

pub fn run(action: Option<ConfigAction>, explicit: Option<&Path>, colored: bool) -> Result<()> {
    // 默认行为：show
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => show(explicit),
        ConfigAction::Validate => validate(explicit, colored),
    }
}

/// 输出生效配置（TOML，API key 已脱敏）
fn show(explicit: Option<&Path>) -> Result<()> {
    let config = config::load_config(explicit)?;
    println!("{}", render_masked(&config)?);
    Ok(())
}

/// 渲染配置；`api_key` 不参与序列化，这里以脱敏形式补回
pub fn render_masked(config: &AppConfig) -> Result<String> {
    let mut value = toml::Value::try_from(config)
        .map_err(|e| WikilensError::Other(e.to_string()))?;

    if let Some(providers) = value
        .get_mut("llm")
        .and_then(|llm| llm.get_mut("providers"))
        .and_then(|p| p.as_table_mut())
    {
        for (name, table) in providers.iter_mut() {
            let key = config
                .llm
                .providers
                .get(name)
                .and_then(|p| p.api_key.as_deref());
            if let (Some(key), Some(table)) = (key, table.as_table_mut()) {
                table.insert("api_key".into(), toml::Value::String(mask_api_key(key)));
            }
        }
    }

    toml::to_string_pretty(&value).map_err(|e| WikilensError::Other(e.to_string()))
}

/// 校验配置并报告每条路径可用的候选数
fn validate(explicit: Option<&Path>, colored: bool) -> Result<()> {
    ui::step("1/2", &rust_i18n::t!("config.loading"), colored);
    let config = config::load_config(explicit)?;
    config.validate()?;
    ui::success(&rust_i18n::t!("config.loaded"), colored);
    println!();

    ui::step("2/2", &rust_i18n::t!("config.checking_paths"), colored);
    let registry = ProviderRegistry::from_config(&config.llm);
    let mut usable_paths = 0;

    for name in PathName::ALL {
        let path = config.paths.get(name);
        match registry.usable_candidates(name, path) {
            Ok(candidates) => {
                usable_paths += 1;
                ui::success(
                    &rust_i18n::t!(
                        "config.path_usable",
                        path = name.as_str(),
                        usable = candidates.len(),
                        total = path.candidates.len()
                    ),
                    colored,
                );
            }
            Err(e) => ui::warning(
                &rust_i18n::t!(
                    "config.path_unusable",
                    path = name.as_str(),
                    error = e.to_string()
                ),
                colored,
            ),
        }
    }

    if usable_paths == 0 {
        return Err(WikilensError::Configuration(
            rust_i18n::t!("config.no_usable_paths").to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_render_masks_keys() {
        let mut config = AppConfig::default();
        config.llm.providers.insert(
            "openrouter".into(),
            ProviderConfig {
                api_key: Some("sk-or-v1-0123456789abcdef".into()),
                ..Default::default()
            },
        );

        let rendered = render_masked(&config).unwrap();
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("sk-o...cdef"));
        assert!(rendered.contains("comparison_free"));
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let rendered = render_masked(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.paths, AppConfig::default().paths);
    }
}
