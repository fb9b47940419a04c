use std::fs;
use std::path::Path;

use crate::config;
use crate::error::{Result, WikilensError};
use crate::ui;

/// 示例配置
pub const EXAMPLE_CONFIG: &str = include_str!("../../templates/config.toml.example");

/// 初始化配置文件
pub fn run(force: bool, colored: bool) -> Result<()> {
    let config_dir = config::get_config_dir().ok_or_else(|| {
        WikilensError::Configuration(rust_i18n::t!("init.no_config_dir").to_string())
    })?;
    let config_file = config_dir.join("config.toml");

    if !write_config(&config_file, force)? {
        ui::warning(
            &rust_i18n::t!("init.exists", path = config_file.display().to_string()),
            colored,
        );
        println!();
        println!("{}", rust_i18n::t!("init.use_force"));
        return Ok(());
    }

    ui::success(
        &rust_i18n::t!("init.file_created", path = config_file.display().to_string()),
        colored,
    );

    println!();
    println!("{}", ui::info(&rust_i18n::t!("init.next_steps"), colored));
    println!("{}", rust_i18n::t!("init.step1"));
    println!("{}", rust_i18n::t!("init.step2"));
    Ok(())
}

/// 写入示例配置；文件已存在且未指定 `force` 时返回 `false`
pub fn write_config(config_file: &Path, force: bool) -> Result<bool> {
    if config_file.exists() && !force {
        return Ok(false);
    }

    if let Some(dir) = config_file.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(config_file, EXAMPLE_CONFIG)?;

    // 文件中可能保存 API key（仅 Unix 设置权限）
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(config_file)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(config_file, perms)?;
    }

    tracing::info!("Wrote starter config to {}", config_file.display());
    Ok(true)
}
