//! 配置文件加载
//!
//! 优先级从低到高：内置默认值 → 配置文件 → `.env` 与环境变量 → 命令行参数。

use std::path::{Path, PathBuf};

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::core::{TemplaterError, TemplaterOptions, TemplaterResult, DEFAULT_TIMEOUT};
use crate::env::EnvConfig;

/// 配置文件搜索路径（按顺序，第一个存在的生效）
pub const CONFIG_PATHS: &[&str] = &["./templater.toml", "~/.config/templater/config.toml"];

/// 按优先级加载的 `.env` 文件
pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

pub const DEFAULT_OUTPUT_DIR: &str = "templates";
pub const DEFAULT_STATIC_FOLDER: &str = "static";

/// 合并后的配置，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub output_dir: Option<String>,
    pub static_folder: Option<String>,
    pub download_remote: Option<bool>,
    pub copy_assets: Option<bool>,
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// 解析 TOML 配置文本
    pub fn from_toml_str(text: &str) -> TemplaterResult<Self> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(config_error)
    }

    /// 按优先级合并各层配置
    ///
    /// 配置文件作为数据源，环境变量层和命令行层作为覆盖值依次写入，
    /// 后写入的覆盖先写入的。
    pub fn load(config_file: Option<&Path>, env: &EnvConfig, cli: &Settings) -> TemplaterResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            tracing::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let builder = add_overrides(builder, &env_layer(env))
            .and_then(|builder| add_overrides(builder, cli))
            .map_err(config_error)?;

        builder
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(|e| match config_file {
                Some(path) => TemplaterError::Config(format!("{}: {}", path.display(), e)),
                None => config_error(e),
            })
    }

    pub fn output_dir_or_default(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn static_folder_or_default(&self) -> &str {
        self.static_folder.as_deref().unwrap_or(DEFAULT_STATIC_FOLDER)
    }

    /// 生成运行选项；`copy_assets` 未配置时取 `copy_assets_default`
    pub fn options(&self, copy_assets_default: bool) -> TemplaterOptions {
        TemplaterOptions {
            download_remote: self.download_remote.unwrap_or(false),
            copy_assets: self.copy_assets.unwrap_or(copy_assets_default),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent: self.user_agent.clone().filter(|ua| !ua.is_empty()),
        }
    }
}

/// 查找配置文件
///
/// 显式给出的路径必须存在；否则依次尝试 [`CONFIG_PATHS`]，都不存在时返回 `None`。
pub fn find_config_file(explicit: Option<&str>) -> TemplaterResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
        if !expanded.is_file() {
            return Err(TemplaterError::Config(format!(
                "config file '{}' does not exist",
                expanded.display()
            )));
        }
        return Ok(Some(expanded));
    }

    for path in CONFIG_PATHS {
        let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
        if expanded.is_file() {
            return Ok(Some(expanded));
        }
    }

    Ok(None)
}

/// 环境变量层（TEMPLATER_* 已由 [`EnvConfig`] 解析和校验）
fn env_layer(env: &EnvConfig) -> Settings {
    Settings {
        output_dir: None,
        static_folder: env.static_folder.clone(),
        download_remote: env.download_remote,
        copy_assets: None,
        timeout: env.timeout,
        user_agent: env.user_agent.clone(),
    }
}

fn add_overrides(
    builder: ConfigBuilder<DefaultState>,
    layer: &Settings,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("output_dir", layer.output_dir.clone())?
        .set_override_option("static_folder", layer.static_folder.clone())?
        .set_override_option("download_remote", layer.download_remote)?
        .set_override_option("copy_assets", layer.copy_assets)?
        .set_override_option("timeout", layer.timeout)?
        .set_override_option("user_agent", layer.user_agent.clone())
}

fn config_error(error: ConfigError) -> TemplaterError {
    TemplaterError::Config(error.to_string())
}

/// 加载 `.env` 文件，找到第一个存在的即停止
pub fn load_dotenv() {
    for env_file in ENV_FILES {
        if Path::new(env_file).exists() {
            match dotenv::from_filename(env_file) {
                Ok(_) => {
                    tracing::debug!("Loaded environment file {}", env_file);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Unable to load environment file {}: {}", env_file, e);
                }
            }
        }
    }
}
