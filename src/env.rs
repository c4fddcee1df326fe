//! 统一的环境变量管理系统
//!
//! 类型安全、可验证的环境变量访问。命令行参数优先于这里的值，
//! 这里的值优先于配置文件。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 未设置时返回 `None`，设置了但无法解析时返回错误
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TEMPLATER_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }

    /// 配置文件路径
    pub struct ConfigPath;
    impl EnvVar<String> for ConfigPath {
        const NAME: &'static str = "TEMPLATER_CONFIG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the TOML configuration file to load";

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
            Ok(path.to_string())
        }
    }
}

/// 网络相关环境变量
pub mod network {
    use super::*;

    /// 请求超时（秒）
    pub struct Timeout;
    impl EnvVar<u64> for Timeout {
        const NAME: &'static str = "TEMPLATER_TIMEOUT";
        const DEFAULT: Option<u64> = Some(crate::core::DEFAULT_TIMEOUT);
        const DESCRIPTION: &'static str = "Network timeout in seconds (0 disables it)";

        fn parse(value: &str) -> EnvResult<u64> {
            value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid non-negative number".to_string(),
            })
        }
    }

    /// User-Agent 请求头
    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "TEMPLATER_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent header sent with remote requests";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

/// 资源相关环境变量
pub mod assets {
    use super::*;

    /// 下载远程资源
    pub struct DownloadRemote;
    impl EnvVar<bool> for DownloadRemote {
        const NAME: &'static str = "TEMPLATER_DOWNLOAD_REMOTE";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Download remote assets into the static folder";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 静态目录名
    pub struct StaticFolder;
    impl EnvVar<String> for StaticFolder {
        const NAME: &'static str = "TEMPLATER_STATIC_FOLDER";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Static folder for relocated assets";

        fn parse(value: &str) -> EnvResult<String> {
            let folder = value.trim();
            if folder.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Folder must not be empty".to_string(),
                });
            }
            Ok(folder.to_string())
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub config_path: Option<String>,
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub download_remote: Option<bool>,
    pub static_folder: Option<String>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
            config_path: core::ConfigPath::get_optional()?,
            timeout: network::Timeout::get_optional()?,
            user_agent: network::UserAgent::get_optional()?,
            download_remote: assets::DownloadRemote::get_optional()?,
            static_folder: assets::StaticFolder::get_optional()?,
        })
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    let entries = [
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION, "info".to_string()),
        (core::NoColor::NAME, core::NoColor::DESCRIPTION, format!("{:?}", core::NoColor::DEFAULT)),
        (core::ConfigPath::NAME, core::ConfigPath::DESCRIPTION, "-".to_string()),
        (network::Timeout::NAME, network::Timeout::DESCRIPTION, format!("{:?}", network::Timeout::DEFAULT)),
        (network::UserAgent::NAME, network::UserAgent::DESCRIPTION, "-".to_string()),
        (
            assets::DownloadRemote::NAME,
            assets::DownloadRemote::DESCRIPTION,
            format!("{:?}", assets::DownloadRemote::DEFAULT),
        ),
        (assets::StaticFolder::NAME, assets::StaticFolder::DESCRIPTION, "static".to_string()),
    ];

    for (name, description, default) in entries {
        docs.push_str(&format!("- `{}`: {} (default: {})\n", name, description, default));
    }

    docs
}
