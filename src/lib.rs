//! # Templater Library
//!
//! 将独立的 HTML 页面转换为基于 block 的模板（Django 风格）。
//!
//! ## 模块组织
//!
//! - `core` - 错误类型、运行选项和页面级入口
//! - `parsers` - HTML 解析、资源引用扫描、区域提取
//! - `assets` - 资源命名、落地和引用重写
//! - `builders` - 模板标记合成
//! - `network` - 内容来源（文件系统和 HTTP）
//! - `utils` - URL 工具函数
//! - `env` / `config` - 环境变量和配置文件

pub mod assets;
pub mod builders;
pub mod config;
pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use assets::*;
pub use builders::*;
pub use crate::core::*;
pub use network::*;
pub use parsers::*;
pub use utils::*;
