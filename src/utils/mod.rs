//! # 工具模块
//!
//! - `url` - 远程/本地引用判定、URL 解析、路径末段提取

pub mod url;

// Re-export commonly used items for convenience
pub use self::url::{
    basename, is_data_url, is_remote_reference, parse_remote_url, resolve_url, Url,
};
