//! # 网络模块
//!
//! 页面和远程资源的内容来源：
//!
//! - `session` - `ContentSource` 接口及其基于 HTTP 客户端和文件系统的实现

pub mod session;

// Re-export commonly used items for convenience
pub use session::{ContentSource, Session, SourceError};
