//! # 资源模块
//!
//! 资源引用从扫描到重写的完整流程：
//!
//! - `namer` - 目标文件名推导（纯函数）
//! - `materializer` - 复制或下载资源到静态目录
//! - `rewrite` - 把文档中的原始引用替换为 static 标记

pub mod materializer;
pub mod namer;
pub mod rewrite;

// Re-export commonly used items for convenience
pub use materializer::{AssetBase, Materializer, ResolvedAsset};
pub use namer::derive_asset_name;
pub use rewrite::{RewriteEngine, RewriteOutcome};
