//! # 构建器模块
//!
//! - `template_builder` - 模板标记（extends / block / load static / static）的合成

pub mod template_builder;

// Re-export commonly used items for convenience
pub use template_builder::*;
