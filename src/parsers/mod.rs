//! # 解析器模块
//!
//! - `html` - HTML文档解析、DOM查询、资源引用扫描、区域提取

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    collect_asset_references, extract_base, extract_leaf, html_to_dom, serialize_document,
    serialize_node, AssetKind, AssetReference, AssetReferences,
};
