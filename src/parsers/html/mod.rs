//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作和查询
//! - `serializer`: 序列化功能
//! - `metadata`: 文档字符集
//! - `assets`: 资源引用扫描
//! - `region`: 区域提取
//! - `utils`: 基础工具函数和常量

pub mod assets;
pub mod dom;
pub mod metadata;
pub mod region;
pub mod serializer;
pub mod utils;

pub use assets::{collect_asset_references, AssetKind, AssetReference, AssetReferences};
pub use dom::{
    find_node_by_id, find_nodes, find_nodes_by_attr, get_node_attr, get_node_name,
    html_to_dom, remove_children, set_text_content,
};
pub use metadata::{get_charset, parse_content_type};
pub use region::{extract_base, extract_leaf, locate_region, Region};
pub use serializer::{serialize_document, serialize_node};
pub use utils::{rel_is_stylesheet, WHITESPACES};
