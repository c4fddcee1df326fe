//! 区域提取
//!
//! 区域是文档中 `id` 等于 block 名称的第一个元素。
//! 叶子页面只保留该元素本身；基础页面清空该元素并写入占位标记，
//! 然后序列化整个文档。

use markup5ever_rcdom::{Handle, RcDom};

use crate::core::{TemplaterError, TemplaterResult};

use super::dom::{find_node_by_id, remove_children, set_text_content};
use super::serializer::{serialize_document, serialize_node};

/// 文档中被提取的区域
pub struct Region {
    pub id: String,
    pub node: Handle,
}

/// 定位 id 为 `block_id` 的第一个元素
pub fn locate_region(dom: &RcDom, block_id: &str) -> TemplaterResult<Region> {
    find_node_by_id(&dom.document, block_id)
        .map(|node| Region {
            id: block_id.to_string(),
            node,
        })
        .ok_or_else(|| TemplaterError::RegionNotFound(block_id.to_string()))
}

/// 序列化区域元素（叶子页面内容）
pub fn extract_leaf(dom: &RcDom, block_id: &str) -> TemplaterResult<String> {
    let region = locate_region(dom, block_id)?;
    Ok(serialize_node(&region.node))
}

/// 清空区域、写入占位文本，再序列化整个文档（基础页面）
pub fn extract_base(dom: &RcDom, block_id: &str, placeholder: &str) -> TemplaterResult<String> {
    let region = locate_region(dom, block_id)?;
    remove_children(&region.node);
    set_text_content(&region.node, placeholder);
    tracing::debug!("blanked region '{}'", region.id);
    Ok(serialize_document(dom))
}
