//! HTML 资源引用扫描
//!
//! 从解析后的文档中按文档顺序收集三类资源引用：
//! - 样式表（`<link rel="stylesheet" href>`）
//! - 脚本（`<script src>`）
//! - 图片（`<img src>`）
//!
//! 空值和 `data:` 内联资源不算作引用：它们没有可以迁移的文件，
//! 而空字符串的文本替换会破坏整个文档。

use markup5ever_rcdom::Handle;

use crate::utils::url::is_data_url;

use super::dom::{find_nodes_by_attr, get_node_attr};
use super::utils::rel_is_stylesheet;

/// 资源类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Stylesheet,
    Script,
    Image,
}

impl AssetKind {
    /// Processing order used by the rewrite engine
    pub const ALL: [AssetKind; 3] = [AssetKind::Stylesheet, AssetKind::Script, AssetKind::Image];

    /// 静态目录下的子目录名
    pub fn subdirectory(self) -> &'static str {
        match self {
            AssetKind::Stylesheet => "css",
            AssetKind::Script => "js",
            AssetKind::Image => "img",
        }
    }

    /// 目标文件名必须带有的扩展名（图片不强制）
    pub fn required_extension(self) -> Option<&'static str> {
        match self {
            AssetKind::Stylesheet => Some("css"),
            AssetKind::Script => Some("js"),
            AssetKind::Image => None,
        }
    }
}

/// 文档中的一个资源引用，`original_text` 为属性原值
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetReference {
    pub kind: AssetKind,
    pub original_text: String,
}

/// 扫描结果：每类引用各自按文档顺序排列
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetReferences {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub images: Vec<String>,
}

impl AssetReferences {
    pub fn of_kind(&self, kind: AssetKind) -> &[String] {
        match kind {
            AssetKind::Stylesheet => &self.stylesheets,
            AssetKind::Script => &self.scripts,
            AssetKind::Image => &self.images,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty() && self.scripts.is_empty() && self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stylesheets.len() + self.scripts.len() + self.images.len()
    }

    /// 样式表、脚本、图片依次展开
    pub fn iter(&self) -> impl Iterator<Item = AssetReference> + '_ {
        AssetKind::ALL.into_iter().flat_map(move |kind| {
            self.of_kind(kind).iter().map(move |original_text| AssetReference {
                kind,
                original_text: original_text.clone(),
            })
        })
    }
}

fn is_asset_reference(value: &str) -> bool {
    !value.trim().is_empty() && !is_data_url(value)
}

fn attr_values(nodes: Vec<Handle>, attr_name: &str) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|node| get_node_attr(node, attr_name))
        .collect()
}

/// 收集文档中的全部资源引用
pub fn collect_asset_references(document: &Handle) -> AssetReferences {
    let stylesheet_links = find_nodes_by_attr(document, Some("link"), "href", |node, href| {
        is_asset_reference(href)
            && get_node_attr(node, "rel").is_some_and(|rel| rel_is_stylesheet(&rel))
    });
    let scripts = find_nodes_by_attr(document, Some("script"), "src", |_, src| {
        is_asset_reference(src)
    });
    let images = find_nodes_by_attr(document, Some("img"), "src", |_, src| {
        is_asset_reference(src)
    });

    AssetReferences {
        stylesheets: attr_values(stylesheet_links, "href"),
        scripts: attr_values(scripts, "src"),
        images: attr_values(images, "src"),
    }
}
