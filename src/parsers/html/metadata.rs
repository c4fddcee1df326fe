//! 文档元数据
//!
//! 目前只需要文档声明的字符集，用于解码页面和写回模板。

use markup5ever_rcdom::Handle;

use super::dom::{find_nodes, get_node_attr};

/// 获取文档声明的字符集
///
/// 依次检查 `<meta charset="...">` 和
/// `<meta http-equiv="content-type" content="text/html; charset=...">`。
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset) =
                    parse_content_type(&meta_content_type_node_attr_value);
                return Some(charset);
            }
        }
    }

    None
}

/// Parses Content-Type value into media type and charset
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or_default().trim().to_lowercase();
    let mut charset = String::new();

    for part in parts {
        let part = part.trim();
        if part
            .get(..8)
            .is_some_and(|key| key.eq_ignore_ascii_case("charset="))
        {
            charset = part[8..].trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}
