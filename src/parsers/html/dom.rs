use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use std::rc::Rc;

/// 将 HTML 文本解析为 DOM（容错解析，不会失败）
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some((node_name, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    match get_node_name(node) {
        Some(name) if name == *node_name => {
            if rest.is_empty() {
                found_nodes.push(node.clone());
                for child_node in node.children.borrow().iter() {
                    found_nodes.append(&mut find_nodes(child_node, node_names));
                }
            } else {
                for child_node in node.children.borrow().iter() {
                    found_nodes.append(&mut find_nodes(child_node, rest));
                }
            }
        }
        _ => {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, node_names));
            }
        }
    }

    found_nodes
}

/// 按属性谓词查找元素，结果保持文档顺序
///
/// `element_name` 为 `None` 时匹配任意元素；只有带有 `attr_name`
/// 属性且属性值满足 `predicate` 的元素才会被返回。
pub fn find_nodes_by_attr<F>(
    node: &Handle,
    element_name: Option<&str>,
    attr_name: &str,
    predicate: F,
) -> Vec<Handle>
where
    F: Fn(&Handle, &str) -> bool,
{
    let mut found_nodes = Vec::new();
    collect_nodes_by_attr(node, element_name, attr_name, &predicate, &mut found_nodes);
    found_nodes
}

fn collect_nodes_by_attr<F>(
    node: &Handle,
    element_name: Option<&str>,
    attr_name: &str,
    predicate: &F,
    found_nodes: &mut Vec<Handle>,
) where
    F: Fn(&Handle, &str) -> bool,
{
    if let Some(name) = get_node_name(node) {
        if element_name.map_or(true, |wanted| wanted == name) {
            if let Some(value) = get_node_attr(node, attr_name) {
                if predicate(node, &value) {
                    found_nodes.push(node.clone());
                }
            }
        }
    }

    for child_node in node.children.borrow().iter() {
        collect_nodes_by_attr(child_node, element_name, attr_name, predicate, found_nodes);
    }
}

/// 按 id 查找第一个匹配的元素
pub fn find_node_by_id(node: &Handle, id: &str) -> Option<Handle> {
    if get_node_attr(node, "id").as_deref() == Some(id) {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child_node| find_node_by_id(child_node, id))
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 移除节点的全部子节点
pub fn remove_children(node: &Handle) {
    let children = std::mem::take(&mut *node.children.borrow_mut());
    for child_node in children.iter() {
        child_node.parent.take();
    }
}

/// 用单个文本节点替换节点的全部内容
pub fn set_text_content(node: &Handle, text: &str) {
    remove_children(node);

    let text_node = Node::new(NodeData::Text {
        contents: std::cell::RefCell::new(StrTendril::from_slice(text)),
    });
    text_node.parent.set(Some(Rc::downgrade(node)));
    node.children.borrow_mut().push(text_node);
}
