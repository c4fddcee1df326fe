use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

/// 序列化整个文档
pub fn serialize_document(dom: &RcDom) -> String {
    serialize_handle(&dom.document, TraversalScope::ChildrenOnly(None))
}

/// 序列化单个元素（包含元素本身）
pub fn serialize_node(node: &Handle) -> String {
    serialize_handle(node, TraversalScope::IncludeNode)
}

fn serialize_handle(handle: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    serialize(
        &mut buf,
        &serializable,
        SerializeOpts {
            traversal_scope,
            ..Default::default()
        },
    )
    .expect("Unable to serialize DOM into buffer");

    String::from_utf8_lossy(&buf).into_owned()
}
