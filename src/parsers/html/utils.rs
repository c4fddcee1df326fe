/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 检查 `rel` 属性是否声明了样式表
pub fn rel_is_stylesheet(rel: &str) -> bool {
    rel.split(WHITESPACES)
        .any(|link_type| link_type.eq_ignore_ascii_case("stylesheet"))
}
