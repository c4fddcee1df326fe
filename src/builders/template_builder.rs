//! 模板构建器模块
//!
//! 负责生成输出模板中的全部标记。标记语法是固定的，逐字节输出：
//!
//! - `{% extends 'base.html' %}`
//! - `{% block <name> %}` … `{% endblock %}`
//! - `{% load static %}`
//! - `{% static '<kind>/<name>' %}`

use crate::parsers::html::AssetKind;

pub const EXTENDS_DIRECTIVE: &str = "{% extends 'base.html' %}";
pub const LOAD_STATIC_DIRECTIVE: &str = "{% load static %}";
pub const END_BLOCK_TAG: &str = "{% endblock %}";

/// 基础页面中区域的占位标记，始终使用 `main` 而不是请求的 block 名称
pub const BASE_BLOCK_PLACEHOLDER: &str = "{% block main %}{% endblock %}";

/// `{% block <name> %}`
pub fn block_open_tag(block_name: &str) -> String {
    format!("{{% block {block_name} %}}")
}

/// `{% static '<kind>/<name>' %}`
pub fn static_reference_tag(kind: AssetKind, destination_name: &str) -> String {
    format!(
        "{{% static '{}/{}' %}}",
        kind.subdirectory(),
        destination_name
    )
}

/// Template builder bound to one block name
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    block_name: String,
}

impl TemplateBuilder {
    pub fn new(block_name: &str) -> Self {
        Self {
            block_name: block_name.to_string(),
        }
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// 页面已经是该 block 的叶子模板
    pub fn is_leaf_template(&self, html: &str) -> bool {
        html.contains(&block_open_tag(&self.block_name))
    }

    /// 页面已经是基础模板
    pub fn is_base_template(&self, html: &str) -> bool {
        html.contains(BASE_BLOCK_PLACEHOLDER)
    }

    /// 生成叶子模板
    ///
    /// ```text
    /// {% extends 'base.html' %}
    /// {% load static %}        <- 仅当找到资源时
    ///
    /// {% block <name> %}
    /// <content>
    /// {% endblock %}
    /// ```
    pub fn build_leaf(&self, content: &str, load_static: bool) -> String {
        let header = if load_static {
            format!("{LOAD_STATIC_DIRECTIVE}\n")
        } else {
            String::new()
        };

        format!(
            "{EXTENDS_DIRECTIVE}\n{header}\n{}\n{content}\n{END_BLOCK_TAG}",
            block_open_tag(&self.block_name)
        )
    }

    /// 生成基础模板：找到资源时在文档开头加上 load 指令
    pub fn build_base(&self, document: &str, load_static: bool) -> String {
        if load_static {
            format!("{LOAD_STATIC_DIRECTIVE}\n{document}")
        } else {
            document.to_string()
        }
    }
}
