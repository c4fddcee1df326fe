//! 资源引用重写
//!
//! 解析文档只用于扫描引用；重写是对输入文本的整段字面替换：
//! 每个被处理的引用，其原文在文本中的所有出现都会被替换为 static 标记，
//! 包括不在资源属性中的偶然出现。文本相同的多个引用只落地一次。

use std::collections::HashSet;
use std::path::Path;

use crate::core::{TemplaterOptions, TemplaterResult};
use crate::network::session::ContentSource;
use crate::parsers::html::{collect_asset_references, html_to_dom};

use super::materializer::{AssetBase, Materializer, ResolvedAsset};

/// 重写结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// 文档中至少有一个资源引用（即使全部被跳过）
    Found {
        text: String,
        resolved: Vec<ResolvedAsset>,
    },
    /// 文档中没有任何资源引用，未做任何处理
    NotFound,
}

impl RewriteOutcome {
    pub fn found_any(&self) -> bool {
        matches!(self, RewriteOutcome::Found { .. })
    }

    /// 重写后的文本；没有资源时返回原文
    pub fn into_text(self, original: &str) -> String {
        match self {
            RewriteOutcome::Found { text, .. } => text,
            RewriteOutcome::NotFound => original.to_string(),
        }
    }
}

pub struct RewriteEngine<'a> {
    materializer: Materializer<'a>,
}

impl<'a> RewriteEngine<'a> {
    pub fn new(
        source: &'a dyn ContentSource,
        base: &'a AssetBase,
        static_dir: &'a Path,
        options: &TemplaterOptions,
    ) -> Self {
        Self {
            materializer: Materializer::new(source, base, static_dir, options),
        }
    }

    pub fn rewrite(&self, html: &str) -> TemplaterResult<RewriteOutcome> {
        let dom = html_to_dom(html);
        let references = collect_asset_references(&dom.document);

        if references.is_empty() {
            return Ok(RewriteOutcome::NotFound);
        }

        tracing::debug!("found {} asset reference(s)", references.len());

        let mut resolved: Vec<ResolvedAsset> = Vec::new();
        let mut seen = HashSet::new();

        for reference in references.iter() {
            // 相同原文只落地一次，替换时每处出现各自得到一个标记
            if !seen.insert(reference.original_text.clone()) {
                continue;
            }
            if let Some(asset) = self.materializer.materialize(&reference)? {
                resolved.push(asset);
            }
        }

        let text = substitute_references(html, &resolved);
        Ok(RewriteOutcome::Found { text, resolved })
    }
}

/// 单次从左到右扫描，把每处原文替换为对应标记
///
/// 已插入的标记不会再被扫描，所以原文是标记子串时也不会嵌套替换。
/// 同一位置有多个原文匹配时取最长的一个。
fn substitute_references(html: &str, resolved: &[ResolvedAsset]) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    loop {
        let next = resolved
            .iter()
            .filter(|asset| !asset.reference.original_text.is_empty())
            .filter_map(|asset| {
                rest.find(asset.reference.original_text.as_str())
                    .map(|index| (index, asset))
            })
            .min_by(|(a_index, a), (b_index, b)| {
                a_index.cmp(b_index).then_with(|| {
                    b.reference
                        .original_text
                        .len()
                        .cmp(&a.reference.original_text.len())
                })
            });

        match next {
            Some((index, asset)) => {
                output.push_str(&rest[..index]);
                output.push_str(&asset.placeholder);
                rest = &rest[index + asset.reference.original_text.len()..];
            }
            None => {
                output.push_str(rest);
                break;
            }
        }
    }

    output
}
