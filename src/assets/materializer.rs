//! 资源落地
//!
//! 每个引用按扫描顺序处理：
//! - 本地引用：复制到 `static/<kind>/<name>`（`copy_assets` 关闭时只计算占位标记）
//! - 远程引用且未开启下载：跳过，原文保留
//! - 远程引用且开启下载：经内容来源获取；网络失败只记录警告并跳过该资源
//!
//! 下载的数据先写入同目录下的临时文件，再原子地移动到目标位置；
//! 临时文件由守卫持有，任何失败路径上都会被删除。

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::builders::template_builder::static_reference_tag;
use crate::core::{ensure_directory, TemplaterError, TemplaterOptions, TemplaterResult};
use crate::network::session::{ContentSource, SourceError};
use crate::parsers::html::AssetReference;
use crate::utils::url::{is_remote_reference, resolve_url, Url};

use super::namer::derive_asset_name;

/// 本地引用的解析基准
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetBase {
    /// 页面所在目录
    Directory(PathBuf),
    /// 远程页面的 URL；本地引用相对它解析并经内容来源获取
    Remote(Url),
}

/// 一个已处理（未被跳过）的资源
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub reference: AssetReference,
    pub is_remote: bool,
    pub destination_name: String,
    pub destination_path: PathBuf,
    pub placeholder: String,
}

pub struct Materializer<'a> {
    source: &'a dyn ContentSource,
    base: &'a AssetBase,
    static_dir: &'a Path,
    download_remote: bool,
    copy_assets: bool,
}

impl<'a> Materializer<'a> {
    pub fn new(
        source: &'a dyn ContentSource,
        base: &'a AssetBase,
        static_dir: &'a Path,
        options: &TemplaterOptions,
    ) -> Self {
        Self {
            source,
            base,
            static_dir,
            download_remote: options.download_remote,
            copy_assets: options.copy_assets,
        }
    }

    /// 处理单个引用；`Ok(None)` 表示该引用被跳过，原文应保持不变
    pub fn materialize(&self, reference: &AssetReference) -> TemplaterResult<Option<ResolvedAsset>> {
        let original_text = reference.original_text.as_str();
        let is_remote = is_remote_reference(original_text);

        if is_remote && !self.download_remote {
            tracing::debug!("leaving remote asset '{}' as is", original_text);
            return Ok(None);
        }

        let destination_name = derive_asset_name(reference.kind, original_text);
        let kind_dir = self.static_dir.join(reference.kind.subdirectory());
        let destination_path = kind_dir.join(&destination_name);

        if is_remote {
            let data = match self.source.fetch(original_text) {
                Ok(data) => data,
                Err(SourceError::Unreachable { locator, reason }) => {
                    tracing::warn!("Unable to download '{}': {}", locator, reason);
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            ensure_directory(&kind_dir)?;
            persist_download(&kind_dir, &destination_path, &data)?;
        } else {
            ensure_directory(&kind_dir)?;
            if self.copy_assets {
                self.copy_local(original_text, &kind_dir, &destination_path)?;
            }
        }

        tracing::debug!(
            "{} -> {}",
            original_text,
            destination_path.display()
        );

        Ok(Some(ResolvedAsset {
            reference: reference.clone(),
            is_remote,
            placeholder: static_reference_tag(reference.kind, &destination_name),
            destination_name,
            destination_path,
        }))
    }

    fn copy_local(
        &self,
        original_text: &str,
        kind_dir: &Path,
        destination_path: &Path,
    ) -> TemplaterResult<()> {
        match self.base {
            AssetBase::Directory(directory) => {
                let origin = directory.join(original_text);
                fs::copy(&origin, destination_path)
                    .map_err(|e| TemplaterError::io(&origin, e))?;
            }
            AssetBase::Remote(page_url) => {
                let asset_url = resolve_url(page_url, original_text)
                    .ok_or_else(|| TemplaterError::InvalidUrl(original_text.to_string()))?;
                let data = self.source.fetch(asset_url.as_str())?;
                persist_download(kind_dir, destination_path, &data)?;
            }
        }

        Ok(())
    }
}

fn persist_download(directory: &Path, destination_path: &Path, data: &[u8]) -> TemplaterResult<()> {
    let mut buffer =
        NamedTempFile::new_in(directory).map_err(|e| TemplaterError::io(directory, e))?;
    let buffer_path = buffer.path().to_path_buf();

    buffer
        .write_all(data)
        .map_err(|e| TemplaterError::io(&buffer_path, e))?;
    buffer
        .flush()
        .map_err(|e| TemplaterError::io(&buffer_path, e))?;

    // On failure the returned handle drops and removes the temporary file
    buffer
        .persist(destination_path)
        .map_err(|e| TemplaterError::io(destination_path, e.error))?;

    Ok(())
}
