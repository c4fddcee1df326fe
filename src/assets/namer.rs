//! 资源命名
//!
//! 本地引用直接使用路径末段；远程引用使用 URL 路径末段，
//! 路径为空时退回到主机名的主体部分（`cdn.example.com` → `example`）。
//! 样式表和脚本保证以 `.css` / `.js` 结尾，已有的其它扩展名不会被替换。
//! 命名不保证唯一：推导出相同名称的两个资源会相互覆盖。

use std::path::Path;

use percent_encoding::percent_decode_str;

use crate::parsers::html::AssetKind;
use crate::utils::url::{basename, is_remote_reference, parse_remote_url};

/// 推导资源在静态目录中的文件名
pub fn derive_asset_name(kind: AssetKind, original_text: &str) -> String {
    if !is_remote_reference(original_text) {
        return basename(original_text).to_string();
    }

    let candidate = match parse_remote_url(original_text) {
        Some(url) => {
            let encoded = basename(url.path());
            if encoded.is_empty() {
                reduce_host_name(url.host_str().unwrap_or_default())
            } else {
                decode_file_name(encoded)
            }
        }
        None => basename(original_text).to_string(),
    };

    enforce_extension(kind, candidate)
}

/// URL 路径是百分号编码的；解码后含路径分隔符时保留编码形式
fn decode_file_name(encoded: &str) -> String {
    let decoded = percent_decode_str(encoded).decode_utf8_lossy();
    if decoded.contains(['/', '\\']) {
        encoded.to_string()
    } else {
        decoded.into_owned()
    }
}

/// `example.com` → `example`, `cdn.example.com` → `example`, `localhost` → `localhost`
fn reduce_host_name(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();

    let name = match labels.len() {
        n if n > 2 => labels[n - 2],
        _ => labels[0],
    };

    name.to_string()
}

fn enforce_extension(kind: AssetKind, candidate: String) -> String {
    match kind.required_extension() {
        Some(extension)
            if Path::new(&candidate).extension().and_then(|e| e.to_str()) != Some(extension) =>
        {
            format!("{candidate}.{extension}")
        }
        _ => candidate,
    }
}
