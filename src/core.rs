use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;

use crate::assets::materializer::AssetBase;
use crate::assets::rewrite::{RewriteEngine, RewriteOutcome};
use crate::builders::template_builder::{TemplateBuilder, BASE_BLOCK_PLACEHOLDER};
use crate::env::{core::NoColor, EnvVar};
use crate::network::session::{ContentSource, SourceError};
use crate::parsers::html::{extract_base, extract_leaf, get_charset, html_to_dom};
use crate::utils::url::{basename, is_remote_reference, parse_remote_url};

/// Represents errors that can occur while converting pages
#[derive(Debug, Error)]
pub enum TemplaterError {
    /// The requested block id is absent from the page
    #[error("Block with ID '{0}' not found in HTML page")]
    RegionNotFound(String),

    /// Missing page or missing local file
    #[error("'{0}' not found")]
    NotFound(String),

    /// Remote resource could not be retrieved
    #[error("Unable to download '{locator}': {reason}")]
    Unreachable { locator: String, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TemplaterError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        TemplaterError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<SourceError> for TemplaterError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Unreachable { locator, reason } => {
                TemplaterError::Unreachable { locator, reason }
            }
            SourceError::NotFound(locator) => TemplaterError::NotFound(locator),
            SourceError::Io { locator, source } => TemplaterError::Io {
                path: PathBuf::from(locator),
                source,
            },
        }
    }
}

pub type TemplaterResult<T> = Result<T, TemplaterError>;

/// Seconds to wait for a remote resource by default
pub const DEFAULT_TIMEOUT: u64 = 60;

/// Configuration options for page conversion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplaterOptions {
    /// Fetch remote assets into the static directory instead of leaving them as is
    pub download_remote: bool,
    /// Copy local assets into the static directory (references are rewritten either way)
    pub copy_assets: bool,
    /// Network timeout in seconds, 0 disables it
    pub timeout: u64,
    pub user_agent: Option<String>,
}

impl Default for TemplaterOptions {
    fn default() -> Self {
        Self {
            download_remote: false,
            copy_assets: true,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
const PAGE_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// A fetched and decoded input page
#[derive(Clone, Debug)]
pub struct Page {
    pub locator: String,
    pub text: String,
    pub encoding: &'static Encoding,
}

impl Page {
    /// Fetches a page from a path or URL
    pub fn load(source: &dyn ContentSource, locator: &str) -> TemplaterResult<Page> {
        let data = source.fetch(locator)?;
        Ok(Page::from_bytes(locator, &data))
    }

    /// Decodes page bytes, honouring a charset declared inside the document
    pub fn from_bytes(locator: &str, data: &[u8]) -> Page {
        let text = String::from_utf8_lossy(data).into_owned();
        let dom = html_to_dom(&text);

        if let Some(charset) = get_charset(&dom.document) {
            if let Some(encoding) = Encoding::for_label_no_replacement(charset.as_bytes()) {
                if encoding != UTF_8 {
                    let (decoded, _, _) = encoding.decode(data);
                    return Page {
                        locator: locator.to_string(),
                        text: decoded.into_owned(),
                        encoding,
                    };
                }
            }
        }

        Page {
            locator: locator.to_string(),
            text,
            encoding: UTF_8,
        }
    }

    pub fn is_remote(&self) -> bool {
        is_remote_reference(&self.locator)
    }

    /// Where local asset references of this page are resolved from
    pub fn asset_base(&self) -> TemplaterResult<AssetBase> {
        if self.is_remote() {
            parse_remote_url(&self.locator)
                .map(AssetBase::Remote)
                .ok_or_else(|| TemplaterError::InvalidUrl(self.locator.clone()))
        } else {
            let directory = Path::new(&self.locator)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok(AssetBase::Directory(directory))
        }
    }

    /// File name of the page itself (`index.html` for URLs without one)
    pub fn file_name(&self) -> String {
        let name = if self.is_remote() {
            parse_remote_url(&self.locator)
                .map(|url| basename(url.path()).to_string())
                .unwrap_or_default()
        } else {
            Path::new(&self.locator)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        if name.is_empty() {
            "index.html".to_string()
        } else {
            name
        }
    }

    /// Leaf template file name: page stem + `.html`
    pub fn template_name(&self) -> String {
        let file_name = self.file_name();
        let stem = Path::new(&file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(file_name);

        format!("{stem}.html")
    }

    /// Encodes output text back into the page's own charset
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let (data, _, _) = self.encoding.encode(text);
        data.into_owned()
    }
}

/// Result of a template conversion
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateOutcome {
    /// Input already carries the target block marker; nothing to do
    AlreadyTemplate,
    Rendered(String),
}

/// Converts pages into base/leaf templates, relocating their assets
pub struct PageConverter<'a> {
    source: &'a dyn ContentSource,
    static_dir: &'a Path,
    options: &'a TemplaterOptions,
}

impl<'a> PageConverter<'a> {
    pub fn new(
        source: &'a dyn ContentSource,
        static_dir: &'a Path,
        options: &'a TemplaterOptions,
    ) -> Self {
        Self {
            source,
            static_dir,
            options,
        }
    }

    /// Base template: the whole page with its region blanked to the `main` placeholder
    pub fn base_template(&self, page: &Page, block_name: &str) -> TemplaterResult<TemplateOutcome> {
        let builder = TemplateBuilder::new(block_name);
        if builder.is_base_template(&page.text) {
            return Ok(TemplateOutcome::AlreadyTemplate);
        }

        let dom = html_to_dom(&page.text);
        let document = extract_base(&dom, block_name, BASE_BLOCK_PLACEHOLDER)?;

        let outcome = self.rewrite_assets(page, &document)?;
        let load_static = outcome.found_any();
        let document = outcome.into_text(&document);

        Ok(TemplateOutcome::Rendered(
            builder.build_base(&document, load_static),
        ))
    }

    /// Leaf template: the region alone, wrapped in block markers extending the base
    pub fn leaf_template(&self, page: &Page, block_name: &str) -> TemplaterResult<TemplateOutcome> {
        let builder = TemplateBuilder::new(block_name);
        if builder.is_leaf_template(&page.text) {
            return Ok(TemplateOutcome::AlreadyTemplate);
        }

        let dom = html_to_dom(&page.text);
        let content = extract_leaf(&dom, block_name)?;

        let outcome = self.rewrite_assets(page, &content)?;
        let load_static = outcome.found_any();
        let content = outcome.into_text(&content);

        Ok(TemplateOutcome::Rendered(
            builder.build_leaf(&content, load_static),
        ))
    }

    /// Asset references of the whole page rewritten, nothing else touched
    pub fn rewrite_page(&self, page: &Page) -> TemplaterResult<String> {
        let outcome = self.rewrite_assets(page, &page.text)?;
        Ok(outcome.into_text(&page.text))
    }

    fn rewrite_assets(&self, page: &Page, html: &str) -> TemplaterResult<RewriteOutcome> {
        let base = page.asset_base()?;
        RewriteEngine::new(self.source, &base, self.static_dir, self.options).rewrite(html)
    }

    /// Converts the master page into `<output_dir>/base.html`
    ///
    /// Returns `None` when the page already is a base template.
    pub fn write_base_template(
        &self,
        locator: &str,
        block_name: &str,
        output_dir: &Path,
    ) -> TemplaterResult<Option<PathBuf>> {
        let page = Page::load(self.source, locator)?;

        match self.base_template(&page, block_name)? {
            TemplateOutcome::AlreadyTemplate => {
                tracing::info!("{} is already a base template, skipping", locator);
                Ok(None)
            }
            TemplateOutcome::Rendered(text) => {
                let path = output_dir.join("base.html");
                write_output(&path, &page.encode(&text))?;
                tracing::info!("{} -> {}", locator, path.display());
                Ok(Some(path))
            }
        }
    }

    /// Converts a page into `<output_dir>/<page stem>.html`
    ///
    /// Returns `None` when the page already is a leaf template for `block_name`.
    pub fn write_leaf_template(
        &self,
        locator: &str,
        block_name: &str,
        output_dir: &Path,
    ) -> TemplaterResult<Option<PathBuf>> {
        let page = Page::load(self.source, locator)?;

        match self.leaf_template(&page, block_name)? {
            TemplateOutcome::AlreadyTemplate => {
                tracing::info!("{} is already a template, skipping", locator);
                Ok(None)
            }
            TemplateOutcome::Rendered(text) => {
                let path = output_dir.join(page.template_name());
                write_output(&path, &page.encode(&text))?;
                tracing::info!("{} -> {}", locator, path.display());
                Ok(Some(path))
            }
        }
    }

    /// Rewrites a page's assets into `<output_dir>/<page file name>`
    pub fn write_rewritten_page(&self, locator: &str, output_dir: &Path) -> TemplaterResult<PathBuf> {
        let page = Page::load(self.source, locator)?;
        let text = self.rewrite_page(&page)?;

        let path = output_dir.join(page.file_name());
        write_output(&path, &page.encode(&text))?;
        tracing::info!("{} -> {}", locator, path.display());
        Ok(path)
    }
}

/// Creates a directory and its parents; an existing one is fine
pub fn ensure_directory(path: &Path) -> TemplaterResult<()> {
    fs::create_dir_all(path).map_err(|e| TemplaterError::io(path, e))
}

fn write_output(path: &Path, data: &[u8]) -> TemplaterResult<()> {
    fs::write(path, data).map_err(|e| TemplaterError::io(path, e))
}

/// Keeps arguments that are existing `.html`/`.htm` files, in the given order
pub fn scan_pages<S: AsRef<str>>(arguments: &[S]) -> Vec<String> {
    let mut pages = Vec::new();

    for argument in arguments {
        let argument = argument.as_ref();
        let path = Path::new(argument);
        let is_page = path.is_file()
            && path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| PAGE_EXTENSIONS.contains(&extension));

        if is_page {
            pages.push(argument.to_string());
        } else {
            tracing::warn!("Skipping '{}': not an HTML file", argument);
        }
    }

    pages
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    if NoColor::get_or_default(false) {
        eprintln!("{msg}");
    } else {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    }
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
