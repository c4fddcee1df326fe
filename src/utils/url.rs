use std::sync::OnceLock;

use regex::Regex;
pub use url::Url;

/// Scheme assumed for protocol-relative (`//host/...`) references
pub const PROTOCOL_RELATIVE_SCHEME: &str = "https";

fn remote_reference_regex() -> &'static Regex {
    static REMOTE_REFERENCE: OnceLock<Regex> = OnceLock::new();
    REMOTE_REFERENCE.get_or_init(|| Regex::new(r"^(?:https?:)?//").unwrap())
}

/// Checks whether a reference points to a remote resource
///
/// `http://`, `https://` and protocol-relative `//` references are remote;
/// everything else is treated as a filesystem path relative to the page.
pub fn is_remote_reference(reference: &str) -> bool {
    remote_reference_regex().is_match(reference)
}

/// Checks whether a reference is an inline `data:` URL
pub fn is_data_url(reference: &str) -> bool {
    reference
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Parses a remote reference, filling in a scheme for protocol-relative ones
pub fn parse_remote_url(reference: &str) -> Option<Url> {
    if reference.starts_with("//") {
        Url::parse(&format!("{PROTOCOL_RELATIVE_SCHEME}:{reference}")).ok()
    } else {
        Url::parse(reference).ok()
    }
}

/// Resolves a reference found in a remote page against that page's URL
pub fn resolve_url(from: &Url, to: &str) -> Option<Url> {
    if is_remote_reference(to) {
        parse_remote_url(to)
    } else {
        from.join(to).ok()
    }
}

/// Returns the final `/`-separated segment of a path, possibly empty
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}
