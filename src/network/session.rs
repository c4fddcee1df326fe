use std::fs;
use std::io;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;

use crate::core::{TemplaterError, TemplaterOptions, TemplaterResult};
use crate::utils::url::{is_remote_reference, parse_remote_url};

/// Failures reported by a content source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure, bad status or unparsable URL
    #[error("unable to reach '{locator}': {reason}")]
    Unreachable { locator: String, reason: String },

    /// Missing local file
    #[error("'{0}' not found")]
    NotFound(String),

    /// Any other local read failure
    #[error("failed to read '{locator}': {source}")]
    Io {
        locator: String,
        #[source]
        source: io::Error,
    },
}

/// Anything able to turn a path or URL into bytes
pub trait ContentSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, SourceError>;
}

/// Blocking HTTP client plus filesystem reads
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(options: &TemplaterOptions) -> TemplaterResult<Session> {
        let mut header_map = HeaderMap::new();
        if let Some(user_agent) = &options.user_agent {
            let value = HeaderValue::from_str(user_agent).map_err(|_| {
                TemplaterError::Config(format!("invalid user agent \"{user_agent}\""))
            })?;
            header_map.insert(USER_AGENT, value);
        }

        let mut builder = Client::builder().default_headers(header_map);
        // 0 means no timeout at all
        builder = if options.timeout > 0 {
            builder.timeout(Duration::from_secs(options.timeout))
        } else {
            builder.timeout(None)
        };

        let client = builder
            .build()
            .map_err(|e| TemplaterError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Session { client })
    }

    fn fetch_remote(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        let unreachable = |reason: String| SourceError::Unreachable {
            locator: locator.to_string(),
            reason,
        };

        let url = parse_remote_url(locator).ok_or_else(|| unreachable("invalid URL".into()))?;

        tracing::debug!("fetching {}", url);
        let response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| unreachable(e.to_string()))?;

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| unreachable(e.to_string()))
    }

    fn fetch_local(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        fs::read(locator).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(locator.to_string())
            } else {
                SourceError::Io {
                    locator: locator.to_string(),
                    source: e,
                }
            }
        })
    }
}

impl ContentSource for Session {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, SourceError> {
        if is_remote_reference(locator) {
            self.fetch_remote(locator)
        } else {
            self.fetch_local(locator)
        }
    }
}
