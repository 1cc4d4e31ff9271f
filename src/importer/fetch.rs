use crate::types::error::{ImportError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can turn a manifest source string into raw bytes.
pub trait Fetch {
    fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    FileUrl,
    LocalPath,
}

impl SourceKind {
    pub fn classify(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceKind::Http
        } else if lower.starts_with("file://") {
            SourceKind::FileUrl
        } else {
            SourceKind::LocalPath
        }
    }
}

/// HTTP(S) client plus filesystem reader.
pub struct Transport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl Transport {
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("addon-import/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Transport { client, timeout })
    }

    fn fetch_http(&self, source: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(source)
            .send()
            .map_err(|e| self.transport_error(source, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(source, format!("server responded with {}", status)));
        }

        let body = response
            .bytes()
            .map_err(|e| self.transport_error(source, e))?;
        Ok(body.to_vec())
    }

    fn transport_error(&self, source: &str, e: reqwest::Error) -> ImportError {
        if e.is_timeout() {
            fetch_error(
                source,
                format!("timed out after {}s", self.timeout.as_secs()),
            )
        } else {
            fetch_error(source, e.to_string())
        }
    }
}

impl Fetch for Transport {
    fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        match SourceKind::classify(source) {
            SourceKind::Http => self.fetch_http(source),
            SourceKind::FileUrl => read_local(source, file_url_to_path(source)?),
            SourceKind::LocalPath => read_local(source, PathBuf::from(source)),
        }
    }
}

fn file_url_to_path(source: &str) -> Result<PathBuf> {
    let url = reqwest::Url::parse(source)
        .map_err(|e| fetch_error(source, format!("invalid file URL: {}", e)))?;
    url.to_file_path()
        .map_err(|_| fetch_error(source, "file URL does not name a local path".to_string()))
}

fn read_local(source: &str, path: PathBuf) -> Result<Vec<u8>> {
    std::fs::read(&path)
        .map_err(|e| fetch_error(source, format!("failed to read {}: {}", path.display(), e)))
}

fn fetch_error(source: &str, reason: String) -> ImportError {
    ImportError::Fetch {
        source_ref: source.to_string(),
        reason,
    }
}
