//! HTTP(S) archive download.

use std::time::Duration;

use fda_model::SourceFiles;
use reqwest::StatusCode;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
};
use tracing::{debug, info, warn};

use crate::ArchiveFetcher;
use crate::error::{FetchError, Result};
use crate::extract::extract_archive;
use crate::retry::RetryPolicy;

/// Publisher download location for the Drugs@FDA archive.
pub const DEFAULT_SOURCE_URL: &str = "https://www.fda.gov/media/89850/download";

/// The publisher screens out obvious automation, so requests look like a browser.
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Downloads the archive over HTTP(S) with retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    url: String,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .default_headers(browser_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            policy,
        })
    }

    fn download(&self, attempt: u32) -> Result<Vec<u8>> {
        debug!(attempt, url = %self.url, "requesting archive");
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if is_screening_status(status) {
            warn!(status = status.as_u16(), "request screened or throttled by publisher");
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("text/html"));
        let body = response.bytes()?.to_vec();
        if is_html || looks_like_html(&body) {
            return Err(FetchError::Blocked);
        }
        Ok(body)
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<SourceFiles> {
        info!(url = %self.url, attempts = self.policy.max_attempts, "downloading source archive");
        let body = self.policy.run(|attempt| self.download(attempt))?;
        info!(bytes = body.len(), "source archive downloaded");
        extract_archive(&body)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,application/zip,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

fn looks_like_html(body: &[u8]) -> bool {
    let head = &body[..body.len().min(256)];
    let text = String::from_utf8_lossy(head).trim_start().to_ascii_lowercase();
    text.starts_with("<!doctype html") || text.starts_with("<html")
}

/// Statuses the publisher uses for throttling or screening.
fn is_screening_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_bodies_are_detected() {
        assert!(looks_like_html(b"  <!DOCTYPE html><html></html>"));
        assert!(looks_like_html(b"<HTML><body>denied</body>"));
        assert!(!looks_like_html(b"PK\x03\x04"));
    }

    #[test]
    fn headers_look_like_a_browser() {
        let headers = browser_headers();
        let agent = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(agent.starts_with("Mozilla/5.0"));
        assert!(headers.contains_key(ACCEPT_LANGUAGE));
    }

    #[test]
    fn screening_statuses() {
        assert!(is_screening_status(StatusCode::FORBIDDEN));
        assert!(!is_screening_status(StatusCode::NOT_FOUND));
    }
}
