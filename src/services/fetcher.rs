use std::time::Duration;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Missing url parameter")]
    MissingUrl,

    #[error("Invalid url parameter")]
    InvalidUrl,

    #[error("upstream returned {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("page is larger than {limit} bytes")]
    TooLarge { limit: usize },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err.without_url().to_string())
        }
    }
}

/// Single-shot page retrieval. No retries and no caching.
#[derive(Clone)]
pub struct Fetcher {
    http: reqwest::Client,
    max_page_bytes: usize,
}

impl Fetcher {
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_client(http, config.max_page_bytes))
    }

    pub fn with_client(http: reqwest::Client, max_page_bytes: usize) -> Self {
        Self {
            http,
            max_page_bytes,
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_target(url)?;

        tracing::debug!(url = %parsed, "fetching recipe page");
        let mut response = self.http.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_page_bytes as u64)
        {
            return Err(FetchError::TooLarge {
                limit: self.max_page_bytes,
            });
        }

        // Content-Length is absent on chunked replies, so the cap is enforced while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_page_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_page_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Validate a target before any network I/O happens.
pub fn parse_target(url: &str) -> Result<url::Url, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl);
    }

    Ok(parsed)
}
