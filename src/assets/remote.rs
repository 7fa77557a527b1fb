//! HTTP asset resolver for raw-file repositories.
//!
//! Paths are joined onto a base URL (for example a GitHub raw content root);
//! absolute http(s) URLs are fetched as-is. A 404 is reported as a missing
//! asset so the usual fallbacks apply; any other failure is a network error.
//! Requests are made once, without retries.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use url::Url;

use super::{is_url, AssetResolver};
use crate::{Error, Result};

pub struct RemoteResolver {
    client: Client,
    base: Url,
}

impl RemoteResolver {
    pub fn new(base_url: &str, timeout_ms: u64, user_agent: &str) -> Result<Self> {
        // Without a trailing slash `join` would replace the last path segment.
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| Error::ConfigError(format!("invalid base URL {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let parsed = if is_url(path) {
            Url::parse(path)
        } else {
            self.base.join(path.trim_start_matches('/'))
        };
        parsed.map_err(|e| Error::AssetNotFound(format!("{}: {}", path, e)))
    }
}

impl AssetResolver for RemoteResolver {
    fn resolve(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path)?;
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Error::NetworkError(format!("Failed to fetch {}: {}", url, e)))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::AssetNotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(Error::NetworkError(format!("{} returned {}", url, status)));
        }

        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| Error::NetworkError(format!("Failed to read response body: {}", e)))
    }

    fn describe(&self) -> String {
        format!("remote:{}", self.base)
    }
}
