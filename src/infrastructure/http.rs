// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the generation and history server.
//!
//! # Endpoints
//!
//! - `GET /history` - `{ "enabled": bool, "error": str, "items": [ImageRef] }`
//! - `POST /generate` - JSON payload in, `{ "images": [base64 | data URI] }` out
//! - `GET /payload` - default generation payload, 404 when absent

use crate::application::port::{GalleryBackend, HistoryPage};
use crate::domain::media::{normalize_generated, ImageRef};
use crate::error::SourceError;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Generation can take minutes on a busy server.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// History and payload reads are expected to be quick.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    error: Option<String>,
    /// Any JSON value; anything but a list reads as no items.
    #[serde(default)]
    items: Option<serde_json::Value>,
}

impl HistoryResponse {
    /// Converts the response, resolving item URLs against `base`.
    fn into_page(self, base: &Url) -> HistoryPage {
        if !self.enabled {
            return HistoryPage::disabled(self.error.unwrap_or_default());
        }
        let items = match self.items {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(value @ serde_json::Value::Array(_)) => {
                serde_json::from_value::<Vec<ImageRef>>(value).unwrap_or_else(|err| {
                    log::warn!("unreadable history items: {err}");
                    Vec::new()
                })
            }
            Some(other) => {
                log::warn!("history items is not a list: {other}");
                Vec::new()
            }
        };
        HistoryPage::enabled(items.into_iter().map(|item| resolve(base, item)).collect())
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    images: Option<Vec<String>>,
}

/// [`GalleryBackend`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| SourceError::InvalidUrl(format!("{base_url}: {err}")))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("LensGallery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base_url
            .join(path)
            .map_err(|err| SourceError::InvalidUrl(format!("{path}: {err}")))
    }
}

/// Makes a history URL absolute. Inline images and absolute URLs pass through.
fn resolve(base: &Url, item: ImageRef) -> ImageRef {
    if item.is_inline() {
        return item;
    }
    item.map_url(|url| resolve_against(base, url))
}

fn resolve_against(base: &Url, url: String) -> String {
    match base.join(&url) {
        Ok(resolved) => resolved.into(),
        Err(err) => {
            log::warn!("cannot resolve image url {url}: {err}");
            url
        }
    }
}

impl GalleryBackend for HttpBackend {
    async fn history(&self) -> Result<HistoryPage, SourceError> {
        let url = self.endpoint("history")?;
        log::debug!("GET {url}");
        let response: HistoryResponse = self
            .client
            .get(url)
            .timeout(READ_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.into_page(&self.base_url))
    }

    async fn generate(&self, payload: &serde_json::Value) -> Result<Vec<ImageRef>, SourceError> {
        let url = self.endpoint("generate")?;
        log::debug!("POST {url}");
        let response: GenerateResponse = self
            .client
            .post(url)
            .timeout(GENERATE_TIMEOUT)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(normalize_generated(response.images.unwrap_or_default()))
    }

    async fn default_payload(&self) -> Result<Option<serde_json::Value>, SourceError> {
        let url = self.endpoint("payload")?;
        log::debug!("GET {url}");
        let response = self.client.get(url).timeout(READ_TIMEOUT).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let payload = response.error_for_status()?.json().await?;
        Ok(Some(payload))
    }
}
