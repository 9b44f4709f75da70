// SPDX-License-Identifier: MPL-2.0
//! Video titles from YouTube's public oEmbed endpoint.
//!
//! Lookups are best-effort: any network, status or decoding problem is
//! logged and yields `None`, leaving the title line untouched.

use futures_util::future::LocalBoxFuture;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use crate::application::port::TitleFetcher;
use crate::domain::source::VideoId;
use crate::error::{Error, Result};

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
const WATCH_URL: &str = "https://www.youtube.com/watch";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("spin_deck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
}

#[derive(Debug, Clone)]
pub struct OEmbedTitleFetcher {
    client: reqwest::Client,
}

impl OEmbedTitleFetcher {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Io(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// The oEmbed query URL for `id`.
    ///
    /// # Errors
    ///
    /// Only fails if the endpoint constants are malformed.
    pub fn request_url(id: &VideoId) -> Result<Url> {
        let watch = Url::parse_with_params(WATCH_URL, &[("v", id.as_str())])
            .map_err(|e| Error::Io(e.to_string()))?;
        Url::parse_with_params(OEMBED_ENDPOINT, &[("url", watch.as_str()), ("format", "json")])
            .map_err(|e| Error::Io(e.to_string()))
    }

    async fn lookup(client: reqwest::Client, url: Url) -> Option<String> {
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Title lookup failed: {err}");
                return None;
            }
        };
        if !response.status().is_success() {
            log::warn!("Title lookup returned HTTP status {}", response.status());
            return None;
        }
        match response.json::<OEmbedResponse>().await {
            Ok(body) => Some(body.title),
            Err(err) => {
                log::warn!("Title lookup returned an unreadable body: {err}");
                None
            }
        }
    }
}

impl TitleFetcher for OEmbedTitleFetcher {
    fn fetch_title(&self, id: &VideoId) -> LocalBoxFuture<'static, Option<String>> {
        let url = match Self::request_url(id) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("Cannot build title lookup for {}: {err}", id.as_str());
                return Box::pin(async { None });
            }
        };
        log::debug!("Fetching title for {}", id.as_str());
        Box::pin(Self::lookup(self.client.clone(), url))
    }
}
