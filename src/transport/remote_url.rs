// SPDX-License-Identifier: MPL-2.0
//! Extracts video and playlist ids from user-entered YouTube links.
//!
//! Accepted shapes, with or without scheme, `www.` or `m.`:
//!
//! - `youtu.be/<id>`
//! - `youtube.com/watch?v=<id>`
//! - `youtube.com/{embed,shorts,live}/<id>`
//! - `youtube.com/playlist?list=<list>`
//!
//! `youtube-nocookie.com` and `music.youtube.com` are treated like
//! `youtube.com`. A `list` query parameter is picked up from any shape.

use crate::domain::error::UrlError;
use crate::domain::source::{RemoteTarget, VideoId};
use reqwest::Url;

const FULL_HOSTS: [&str; 3] = ["youtube.com", "youtube-nocookie.com", "music.youtube.com"];
const SHORT_HOST: &str = "youtu.be";
const PATH_ID_PREFIXES: [&str; 3] = ["/embed/", "/shorts/", "/live/"];

/// Parses `input` into a remote target.
///
/// # Errors
///
/// - [`UrlError::Empty`] for blank input
/// - [`UrlError::Invalid`] when the text is not a URL
/// - [`UrlError::NotYouTube`] for any other host
/// - [`UrlError::NoVideoFound`] when neither a valid video id nor a list id
///   is present
///
/// # Examples
///
/// ```
/// use spin_deck::transport::remote_url::parse_youtube_url;
///
/// let target = parse_youtube_url("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap();
/// assert_eq!(target.video().map(|v| v.as_str()), Some("dQw4w9WgXcQ"));
/// assert!(target.list().is_none());
/// ```
pub fn parse_youtube_url(input: &str) -> Result<RemoteTarget, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&candidate).map_err(|_| UrlError::Invalid)?;
    let host = url.host_str().ok_or(UrlError::Invalid)?;
    let host = normalize_host(host);

    let list = query_value(&url, "list");
    let raw_video = if host == SHORT_HOST {
        first_segment(url.path().trim_start_matches('/'))
    } else if FULL_HOSTS.contains(&host) {
        video_from_full_host(&url)
    } else {
        return Err(UrlError::NotYouTube);
    };

    let video = raw_video.as_deref().and_then(VideoId::parse);
    RemoteTarget::new(video, list).ok_or(UrlError::NoVideoFound)
}

fn normalize_host(host: &str) -> &str {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.strip_prefix("m.").unwrap_or(host)
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn first_segment(path: &str) -> Option<String> {
    path.split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn video_from_full_host(url: &Url) -> Option<String> {
    let path = url.path();
    if path.starts_with("/watch") {
        return query_value(url, "v");
    }
    PATH_ID_PREFIXES
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix))
        .and_then(first_segment)
}
