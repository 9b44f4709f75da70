// SPDX-License-Identifier: MPL-2.0
//! Identities of the things the deck can play.

use std::fmt;
use std::path::Path;

/// Length of an embedded-player video id.
pub const VIDEO_ID_LEN: usize = 11;

/// A validated remote video id: exactly 11 characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Returns `None` unless `raw` has the exact id shape.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        valid.then(|| Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a remote URL points at. At least one of the two ids is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    video: Option<VideoId>,
    list: Option<String>,
}

impl RemoteTarget {
    /// Builds a target, or `None` when both ids are missing.
    #[must_use]
    pub fn new(video: Option<VideoId>, list: Option<String>) -> Option<Self> {
        let list = list.filter(|l| !l.is_empty());
        if video.is_none() && list.is_none() {
            return None;
        }
        Some(Self { video, list })
    }

    #[must_use]
    pub fn video(&self) -> Option<&VideoId> {
        self.video.as_ref()
    }

    #[must_use]
    pub fn list(&self) -> Option<&str> {
        self.list.as_deref()
    }

    /// A target loads as a playlist only when it has no single video id.
    #[must_use]
    pub fn is_playlist(&self) -> bool {
        self.video.is_none()
    }
}

/// A local audio source with its display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTrack {
    location: String,
    title: String,
}

impl LocalTrack {
    #[must_use]
    pub fn new(location: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            title: title.into(),
        }
    }

    /// Uses the file name without its last extension as the title.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_stem()
            .or_else(|| path.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(path.to_string_lossy(), title)
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}
