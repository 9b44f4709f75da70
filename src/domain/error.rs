// SPDX-License-Identifier: MPL-2.0
//! Domain error types for playback, URL input and cover persistence.
//!
//! Each error maps to a short status string. None of them is fatal: callers
//! translate them into status text and carry on.

use std::fmt;

/// Coarse category of a playback failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Autoplay policy refused to start; the user must retry explicitly.
    Blocked,
    /// The id, file or stream does not exist.
    NotFound,
    /// Format, codec or embedding is not supported.
    Unsupported,
    /// Transient transport problem; retrying may help.
    Network,
}

impl ErrorClass {
    /// True for failures that mean the source itself cannot be played.
    #[must_use]
    pub fn is_source_unavailable(self) -> bool {
        matches!(self, Self::NotFound | Self::Unsupported)
    }

    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Blocked | Self::Network)
    }
}

/// Failure reported by (or while talking to) a playback backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Autoplay policy blocked `play()` until the user interacts.
    Blocked,
    /// The embedded player rejected the video id (code 2).
    InvalidVideoId,
    /// The video does not exist or is private (code 100).
    VideoNotFound,
    /// The owner disabled embedding (codes 101 and 150).
    EmbeddingDisabled,
    /// The embedded player cannot play this video (code 5).
    CannotPlay,
    /// The media element could not fetch the source.
    Network,
    /// Fetching the local source was aborted.
    Aborted,
    /// The local source could not be decoded.
    DecodeFailed,
    /// The local source format is not supported.
    FormatNotSupported,
    /// Loading the local file failed before playback started.
    LoadFailed,
    /// The embedded player refused to load the id or playlist.
    RemoteLoadFailed,
    /// The remote player is gone or not initialized.
    PlayerUnavailable,
    /// Unrecognized remote error code.
    UnknownRemote(i32),
    /// Unrecognized local media error.
    UnknownLocal,
}

impl PlaybackError {
    /// Maps an embedded-player error code to a playback error.
    #[must_use]
    pub fn from_remote_code(code: i32) -> Self {
        match code {
            2 => Self::InvalidVideoId,
            5 => Self::CannotPlay,
            100 => Self::VideoNotFound,
            101 | 150 => Self::EmbeddingDisabled,
            other => Self::UnknownRemote(other),
        }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Blocked => ErrorClass::Blocked,
            Self::InvalidVideoId
            | Self::VideoNotFound
            | Self::LoadFailed
            | Self::RemoteLoadFailed => ErrorClass::NotFound,
            Self::EmbeddingDisabled
            | Self::CannotPlay
            | Self::DecodeFailed
            | Self::FormatNotSupported
            | Self::UnknownRemote(_)
            | Self::UnknownLocal => ErrorClass::Unsupported,
            Self::Network | Self::Aborted | Self::PlayerUnavailable => ErrorClass::Network,
        }
    }

    /// Text shown on the status line for this failure.
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        match self {
            Self::Blocked => "Tap play to start",
            Self::InvalidVideoId => "Invalid video ID",
            Self::VideoNotFound => "Video not found",
            Self::EmbeddingDisabled => "Embedding disabled",
            Self::CannotPlay => "Cannot play video",
            Self::Network => "Network error",
            Self::Aborted => "Playback aborted",
            Self::DecodeFailed => "Audio decode error",
            Self::FormatNotSupported => "Format not supported",
            Self::LoadFailed => "Could not load audio",
            Self::RemoteLoadFailed => "Failed to load",
            Self::PlayerUnavailable => "Player not ready",
            Self::UnknownRemote(_) => "Video error",
            Self::UnknownLocal => "Audio error",
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRemote(code) => write!(f, "Video error (code {code})"),
            other => f.write_str(other.status_text()),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Rejected user input for a remote video URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// Nothing but whitespace was entered.
    Empty,
    /// The text is not a parseable URL.
    Invalid,
    /// The host is not a known video host.
    NotYouTube,
    /// The URL parsed but carries neither a video nor a playlist id.
    NoVideoFound,
}

impl UrlError {
    #[must_use]
    pub fn status_text(self) -> &'static str {
        match self {
            Self::Empty => "Empty URL",
            Self::Invalid => "Invalid URL",
            Self::NotYouTube => "Not a YouTube URL",
            Self::NoVideoFound => "No video found",
        }
    }
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

impl std::error::Error for UrlError {}

/// Rejected custom cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    /// The payload is not a recognizable image.
    NotAnImage,
    /// The payload exceeds the storage limit.
    TooLarge { bytes: usize, limit: usize },
    /// The backing store failed to persist the image.
    Storage(String),
}

impl CoverError {
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        match self {
            Self::NotAnImage => "Please select an image",
            Self::TooLarge { .. } => "Image too large (max 2MB)",
            Self::Storage(_) => "Cover too large to save",
        }
    }
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { bytes, limit } => {
                write!(f, "Cover image is {bytes} bytes, limit is {limit}")
            }
            Self::Storage(msg) => write!(f, "Could not store cover: {msg}"),
            Self::NotAnImage => f.write_str(self.status_text()),
        }
    }
}

impl std::error::Error for CoverError {}
