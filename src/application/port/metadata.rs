// SPDX-License-Identifier: MPL-2.0
//! Title lookup and cover persistence ports.

use crate::domain::cover::validate_cover;
use crate::domain::error::CoverError;
use crate::domain::source::VideoId;
use futures_util::future::LocalBoxFuture;

/// Best-effort lookup of a remote video's title.
///
/// The future resolves to `None` on any failure; callers never see why.
pub trait TitleFetcher {
    fn fetch_title(&self, id: &VideoId) -> LocalBoxFuture<'static, Option<String>>;
}

/// Persistence of the single custom cover image.
pub trait CoverStore {
    /// Stores `bytes` as the custom cover, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Rejects payloads that are not images or exceed the size limit, and
    /// reports storage failures.
    fn store(&mut self, bytes: &[u8]) -> Result<(), CoverError>;

    /// Returns the stored cover, if any.
    fn load(&self) -> Option<Vec<u8>>;

    /// Removes the stored cover.
    ///
    /// # Errors
    ///
    /// Reports storage failures; clearing an empty store succeeds.
    fn clear(&mut self) -> Result<(), CoverError>;
}

/// Title fetcher for offline decks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTitles;

impl TitleFetcher for NoTitles {
    fn fetch_title(&self, _id: &VideoId) -> LocalBoxFuture<'static, Option<String>> {
        Box::pin(async { None })
    }
}

/// Cover store that keeps the image in memory for the deck's lifetime.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCovers {
    image: Option<Vec<u8>>,
}

impl CoverStore for InMemoryCovers {
    fn store(&mut self, bytes: &[u8]) -> Result<(), CoverError> {
        validate_cover(bytes)?;
        self.image = Some(bytes.to_vec());
        Ok(())
    }

    fn load(&self) -> Option<Vec<u8>> {
        self.image.clone()
    }

    fn clear(&mut self) -> Result<(), CoverError> {
        self.image = None;
        Ok(())
    }
}
