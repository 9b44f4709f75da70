// SPDX-License-Identifier: MPL-2.0
//! Disc cover selection.
//!
//! Double taps walk the built-in covers and then, if one is stored, the
//! custom cover before wrapping back to the first built-in.

use crate::config::defaults::MAX_COVER_BYTES;
use crate::domain::error::CoverError;

/// Number of covers shipped with the deck.
pub const BUILT_IN_COVERS: usize = 2;

const IMAGE_SIGNATURES: &[&[u8]] = &[
    b"\x89PNG\r\n\x1a\n",
    b"\xff\xd8\xff",
    b"GIF87a",
    b"GIF89a",
    b"BM",
];

/// True when `bytes` starts like a PNG, JPEG, GIF, WebP or BMP file.
#[must_use]
pub fn looks_like_image(bytes: &[u8]) -> bool {
    let webp = bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP";
    webp || IMAGE_SIGNATURES.iter().any(|sig| bytes.starts_with(sig))
}

/// Checks a custom cover payload before it is stored.
///
/// # Errors
///
/// [`CoverError::NotAnImage`] for unrecognized data, then
/// [`CoverError::TooLarge`] above the size limit.
pub fn validate_cover(bytes: &[u8]) -> Result<(), CoverError> {
    if !looks_like_image(bytes) {
        return Err(CoverError::NotAnImage);
    }
    if bytes.len() > MAX_COVER_BYTES {
        return Err(CoverError::TooLarge {
            bytes: bytes.len(),
            limit: MAX_COVER_BYTES,
        });
    }
    Ok(())
}

/// Which image the disc currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSlot {
    BuiltIn(usize),
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverCarousel {
    current: usize,
    showing_custom: bool,
    has_custom: bool,
}

impl Default for CoverCarousel {
    fn default() -> Self {
        Self::new(false)
    }
}

impl CoverCarousel {
    /// A stored custom cover is shown straight away.
    #[must_use]
    pub fn new(has_custom: bool) -> Self {
        Self {
            current: 0,
            showing_custom: has_custom,
            has_custom,
        }
    }

    #[must_use]
    pub fn slot(&self) -> CoverSlot {
        if self.showing_custom {
            CoverSlot::Custom
        } else {
            CoverSlot::BuiltIn(self.current)
        }
    }

    #[must_use]
    pub fn has_custom(&self) -> bool {
        self.has_custom
    }

    /// Advances to the next cover and returns it.
    pub fn cycle(&mut self) -> CoverSlot {
        if self.showing_custom {
            self.showing_custom = false;
            self.current = 0;
        } else if self.has_custom && self.current == BUILT_IN_COVERS - 1 {
            self.showing_custom = true;
        } else {
            self.current = (self.current + 1) % BUILT_IN_COVERS;
        }
        self.slot()
    }

    /// A freshly stored custom cover is shown immediately.
    pub fn set_custom(&mut self) {
        self.has_custom = true;
        self.showing_custom = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new(false);
    }
}
