// SPDX-License-Identifier: MPL-2.0
//! What the deck shows, and the port it is shown through.

use crate::domain::cover::CoverSlot;

/// Scrub styling while the disc is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrubDirection {
    Forward,
    Rewind,
    #[default]
    Still,
}

/// Snapshot of everything a front-end renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckView {
    /// Status line: progress, errors or transient messages.
    pub status: String,
    pub title: String,
    /// Play button state.
    pub playing: bool,
    /// Disc rotation folded into [0, 360).
    pub rotation_degrees: f64,
    pub dragging: bool,
    pub scrub: ScrubDirection,
    pub cover: CoverSlot,
}

impl Default for DeckView {
    fn default() -> Self {
        Self {
            status: String::new(),
            title: String::new(),
            playing: false,
            rotation_degrees: 0.0,
            dragging: false,
            scrub: ScrubDirection::Still,
            cover: CoverSlot::BuiltIn(0),
        }
    }
}

impl DeckView {
    /// True when anything other than the rotation differs.
    #[must_use]
    pub fn differs_in_text(&self, other: &DeckView) -> bool {
        self.status != other.status
            || self.title != other.title
            || self.playing != other.playing
            || self.dragging != other.dragging
            || self.scrub != other.scrub
            || self.cover != other.cover
    }
}

pub trait Presenter {
    fn present(&mut self, view: &DeckView);
}

/// Presenter that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Presenter for Headless {
    fn present(&mut self, _view: &DeckView) {}
}
