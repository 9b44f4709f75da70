// SPDX-License-Identifier: MPL-2.0
//! Raw input events and their classification.
//!
//! Pointer and touch streams go through [`GestureClassifier`], which tells
//! drags from tap candidates; tap candidates go through [`TapResolver`],
//! which tells single taps from double taps using timestamps alone.
//! Keys are mapped by [`keyboard::map_key`].

pub mod classifier;
pub mod keyboard;
pub mod tap;

pub use classifier::{GestureClassifier, GestureOutcome, GesturePhase, MoveThresholds};
pub use keyboard::{map_key, Key, KeyAction};
pub use tap::{TapOutcome, TapResolver};

use crate::domain::geometry::Point;

/// Device a pointer sequence comes from. Touch gets a tighter move threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// One raw input event. Timestamps are supplied separately by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the disc.
    Down { point: Point, kind: PointerKind },
    /// Pointer moved anywhere in the viewport.
    Move { point: Point },
    /// Pointer released anywhere in the viewport.
    Up,
    Key(Key),
    /// Play button pressed.
    PlayButton,
}
