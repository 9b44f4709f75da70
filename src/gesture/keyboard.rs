// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts.

use crate::domain::newtypes::KeyboardSeekStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Left,
    Right,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    TogglePlayback,
    /// Relative seek in seconds.
    SeekBy(f64),
    /// Close any open overlay; handled by the front-end.
    Dismiss,
}

/// Maps a key to its action, if it has one.
#[must_use]
pub fn map_key(key: Key, step: KeyboardSeekStep) -> Option<KeyAction> {
    match key {
        Key::Space | Key::Char('k') => Some(KeyAction::TogglePlayback),
        Key::Left => Some(KeyAction::SeekBy(-step.value())),
        Key::Right => Some(KeyAction::SeekBy(step.value())),
        Key::Escape => Some(KeyAction::Dismiss),
        Key::Char(_) => None,
    }
}
