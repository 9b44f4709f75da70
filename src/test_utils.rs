// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by unit tests.
//!
//! Re-exports the `approx` assertions so float checks read the same everywhere.

pub use approx::assert_abs_diff_eq;

use crate::application::port::{
    DeckView, GlitchCommand, GlitchSink, HapticCue, HapticSink, Presenter,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Haptic sink that records every cue.
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pub cues: Rc<RefCell<Vec<HapticCue>>>,
}

impl RecordingHaptics {
    pub fn take(&self) -> Vec<HapticCue> {
        std::mem::take(&mut *self.cues.borrow_mut())
    }
}

impl HapticSink for RecordingHaptics {
    fn fire(&mut self, cue: HapticCue) {
        self.cues.borrow_mut().push(cue);
    }
}

/// Glitch sink that records every command.
#[derive(Debug, Clone, Default)]
pub struct RecordingGlitch {
    pub commands: Rc<RefCell<Vec<GlitchCommand>>>,
}

impl RecordingGlitch {
    pub fn take(&self) -> Vec<GlitchCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }
}

impl GlitchSink for RecordingGlitch {
    fn send(&mut self, command: GlitchCommand) {
        self.commands.borrow_mut().push(command);
    }
}

/// Presenter keeping the latest view.
#[derive(Debug, Clone, Default)]
pub struct LastView {
    pub view: Rc<RefCell<Option<DeckView>>>,
}

impl LastView {
    pub fn get(&self) -> Option<DeckView> {
        self.view.borrow().clone()
    }
}

impl Presenter for LastView {
    fn present(&mut self, view: &DeckView) {
        *self.view.borrow_mut() = Some(view.clone());
    }
}
