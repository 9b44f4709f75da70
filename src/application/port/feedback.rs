// SPDX-License-Identifier: MPL-2.0
//! Haptic and audio feedback ports.
//!
//! Feedback is fire-and-forget. Sinks never report failure back to the deck;
//! an adapter that cannot deliver a cue logs it and moves on.

use crate::domain::newtypes::HapticIntensity;
use std::time::Duration;

/// A haptic feedback request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HapticCue {
    /// Light tap for a button press.
    Tap,
    /// Ascending pattern when playback starts.
    Play,
    /// Settling pattern when playback pauses.
    Pause,
    /// Double-tap cover swap.
    CdSwap,
    /// First contact with the disc.
    Grab,
    /// One groove ridge passing under the finger.
    Groove(HapticIntensity),
    /// Scrub direction reversed.
    DirectionChange,
    Success,
    Error,
}

pub trait HapticSink {
    fn fire(&mut self, cue: HapticCue);
}

/// Parameters of one filtered-noise glitch voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchVoice {
    /// Noise buffer playback rate (1.0 = native).
    pub playback_rate: f64,
    /// Band-pass center frequency in Hz.
    pub filter_hz: f64,
    pub filter_q: f64,
    /// Gain the voice approaches.
    pub target_gain: f64,
    /// Time constant of the approach, in seconds.
    pub attack_secs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlitchCommand {
    /// Replace any sounding voice with this one.
    Start(GlitchVoice),
    /// Ramp the gain to zero, then stop the voice after `stop_after`.
    Release {
        release_secs: f64,
        stop_after: Duration,
    },
}

pub trait GlitchSink {
    fn send(&mut self, command: GlitchCommand);
}

/// Sink that drops everything, for decks built without feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl HapticSink for Silent {
    fn fire(&mut self, _cue: HapticCue) {}
}

impl GlitchSink for Silent {
    fn send(&mut self, _command: GlitchCommand) {}
}
