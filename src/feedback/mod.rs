// SPDX-License-Identifier: MPL-2.0
//! Scrub feedback: groove haptics and the glitch voice.
//!
//! [`haptics`] and [`glitch`] decide *when* feedback happens from the scrub
//! delta stream. [`noise`] renders the glitch voice into samples and is used
//! by the audio output adapter.

pub mod glitch;
pub mod haptics;
pub mod noise;

pub use glitch::{GlitchController, GlitchTuning};
pub use haptics::{GrooveHaptics, GroovePulse, GrooveTuning};
pub use noise::GlitchSynth;
