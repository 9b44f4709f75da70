// SPDX-License-Identifier: MPL-2.0
//! Maps scrub deltas onto glitch voice commands.
//!
//! Above the deadband every sample (re)starts the voice with parameters
//! proportional to `|delta| / divisor`. Falling into the deadband, or ending
//! the drag, releases it.

use crate::application::port::{GlitchCommand, GlitchVoice};
use crate::config::{checked, GlitchConfig};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchTuning {
    pub deadband_deg: f64,
    pub intensity_divisor: f64,
    pub gain_scale: f64,
    pub max_gain: f64,
    pub filter_base_hz: f64,
    pub filter_span_hz: f64,
    pub rate_base: f64,
    pub rate_span: f64,
    pub filter_q: f64,
    pub attack_secs: f64,
    pub release_secs: f64,
    pub stop_delay: Duration,
}

impl Default for GlitchTuning {
    fn default() -> Self {
        Self::from(&GlitchConfig::default())
    }
}

impl From<&GlitchConfig> for GlitchTuning {
    fn from(config: &GlitchConfig) -> Self {
        let fallback = GlitchConfig::default();
        let positive = |v: f64| v > 0.0;
        let non_negative = |v: f64| v >= 0.0;
        Self {
            deadband_deg: checked(
                "glitch.deadband_deg",
                config.deadband_deg,
                fallback.deadband_deg,
                non_negative,
            ),
            intensity_divisor: checked(
                "glitch.intensity_divisor",
                config.intensity_divisor,
                fallback.intensity_divisor,
                positive,
            ),
            gain_scale: checked(
                "glitch.gain_scale",
                config.gain_scale,
                fallback.gain_scale,
                non_negative,
            ),
            max_gain: checked("glitch.max_gain", config.max_gain, fallback.max_gain, |v| {
                (0.0..=1.0).contains(&v)
            }),
            filter_base_hz: checked(
                "glitch.filter_base_hz",
                config.filter_base_hz,
                fallback.filter_base_hz,
                non_negative,
            ),
            filter_span_hz: checked(
                "glitch.filter_span_hz",
                config.filter_span_hz,
                fallback.filter_span_hz,
                non_negative,
            ),
            rate_base: checked(
                "glitch.rate_base",
                config.rate_base,
                fallback.rate_base,
                non_negative,
            ),
            rate_span: checked(
                "glitch.rate_span",
                config.rate_span,
                fallback.rate_span,
                non_negative,
            ),
            filter_q: checked("glitch.filter_q", config.filter_q, fallback.filter_q, positive),
            attack_secs: checked(
                "glitch.attack_secs",
                config.attack_secs,
                fallback.attack_secs,
                non_negative,
            ),
            release_secs: checked(
                "glitch.release_secs",
                config.release_secs,
                fallback.release_secs,
                non_negative,
            ),
            stop_delay: Duration::from_millis(config.stop_delay_ms),
        }
    }
}

impl GlitchTuning {
    /// Voice parameters for a signed intensity; only the magnitude matters.
    #[must_use]
    pub fn voice(&self, intensity: f64) -> GlitchVoice {
        let x = intensity.abs();
        GlitchVoice {
            playback_rate: self.rate_base + x * self.rate_span,
            filter_hz: self.filter_base_hz + x * self.filter_span_hz,
            filter_q: self.filter_q,
            target_gain: self.max_gain.min(x * self.gain_scale),
            attack_secs: self.attack_secs,
        }
    }

    #[must_use]
    pub fn release(&self) -> GlitchCommand {
        GlitchCommand::Release {
            release_secs: self.release_secs,
            stop_after: self.stop_delay,
        }
    }

    #[must_use]
    pub fn is_audible(&self, delta: f64) -> bool {
        delta.abs() > self.deadband_deg
    }
}

/// Tracks whether a voice is sounding so releases are only sent once.
#[derive(Debug, Clone)]
pub struct GlitchController {
    tuning: GlitchTuning,
    sounding: bool,
}

impl GlitchController {
    #[must_use]
    pub fn new(tuning: GlitchTuning) -> Self {
        Self {
            tuning,
            sounding: false,
        }
    }

    #[must_use]
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Command for one scrub sample, if any.
    pub fn on_delta(&mut self, delta: f64) -> Option<GlitchCommand> {
        if self.tuning.is_audible(delta) {
            self.sounding = true;
            Some(GlitchCommand::Start(
                self.tuning.voice(delta / self.tuning.intensity_divisor),
            ))
        } else {
            self.release()
        }
    }

    /// Releases a sounding voice.
    pub fn release(&mut self) -> Option<GlitchCommand> {
        if !self.sounding {
            return None;
        }
        self.sounding = false;
        Some(self.tuning.release())
    }
}
