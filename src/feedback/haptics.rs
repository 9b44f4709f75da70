// SPDX-License-Identifier: MPL-2.0
//! Vinyl groove haptics for scrubbing.
//!
//! While the disc is dragged, unsigned angular travel is accumulated and a
//! pulse fires each time it crosses the groove interval. The interval
//! widens with speed so fast spins feel like wider ridges. Reversing
//! direction fires a distinct pulse and starts a fresh groove.
//!
//! At most one pulse is emitted per sample, however large the delta.

use crate::config::{checked, HapticsConfig};
use crate::domain::newtypes::HapticIntensity;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveTuning {
    /// Groove spacing at rest, in degrees.
    pub interval_deg: f64,
    /// Most the spacing grows at speed, in degrees.
    pub max_widening_deg: f64,
    /// Velocity (deg/s) per degree of widening.
    pub widening_divisor: f64,
    /// Velocity (deg/s) mapped to full intensity.
    pub full_scale_dps: f64,
}

impl Default for GrooveTuning {
    fn default() -> Self {
        Self::from(&HapticsConfig::default())
    }
}

impl From<&HapticsConfig> for GrooveTuning {
    fn from(config: &HapticsConfig) -> Self {
        let fallback = HapticsConfig::default();
        let positive = |v: f64| v > 0.0;
        Self {
            interval_deg: checked(
                "haptics.groove_interval_deg",
                config.groove_interval_deg,
                fallback.groove_interval_deg,
                positive,
            ),
            max_widening_deg: checked(
                "haptics.max_widening_deg",
                config.max_widening_deg,
                fallback.max_widening_deg,
                |v| v >= 0.0,
            ),
            widening_divisor: checked(
                "haptics.widening_divisor",
                config.widening_divisor,
                fallback.widening_divisor,
                positive,
            ),
            full_scale_dps: checked(
                "haptics.full_scale_dps",
                config.full_scale_dps,
                fallback.full_scale_dps,
                positive,
            ),
        }
    }
}

impl GrooveTuning {
    /// Travel needed for the next pulse at `velocity` deg/s.
    #[must_use]
    pub fn interval_at(&self, velocity: f64) -> f64 {
        self.interval_deg + self.max_widening_deg.min(velocity / self.widening_divisor)
    }

    #[must_use]
    pub fn intensity_at(&self, velocity: f64) -> HapticIntensity {
        HapticIntensity::new(velocity / self.full_scale_dps)
    }
}

/// Pulse produced by one scrub sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroovePulse {
    Ridge(HapticIntensity),
    DirectionChange,
}

/// Groove state. Lives across gestures and is reset by [`GrooveHaptics::begin`].
#[derive(Debug, Clone)]
pub struct GrooveHaptics {
    tuning: GrooveTuning,
    travel: f64,
    last_direction: i8,
    velocity: f64,
    last_sample: Option<Instant>,
}

impl GrooveHaptics {
    #[must_use]
    pub fn new(tuning: GrooveTuning) -> Self {
        Self {
            tuning,
            travel: 0.0,
            last_direction: 0,
            velocity: 0.0,
            last_sample: None,
        }
    }

    /// Starts a new scrub: the current angle becomes the groove reference.
    pub fn begin(&mut self, now: Instant) {
        self.travel = 0.0;
        self.last_direction = 0;
        self.velocity = 0.0;
        self.last_sample = Some(now);
    }

    /// Last measured scrub speed in degrees per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Feeds one signed angular delta observed at `now`.
    pub fn sample(&mut self, delta: f64, now: Instant) -> Option<GroovePulse> {
        let dt = self
            .last_sample
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last_sample = Some(now);
        self.velocity = if dt > 0.0 { delta.abs() / dt } else { 0.0 };

        let direction: i8 = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            0
        };
        let reversed =
            self.last_direction != 0 && direction != 0 && direction != self.last_direction;
        if direction != 0 {
            self.last_direction = direction;
        }
        if reversed {
            self.travel = 0.0;
            return Some(GroovePulse::DirectionChange);
        }

        self.travel += delta.abs();
        if self.travel >= self.tuning.interval_at(self.velocity) {
            self.travel = 0.0;
            return Some(GroovePulse::Ridge(self.tuning.intensity_at(self.velocity)));
        }
        None
    }
}
