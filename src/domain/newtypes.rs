// SPDX-License-Identifier: MPL-2.0
//! Range-checked value types for transport settings and feedback.

use std::time::Duration;

// =============================================================================
// KeyboardSeekStep
// =============================================================================

/// Keyboard seek step bounds in seconds.
pub mod seek_step_bounds {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 30.0;
    pub const DEFAULT: f64 = 5.0;
}

/// Seconds skipped by one arrow key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardSeekStep(f64);

impl KeyboardSeekStep {
    /// Creates a seek step, clamping to the valid range.
    #[must_use]
    pub fn new(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::default();
        }
        Self(seconds.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for KeyboardSeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// SecondsPerRotation
// =============================================================================

/// Scrub ratio bounds: media seconds covered by one full turn.
pub mod rotation_ratio_bounds {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 60.0;
    pub const DEFAULT: f64 = 3.0;
}

/// Media seconds mapped onto one 360° turn of the disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondsPerRotation(f64);

impl SecondsPerRotation {
    #[must_use]
    pub fn new(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::default();
        }
        Self(seconds.clamp(rotation_ratio_bounds::MIN, rotation_ratio_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts an angular delta into a media time delta.
    #[must_use]
    pub fn seconds_for(self, delta_degrees: f64) -> f64 {
        delta_degrees / 360.0 * self.0
    }
}

impl Default for SecondsPerRotation {
    fn default() -> Self {
        Self(rotation_ratio_bounds::DEFAULT)
    }
}

// =============================================================================
// HapticIntensity
// =============================================================================

/// Strength of a haptic pulse, always within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct HapticIntensity(f64);

impl HapticIntensity {
    pub const FULL: Self = Self(1.0);

    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}
