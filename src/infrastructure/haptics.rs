// SPDX-License-Identifier: MPL-2.0
//! Haptic sinks for hosts without a real actuator API.
//!
//! [`LogHaptics`] keeps full intensity information and reports it through
//! the log. [`CoarseVibration`] models a device that can only buzz for a
//! number of milliseconds: every cue becomes an on/off pattern, and groove
//! intensity survives only as a longer or shorter buzz.

use crate::application::port::{HapticCue, HapticSink};
use crate::config::{GROOVE_VIBRATION_MAX_MS, GROOVE_VIBRATION_MIN_MS};

/// Alternating on/off durations in milliseconds, starting with "on".
pub type VibrationPattern = Vec<u64>;

/// The coarse pattern played for `cue`.
#[must_use]
pub fn vibration_pattern(cue: HapticCue) -> VibrationPattern {
    match cue {
        HapticCue::Tap => vec![8],
        HapticCue::Play => vec![10, 40, 20],
        HapticCue::Pause => vec![20, 40, 10],
        HapticCue::CdSwap => vec![15, 50, 25],
        HapticCue::Grab => vec![12],
        HapticCue::Groove(intensity) => {
            // Rounded to whole milliseconds.
            let ms = (intensity.value() * GROOVE_VIBRATION_MAX_MS as f64).round() as u64;
            vec![ms.clamp(GROOVE_VIBRATION_MIN_MS, GROOVE_VIBRATION_MAX_MS)]
        }
        HapticCue::DirectionChange => vec![25],
        HapticCue::Success => vec![15, 30, 8],
        HapticCue::Error => vec![30, 60, 30, 60, 30],
    }
}

/// Logs every cue at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl HapticSink for LogHaptics {
    fn fire(&mut self, cue: HapticCue) {
        match cue {
            HapticCue::Groove(intensity) => {
                log::debug!("haptic: groove at {:.2}", intensity.value());
            }
            other => log::debug!("haptic: {other:?}"),
        }
    }
}

/// Hands coarse patterns to a vibration motor.
///
/// Motor failures are logged and otherwise ignored.
pub struct CoarseVibration<M> {
    motor: M,
}

impl<M> CoarseVibration<M>
where
    M: FnMut(&[u64]) -> std::io::Result<()>,
{
    pub fn new(motor: M) -> Self {
        Self { motor }
    }
}

impl<M> HapticSink for CoarseVibration<M>
where
    M: FnMut(&[u64]) -> std::io::Result<()>,
{
    fn fire(&mut self, cue: HapticCue) {
        let pattern = vibration_pattern(cue);
        if let Err(err) = (self.motor)(&pattern) {
            log::debug!("Vibration for {cue:?} failed: {err}");
        }
    }
}
