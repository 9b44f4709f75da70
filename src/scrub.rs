// SPDX-License-Identifier: MPL-2.0
//! Angle stream to media time.
//!
//! During a drag each pointer angle is turned into a wrap-safe signed delta.
//! The delta rotates the disc one-to-one, and, once the duration is known,
//! moves the playback position by `delta / 360 * seconds_per_rotation`
//! through the session's clamped setter before seeking the backend there.

use crate::application::port::TransportBackend;
use crate::config::defaults::FALLBACK_FRAME_SECS;
use crate::domain::geometry::normalize_delta;
use crate::domain::newtypes::SecondsPerRotation;
use crate::domain::rotation::RotationState;
use crate::domain::session::PlaybackSession;
use std::time::Instant;

/// Result of one scrub sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubSample {
    /// Signed angular delta in (−180, 180].
    pub delta: f64,
    /// Disc velocity implied by the delta, degrees per second.
    pub velocity: f64,
    /// New playback position, or `None` while the duration is unknown.
    pub position: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ScrubTranslator {
    ratio: SecondsPerRotation,
    last_angle: f64,
    last_sample: Option<Instant>,
}

impl ScrubTranslator {
    #[must_use]
    pub fn new(ratio: SecondsPerRotation) -> Self {
        Self {
            ratio,
            last_angle: 0.0,
            last_sample: None,
        }
    }

    #[must_use]
    pub fn ratio(&self) -> SecondsPerRotation {
        self.ratio
    }

    /// Anchors a new drag at `angle`.
    pub fn begin(&mut self, angle: f64, now: Instant) {
        self.last_angle = angle;
        self.last_sample = Some(now);
    }

    /// Applies the pointer moving to `angle` at `now`.
    pub fn apply(
        &mut self,
        angle: f64,
        now: Instant,
        rotation: &mut RotationState,
        session: &mut PlaybackSession,
        backend: Option<&mut dyn TransportBackend>,
    ) -> ScrubSample {
        let delta = normalize_delta(self.last_angle, angle);
        self.last_angle = angle;

        let dt = self
            .last_sample
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .filter(|dt| *dt > 0.0)
            .unwrap_or(FALLBACK_FRAME_SECS);
        self.last_sample = Some(now);

        let velocity = delta / dt;
        rotation.force(delta, velocity);

        let position = session.duration().map(|_| {
            let target = session.current_time() + self.ratio.seconds_for(delta);
            let clamped = session.seek_clamped(target);
            if let Some(backend) = backend {
                backend.seek(clamped);
            }
            clamped
        });

        ScrubSample {
            delta,
            velocity,
            position,
        }
    }
}
