// SPDX-License-Identifier: MPL-2.0
//! Rotation physics for the spinning disc.
//!
//! The disc angle is an unbounded accumulator; wrapping to 0–360° is left to
//! whoever renders it. Velocity is integrated once per animation frame and
//! follows one of three regimes:
//!
//! - **Dragging**: the scrub translator owns angle and velocity, physics is idle
//! - **Playing**: velocity eases towards the base speed (spin-up)
//! - **Idle**: velocity decays towards zero and snaps to rest under an epsilon

use crate::config::defaults::{
    DEFAULT_BASE_SPEED_DPS, DEFAULT_REST_EPSILON_DPS, DEFAULT_SPIN_DOWN_DECAY,
    DEFAULT_SPIN_UP_SMOOTHING,
};

/// Which force drives the disc during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRegime {
    /// A drag gesture owns the disc.
    Dragging,
    /// Media is playing; the disc spins up to the base speed.
    Playing,
    /// Paused or stopped; the disc spins down.
    Idle,
}

/// Tunable constants for [`RotationState::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTuning {
    /// Target angular velocity while playing, in degrees per second.
    pub base_speed: f64,
    /// Fraction of the remaining gap to the base speed closed per frame.
    pub spin_up_smoothing: f64,
    /// Multiplier applied to velocity per frame while idle.
    pub spin_down_decay: f64,
    /// Below this speed (deg/s) an idle disc stops completely.
    pub rest_epsilon: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            base_speed: DEFAULT_BASE_SPEED_DPS,
            spin_up_smoothing: DEFAULT_SPIN_UP_SMOOTHING,
            spin_down_decay: DEFAULT_SPIN_DOWN_DECAY,
            rest_epsilon: DEFAULT_REST_EPSILON_DPS,
        }
    }
}

/// Visual spin of the disc.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    rotation_degrees: f64,
    angular_velocity: f64,
}

impl RotationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated rotation in degrees (not wrapped).
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    /// Signed angular velocity in degrees per second; positive is forward.
    #[must_use]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Rotation folded into [0, 360) for rendering.
    #[must_use]
    pub fn display_degrees(&self) -> f64 {
        self.rotation_degrees.rem_euclid(360.0)
    }

    /// Advances one animation frame of `dt` seconds.
    ///
    /// With `dt == 0` the angle is left untouched.
    pub fn tick(&mut self, dt: f64, regime: SpinRegime, tuning: &SpinTuning) {
        match regime {
            SpinRegime::Dragging => {}
            SpinRegime::Playing => {
                self.angular_velocity +=
                    (tuning.base_speed - self.angular_velocity) * tuning.spin_up_smoothing;
            }
            SpinRegime::Idle => {
                self.angular_velocity *= tuning.spin_down_decay;
                if self.angular_velocity.abs() < tuning.rest_epsilon {
                    self.angular_velocity = 0.0;
                }
            }
        }

        if dt > 0.0 && dt.is_finite() {
            self.rotation_degrees += self.angular_velocity * dt;
        }
    }

    /// Rotates the disc directly by `delta` degrees and sets its velocity.
    ///
    /// Used while dragging so the disc follows the pointer exactly.
    pub fn force(&mut self, delta: f64, velocity: f64) {
        self.rotation_degrees += delta;
        self.angular_velocity = velocity;
    }

    /// Stops the disc dead without touching its angle.
    pub fn halt(&mut self) {
        self.angular_velocity = 0.0;
    }
}
