// SPDX-License-Identifier: MPL-2.0
//! Deck tunables resolved from [`Config`].

use crate::config::{
    checked, Config, GestureConfig, PhysicsConfig, DEFAULT_TRACK_FILE, DEFAULT_TRACK_TITLE,
};
use crate::domain::newtypes::{KeyboardSeekStep, SecondsPerRotation};
use crate::domain::rotation::SpinTuning;
use crate::domain::source::LocalTrack;
use crate::feedback::{GlitchTuning, GrooveTuning};
use crate::gesture::MoveThresholds;

impl From<&PhysicsConfig> for SpinTuning {
    fn from(config: &PhysicsConfig) -> Self {
        let fallback = Self::default();
        Self {
            base_speed: checked(
                "physics.base_speed_dps",
                config.base_speed_dps,
                fallback.base_speed,
                |v| v >= 0.0,
            ),
            spin_up_smoothing: checked(
                "physics.spin_up_smoothing",
                config.spin_up_smoothing,
                fallback.spin_up_smoothing,
                |v| v > 0.0 && v <= 1.0,
            ),
            spin_down_decay: checked(
                "physics.spin_down_decay",
                config.spin_down_decay,
                fallback.spin_down_decay,
                |v| v > 0.0 && v < 1.0,
            ),
            rest_epsilon: checked(
                "physics.rest_epsilon_dps",
                config.rest_epsilon_dps,
                fallback.rest_epsilon,
                |v| v >= 0.0,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckSettings {
    pub spin: SpinTuning,
    pub seconds_per_rotation: SecondsPerRotation,
    pub thresholds: MoveThresholds,
    pub taps: GestureConfig,
    pub groove: GrooveTuning,
    pub glitch: GlitchTuning,
    pub haptics_enabled: bool,
    pub glitch_enabled: bool,
    pub seek_step: KeyboardSeekStep,
    /// Loaded by the play button when nothing else is.
    pub default_track: LocalTrack,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DeckSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            spin: SpinTuning::from(&config.physics),
            seconds_per_rotation: SecondsPerRotation::new(config.scrub.seconds_per_rotation),
            thresholds: MoveThresholds::from(&config.scrub),
            taps: config.gesture.clone(),
            groove: GrooveTuning::from(&config.haptics),
            glitch: GlitchTuning::from(&config.glitch),
            haptics_enabled: config.haptics.enabled,
            glitch_enabled: config.glitch.enabled,
            seek_step: KeyboardSeekStep::new(config.playback.keyboard_seek_step_secs),
            default_track: LocalTrack::new(DEFAULT_TRACK_FILE, DEFAULT_TRACK_TITLE),
        }
    }

    /// Points the default track at `location`, keeping its title.
    #[must_use]
    pub fn with_default_track_at(mut self, location: impl Into<String>) -> Self {
        self.default_track = LocalTrack::new(location, DEFAULT_TRACK_TITLE);
        self
    }
}
