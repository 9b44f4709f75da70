// SPDX-License-Identifier: MPL-2.0
//! Loading and saving the deck settings in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[physics]` - passive disc spin
//! - `[scrub]` - angle-to-time ratio and tap movement thresholds
//! - `[gesture]` - tap timing windows
//! - `[haptics]` - groove pulse shaping
//! - `[glitch]` - scrub noise voice
//! - `[playback]` - keyboard seeking and scheduling intervals
//!
//! Every key is optional; anything missing takes its value from [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use spin_deck::config;
//!
//! let (mut config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! config.scrub.seconds_per_rotation = 5.0;
//! config::save(&config).expect("failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Passive spin of the disc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub base_speed_dps: f64,
    pub spin_up_smoothing: f64,
    pub spin_down_decay: f64,
    pub rest_epsilon_dps: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            base_speed_dps: DEFAULT_BASE_SPEED_DPS,
            spin_up_smoothing: DEFAULT_SPIN_UP_SMOOTHING,
            spin_down_decay: DEFAULT_SPIN_DOWN_DECAY,
            rest_epsilon_dps: DEFAULT_REST_EPSILON_DPS,
        }
    }
}

/// Drag-to-seek mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrubConfig {
    /// Media seconds per full turn.
    pub seconds_per_rotation: f64,
    pub mouse_threshold_px: f64,
    pub touch_threshold_px: f64,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            seconds_per_rotation: DEFAULT_SECONDS_PER_ROTATION,
            mouse_threshold_px: DEFAULT_MOUSE_MOVE_THRESHOLD_PX,
            touch_threshold_px: DEFAULT_TOUCH_MOVE_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    pub double_tap_window_ms: u64,
    pub duplicate_tap_guard_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
            duplicate_tap_guard_ms: DEFAULT_DUPLICATE_TAP_GUARD_MS,
        }
    }
}

/// Groove pulse shaping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
    pub groove_interval_deg: f64,
    pub max_widening_deg: f64,
    pub widening_divisor: f64,
    pub full_scale_dps: f64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            groove_interval_deg: DEFAULT_GROOVE_INTERVAL_DEG,
            max_widening_deg: DEFAULT_GROOVE_MAX_WIDENING_DEG,
            widening_divisor: DEFAULT_GROOVE_WIDENING_DIVISOR,
            full_scale_dps: DEFAULT_GROOVE_FULL_SCALE_DPS,
        }
    }
}

/// Scrub noise voice. The mapping constants are tuned by ear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlitchConfig {
    pub enabled: bool,
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
    pub stop_delay_ms: u64,
    pub noise_buffer_secs: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deadband_deg: DEFAULT_GLITCH_DEADBAND_DEG,
            intensity_divisor: DEFAULT_GLITCH_INTENSITY_DIVISOR,
            gain_scale: DEFAULT_GLITCH_GAIN_SCALE,
            max_gain: DEFAULT_GLITCH_MAX_GAIN,
            filter_base_hz: DEFAULT_GLITCH_FILTER_BASE_HZ,
            filter_span_hz: DEFAULT_GLITCH_FILTER_SPAN_HZ,
            rate_base: DEFAULT_GLITCH_RATE_BASE,
            rate_span: DEFAULT_GLITCH_RATE_SPAN,
            filter_q: DEFAULT_GLITCH_FILTER_Q,
            attack_secs: DEFAULT_GLITCH_ATTACK_SECS,
            release_secs: DEFAULT_GLITCH_RELEASE_SECS,
            stop_delay_ms: DEFAULT_GLITCH_STOP_DELAY_MS,
            noise_buffer_secs: DEFAULT_GLITCH_NOISE_BUFFER_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Arrow-key seek step in seconds, clamped to 0.5–30.
    pub keyboard_seek_step_secs: f64,
    pub remote_poll_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            keyboard_seek_step_secs: DEFAULT_KEYBOARD_SEEK_STEP_SECS,
            remote_poll_ms: DEFAULT_REMOTE_POLL_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub scrub: ScrubConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub haptics: HapticsConfig,
    #[serde(default)]
    pub glitch: GlitchConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

// =============================================================================
// Value Checks
// =============================================================================

/// Returns `value` when it is finite and `valid` accepts it, otherwise logs a
/// warning naming `key` and returns `fallback`.
///
/// Keeps hand-edited settings from feeding NaN or runaway values into the
/// physics and audio paths.
pub(crate) fn checked(
    key: &str,
    value: f64,
    fallback: f64,
    valid: impl FnOnce(f64) -> bool,
) -> f64 {
    if value.is_finite() && valid(value) {
        value
    } else {
        log::warn!("Ignoring {key} = {value}, using {fallback}");
        fallback
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the resolved config directory.
///
/// A missing file yields the defaults. An unreadable or corrupt file yields
/// the defaults plus a warning for the caller to surface.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Ignoring {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
