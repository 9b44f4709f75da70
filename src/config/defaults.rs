// SPDX-License-Identifier: MPL-2.0
//! Default values for every tunable of the deck.
//!
//! Constants are grouped by the config section that overrides them.
//!
//! # Categories
//!
//! - **Physics**: passive spin-up and spin-down of the disc
//! - **Scrub**: angle-to-time ratio and tap movement thresholds
//! - **Gesture**: tap timing windows
//! - **Haptics**: groove pulse spacing and intensity
//! - **Glitch**: scrub noise voice mapping
//! - **Playback**: keyboard seeking and scheduling intervals

// ==========================================================================
// Physics Defaults
// ==========================================================================

/// Angular speed the disc settles at while playing (degrees per second).
pub const DEFAULT_BASE_SPEED_DPS: f64 = 90.0;

/// Fraction of the gap to the base speed closed on each frame while playing.
pub const DEFAULT_SPIN_UP_SMOOTHING: f64 = 0.05;

/// Per-frame velocity multiplier while paused.
pub const DEFAULT_SPIN_DOWN_DECAY: f64 = 0.95;

/// Idle speed below which the disc stops (degrees per second).
pub const DEFAULT_REST_EPSILON_DPS: f64 = 0.5;

// ==========================================================================
// Scrub Defaults
// ==========================================================================

/// Media seconds covered by one full turn of the disc.
pub const DEFAULT_SECONDS_PER_ROTATION: f64 = 3.0;

/// Smallest accepted seconds-per-rotation ratio.
pub const MIN_SECONDS_PER_ROTATION: f64 = 0.5;

/// Largest accepted seconds-per-rotation ratio.
pub const MAX_SECONDS_PER_ROTATION: f64 = 60.0;

/// Per-axis movement (px) after which a mouse press stops being a tap.
pub const DEFAULT_MOUSE_MOVE_THRESHOLD_PX: f64 = 20.0;

/// Per-axis movement (px) after which a touch stops being a tap.
pub const DEFAULT_TOUCH_MOVE_THRESHOLD_PX: f64 = 15.0;

/// Frame time assumed when two drag samples share a timestamp.
pub const FALLBACK_FRAME_SECS: f64 = 1.0 / 60.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// A second tap within this many milliseconds is a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 400;

/// Taps closer than this are duplicates of the same physical tap.
pub const DEFAULT_DUPLICATE_TAP_GUARD_MS: u64 = 50;

// ==========================================================================
// Haptics Defaults
// ==========================================================================

/// Degrees of travel between groove pulses at rest speed.
pub const DEFAULT_GROOVE_INTERVAL_DEG: f64 = 15.0;

/// Extra spacing added to the groove interval at high speed.
pub const DEFAULT_GROOVE_MAX_WIDENING_DEG: f64 = 10.0;

/// Velocity (deg/s) per degree of groove widening.
pub const DEFAULT_GROOVE_WIDENING_DIVISOR: f64 = 50.0;

/// Velocity (deg/s) at which a groove pulse reaches full intensity.
pub const DEFAULT_GROOVE_FULL_SCALE_DPS: f64 = 500.0;

/// Shortest coarse vibration used for a groove pulse (ms).
pub const GROOVE_VIBRATION_MIN_MS: u64 = 5;

/// Longest coarse vibration used for a groove pulse (ms).
pub const GROOVE_VIBRATION_MAX_MS: u64 = 30;

// ==========================================================================
// Glitch Defaults
// ==========================================================================

/// Angular delta per sample (degrees) below which no glitch is voiced.
pub const DEFAULT_GLITCH_DEADBAND_DEG: f64 = 2.0;

/// Signed glitch intensity is `delta / divisor`.
pub const DEFAULT_GLITCH_INTENSITY_DIVISOR: f64 = 30.0;

/// Voice gain per unit of intensity.
pub const DEFAULT_GLITCH_GAIN_SCALE: f64 = 0.3;

/// Ceiling of the voice gain.
pub const DEFAULT_GLITCH_MAX_GAIN: f64 = 0.15;

/// Band-pass center at zero intensity (Hz).
pub const DEFAULT_GLITCH_FILTER_BASE_HZ: f64 = 800.0;

/// Band-pass center added per unit of intensity (Hz).
pub const DEFAULT_GLITCH_FILTER_SPAN_HZ: f64 = 2000.0;

/// Noise playback rate at zero intensity.
pub const DEFAULT_GLITCH_RATE_BASE: f64 = 0.5;

/// Noise playback rate added per unit of intensity.
pub const DEFAULT_GLITCH_RATE_SPAN: f64 = 2.0;

/// Band-pass quality factor.
pub const DEFAULT_GLITCH_FILTER_Q: f64 = 1.0;

/// Gain attack time constant (seconds).
pub const DEFAULT_GLITCH_ATTACK_SECS: f64 = 0.01;

/// Gain release time constant (seconds).
pub const DEFAULT_GLITCH_RELEASE_SECS: f64 = 0.05;

/// Delay between release start and voice stop (ms).
pub const DEFAULT_GLITCH_STOP_DELAY_MS: u64 = 100;

/// Length of the looped white-noise buffer (seconds).
pub const DEFAULT_GLITCH_NOISE_BUFFER_SECS: f64 = 0.5;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Default arrow-key seek step (seconds).
pub const DEFAULT_KEYBOARD_SEEK_STEP_SECS: f64 = 5.0;

/// Minimum arrow-key seek step (seconds).
pub const MIN_KEYBOARD_SEEK_STEP_SECS: f64 = 0.5;

/// Maximum arrow-key seek step (seconds).
pub const MAX_KEYBOARD_SEEK_STEP_SECS: f64 = 30.0;

/// Interval between remote time/duration queries (ms).
pub const DEFAULT_REMOTE_POLL_MS: u64 = 500;

/// Rendering tick interval (ms), roughly one display refresh.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Title of the built-in track.
pub const DEFAULT_TRACK_TITLE: &str = "Mondays Thoughts";

/// Location of the built-in track, relative to the data directory.
pub const DEFAULT_TRACK_FILE: &str = "default-track.mp3";

// ==========================================================================
// Cover Defaults
// ==========================================================================

/// Largest custom cover accepted by the cover store (bytes).
pub const MAX_COVER_BYTES: usize = 2 * 1024 * 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Physics validation
    assert!(DEFAULT_BASE_SPEED_DPS > 0.0);
    assert!(DEFAULT_SPIN_UP_SMOOTHING > 0.0 && DEFAULT_SPIN_UP_SMOOTHING <= 1.0);
    assert!(DEFAULT_SPIN_DOWN_DECAY > 0.0 && DEFAULT_SPIN_DOWN_DECAY < 1.0);
    assert!(DEFAULT_REST_EPSILON_DPS > 0.0);

    // Scrub validation
    assert!(MIN_SECONDS_PER_ROTATION > 0.0);
    assert!(DEFAULT_SECONDS_PER_ROTATION >= MIN_SECONDS_PER_ROTATION);
    assert!(DEFAULT_SECONDS_PER_ROTATION <= MAX_SECONDS_PER_ROTATION);
    assert!(DEFAULT_TOUCH_MOVE_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_MOUSE_MOVE_THRESHOLD_PX >= DEFAULT_TOUCH_MOVE_THRESHOLD_PX);

    // Gesture validation
    assert!(DEFAULT_DUPLICATE_TAP_GUARD_MS < DEFAULT_DOUBLE_TAP_WINDOW_MS);

    // Haptics validation
    assert!(DEFAULT_GROOVE_INTERVAL_DEG > 0.0);
    assert!(DEFAULT_GROOVE_WIDENING_DIVISOR > 0.0);
    assert!(DEFAULT_GROOVE_FULL_SCALE_DPS > 0.0);
    assert!(GROOVE_VIBRATION_MIN_MS <= GROOVE_VIBRATION_MAX_MS);

    // Glitch validation
    assert!(DEFAULT_GLITCH_INTENSITY_DIVISOR > 0.0);
    assert!(DEFAULT_GLITCH_MAX_GAIN > 0.0 && DEFAULT_GLITCH_MAX_GAIN < 1.0);
    assert!(DEFAULT_GLITCH_FILTER_Q > 0.0);
    assert!(DEFAULT_GLITCH_ATTACK_SECS > 0.0);
    assert!(DEFAULT_GLITCH_RELEASE_SECS > 0.0);
    assert!(DEFAULT_GLITCH_NOISE_BUFFER_SECS > 0.0);

    // Playback validation
    assert!(MIN_KEYBOARD_SEEK_STEP_SECS > 0.0);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS >= MIN_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_KEYBOARD_SEEK_STEP_SECS <= MAX_KEYBOARD_SEEK_STEP_SECS);
    assert!(DEFAULT_FRAME_INTERVAL_MS > 0);
    assert!(DEFAULT_REMOTE_POLL_MS > DEFAULT_FRAME_INTERVAL_MS);
};
