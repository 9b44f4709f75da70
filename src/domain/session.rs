// SPDX-License-Identifier: MPL-2.0
//! The single active playback session.
//!
//! `is_playing` and the time fields mirror what the active backend reported;
//! they are only written through [`PlaybackSession::report_times`],
//! [`PlaybackSession::set_playing`] and the clamped seek setter.

/// Which backend currently owns playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Nothing loaded yet.
    #[default]
    None,
    /// A local audio file played through the media element.
    LocalFile,
    /// A remote video played through the embedded player.
    RemoteVideo,
}

impl SourceMode {
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Reported state of the active source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSession {
    mode: SourceMode,
    is_playing: bool,
    current_time: f64,
    duration: f64,
}

impl PlaybackSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        !self.mode.is_none()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current position in seconds.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Media duration in seconds, `None` until metadata is known.
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        (self.duration > 0.0).then_some(self.duration)
    }

    /// Switches to `mode` with a fresh, stopped timeline.
    pub fn begin(&mut self, mode: SourceMode) {
        self.mode = mode;
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    /// Drops back to no source at all.
    pub fn clear(&mut self) {
        self.begin(SourceMode::None);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Clamps `secs` to `[0, duration]`, or to `[0, ∞)` while the duration is unknown.
    #[must_use]
    pub fn clamp_time(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        match self.duration() {
            Some(duration) => secs.min(duration),
            None => secs,
        }
    }

    /// Stores a position/duration pair reported by the backend.
    ///
    /// Non-finite or negative values count as unknown (zero).
    pub fn report_times(&mut self, current: f64, duration: Option<f64>) {
        self.duration = duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0);
        self.current_time = self.clamp_time(current);
    }

    /// Moves the position through the clamp and returns the stored value.
    pub fn seek_clamped(&mut self, secs: f64) -> f64 {
        self.current_time = self.clamp_time(secs);
        self.current_time
    }
}
