// SPDX-License-Identifier: MPL-2.0
//! Playback backend port definitions.
//!
//! Two very different players sit behind [`TransportBackend`]:
//!
//! - a local media element that answers queries synchronously and can refuse
//!   `play()` outright when autoplay is blocked
//! - a remote embedded player reached over a command channel, whose state
//!   changes only ever arrive as events
//!
//! Both push their notifications as [`SourceEvent`]s tagged with the
//! activation generation they belong to. The deck drops events from any
//! generation other than the live one, so a backend that was switched away
//! from can never touch the session again.

use crate::domain::error::PlaybackError;
use crate::domain::session::SourceMode;
use crate::domain::source::{LocalTrack, VideoId};
use tokio::sync::mpsc::UnboundedSender;

// =============================================================================
// Events
// =============================================================================

/// State reported by the remote player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    Playing,
    Paused,
    Buffering,
    Ended,
    Cued,
}

/// A notification from whichever backend is (or was) active.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The local element can start playing.
    Ready,
    /// Position/duration report. `duration` is `None` while unknown.
    Times { current: f64, duration: Option<f64> },
    /// Remote player state change.
    State(RemoteState),
    /// The remote player moved on to another video (playlists).
    NowPlaying(VideoId),
    /// Local playback reached the end.
    Ended,
    /// Playback failed after it was started.
    Failed(PlaybackError),
    /// The remote player refused a load command.
    Rejected,
}

/// A backend event stamped with the activation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEvent {
    pub generation: u64,
    pub event: BackendEvent,
}

/// Sending half handed to collaborators so they can report back.
#[derive(Debug, Clone)]
pub struct EventNotifier {
    generation: u64,
    tx: UnboundedSender<SourceEvent>,
}

impl EventNotifier {
    #[must_use]
    pub fn new(generation: u64, tx: UnboundedSender<SourceEvent>) -> Self {
        Self { generation, tx }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sends `event`; a closed channel means nobody is listening any more.
    pub fn notify(&self, event: BackendEvent) {
        let _ = self.tx.send(SourceEvent {
            generation: self.generation,
            event,
        });
    }
}

// =============================================================================
// Local media element
// =============================================================================

/// A media-element-like primitive playing local audio.
///
/// Readiness, progress, end and failure are pushed through the notifier
/// given to [`MediaElement::load`].
pub trait MediaElement {
    /// Starts loading `track`, replacing anything loaded before.
    fn load(&mut self, track: &LocalTrack, notifier: EventNotifier);

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Blocked`] when autoplay policy refuses, or
    /// another error when nothing playable is loaded.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// `None` until metadata is known.
    fn duration(&self) -> Option<f64>;

    /// Stops playback and releases the loaded source.
    fn unload(&mut self);
}

// =============================================================================
// Remote player commands
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    LoadVideo(VideoId),
    LoadPlaylist(String),
    Play,
    Pause,
    Seek(f64),
    Stop,
    /// Asks for a [`BackendEvent::Times`] reply.
    QueryTimes,
}

/// A command stamped with the activation that issued it; replies carry the
/// same generation.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub generation: u64,
    pub command: RemoteCommand,
}

// =============================================================================
// TransportBackend
// =============================================================================

/// Uniform control surface over both backend variants.
pub trait TransportBackend {
    fn kind(&self) -> SourceMode;

    /// Requests playback.
    ///
    /// For a backend whose state is event-driven, `Ok` only means the
    /// command was sent.
    ///
    /// # Errors
    ///
    /// Returns the failure when the request could not be made at all.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Seeks to `secs`, clamped to `[0, duration]`.
    ///
    /// Returns the position actually requested, or `None` (and does
    /// nothing) while the duration is unknown.
    fn seek(&mut self, secs: f64) -> Option<f64>;

    fn current_time(&self) -> f64;

    fn duration(&self) -> Option<f64>;

    /// True when `play`/`pause` take effect immediately.
    fn is_synchronous(&self) -> bool;

    /// Asks an event-driven backend for fresh times. No-op otherwise.
    fn refresh(&mut self) {}

    /// Lets the backend cache whatever an event tells it.
    fn absorb(&mut self, _event: &BackendEvent) {}

    /// Stops playback and releases resources. Errors are swallowed.
    fn stop(&mut self);
}

/// Clamps a seek target against a known duration.
#[must_use]
pub fn clamp_seek(secs: f64, duration: Option<f64>) -> Option<f64> {
    let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    let secs = if secs.is_finite() { secs } else { 0.0 };
    Some(secs.clamp(0.0, duration))
}
