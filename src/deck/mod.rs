// SPDX-License-Identifier: MPL-2.0
//! The deck: one owned context tying input, transport and feedback together.
//!
//! A `Deck` is synchronous. Everything asynchronous reaches it as a call:
//! input events, backend events, frame ticks, remote polls and finished
//! title lookups. The runtime decides when those calls happen; the deck
//! decides what they mean.
//!
//! Status text follows the player's rules:
//!
//! - progress (`M:SS / M:SS`) while scrubbing and on time reports
//! - transient messages (`Loading...`, `Buffering...`) until replaced
//! - one short string per failure; failures always leave playback stopped

pub mod settings;

pub use settings::DeckSettings;

use crate::application::port::{
    BackendEvent, CoverStore, DeckView, GlitchCommand, GlitchSink, Headless, HapticCue,
    HapticSink, InMemoryCovers, Presenter, RemoteState, ScrubDirection, Silent, SourceEvent,
};
use crate::domain::cover::{CoverCarousel, CoverSlot};
use crate::domain::error::PlaybackError;
use crate::domain::geometry::Point;
use crate::domain::rotation::{RotationState, SpinRegime};
use crate::domain::session::{PlaybackSession, SourceMode};
use crate::domain::source::{LocalTrack, VideoId};
use crate::domain::time_format::format_progress;
use crate::feedback::{GlitchController, GroovePulse, GrooveHaptics};
use crate::gesture::{
    map_key, GestureClassifier, GestureOutcome, GesturePhase, InputEvent, Key, KeyAction,
    PointerKind, TapOutcome, TapResolver,
};
use crate::scrub::ScrubTranslator;
use crate::transport::remote_url::parse_youtube_url;
use crate::transport::Transport;
use std::time::Instant;

pub const STATUS_LOADING: &str = "Loading...";
pub const STATUS_BUFFERING: &str = "Buffering...";
pub const STATUS_TAP_TO_START: &str = "Tap play to start";
pub const STATUS_LOAD_AUDIO_FAILED: &str = "Could not load audio";
pub const STATUS_REMOTE_LOAD_FAILED: &str = "Failed to load";
pub const STATUS_PLAYER_NOT_READY: &str = "Player not ready";
pub const PLAYLIST_TITLE: &str = "Playlist";

/// Collaborators the deck pushes output to.
pub struct DeckPorts {
    pub haptics: Box<dyn HapticSink>,
    pub glitch: Box<dyn GlitchSink>,
    pub presenter: Box<dyn Presenter>,
    pub covers: Box<dyn CoverStore>,
}

impl Default for DeckPorts {
    fn default() -> Self {
        Self {
            haptics: Box::new(Silent),
            glitch: Box::new(Silent),
            presenter: Box::new(Headless),
            covers: Box::new(InMemoryCovers::default()),
        }
    }
}

/// A title lookup the runtime should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRequest {
    /// Activation the lookup belongs to; results for older ones are dropped.
    pub generation: u64,
    pub id: VideoId,
}

/// Requests the deck cannot fulfil itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndAction {
    DismissOverlays,
}

pub struct Deck {
    settings: DeckSettings,
    session: PlaybackSession,
    rotation: RotationState,
    transport: Transport,
    gestures: GestureClassifier,
    taps: TapResolver,
    scrub: ScrubTranslator,
    groove: GrooveHaptics,
    glitch: GlitchController,
    carousel: CoverCarousel,
    ports: DeckPorts,
    status: String,
    title: String,
    scrub_direction: ScrubDirection,
    autoplay_pending: bool,
    remote_video: Option<VideoId>,
    title_requests: Vec<TitleRequest>,
    last_frame: Option<Instant>,
    presented: Option<DeckView>,
}

impl Deck {
    /// Builds a deck around `transport`. `pivot` is the disc center in
    /// viewport pixels.
    #[must_use]
    pub fn new(settings: DeckSettings, transport: Transport, pivot: Point, ports: DeckPorts) -> Self {
        let has_custom = ports.covers.load().is_some();
        Self {
            session: PlaybackSession::new(),
            rotation: RotationState::new(),
            transport,
            gestures: GestureClassifier::new(pivot, settings.thresholds),
            taps: TapResolver::from(&settings.taps),
            scrub: ScrubTranslator::new(settings.seconds_per_rotation),
            groove: GrooveHaptics::new(settings.groove),
            glitch: GlitchController::new(settings.glitch),
            carousel: CoverCarousel::new(has_custom),
            ports,
            settings,
            status: String::new(),
            title: String::new(),
            scrub_direction: ScrubDirection::Still,
            autoplay_pending: false,
            remote_video: None,
            title_requests: Vec::new(),
            last_frame: None,
            presented: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[must_use]
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn cover(&self) -> CoverSlot {
        self.carousel.slot()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.phase() == GesturePhase::Dragging
    }

    #[must_use]
    pub fn pivot(&self) -> Point {
        self.gestures.pivot()
    }

    #[must_use]
    pub fn view(&self) -> DeckView {
        DeckView {
            status: self.status.clone(),
            title: self.title.clone(),
            playing: self.session.is_playing(),
            rotation_degrees: self.rotation.display_degrees(),
            dragging: self.is_dragging(),
            scrub: self.scrub_direction,
            cover: self.carousel.slot(),
        }
    }

    // =========================================================================
    // Feedback helpers
    // =========================================================================

    fn cue(&mut self, cue: HapticCue) {
        if self.settings.haptics_enabled {
            self.ports.haptics.fire(cue);
        }
    }

    fn send_glitch(&mut self, command: Option<GlitchCommand>) {
        if let Some(command) = command {
            if self.settings.glitch_enabled {
                self.ports.glitch.send(command);
            }
        }
    }

    fn set_status(&mut self, status: &str) {
        status.clone_into(&mut self.status);
    }

    fn show_progress(&mut self) {
        if let Some(duration) = self.session.duration() {
            self.status = format_progress(self.session.current_time(), duration);
        }
    }

    /// Pushes the view to the presenter if it changed since last time.
    pub fn present(&mut self) {
        let view = self.view();
        if self.presented.as_ref() != Some(&view) {
            self.ports.presenter.present(&view);
            self.presented = Some(view);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Routes one input event observed at `now`.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Option<FrontEndAction> {
        match event {
            InputEvent::Down { point, kind } => self.pointer_down(point, kind, now),
            InputEvent::Move { point } => self.pointer_move(point, now),
            InputEvent::Up => self.pointer_up(now),
            InputEvent::Key(key) => return self.key(key),
            InputEvent::PlayButton => self.play_button(),
        }
        None
    }

    pub fn pointer_down(&mut self, point: Point, kind: PointerKind, now: Instant) {
        let can_drag = self.session.has_source();
        if let GestureOutcome::DragStarted { angle } = self.gestures.down(point, kind, can_drag) {
            self.begin_drag(angle, now);
        }
    }

    pub fn pointer_move(&mut self, point: Point, now: Instant) {
        if let GestureOutcome::DragMoved { angle } = self.gestures.moved(point) {
            self.drag_to(angle, now);
        }
    }

    /// Ends the gesture wherever the pointer was released.
    pub fn pointer_up(&mut self, now: Instant) {
        if let GestureOutcome::Released { tap, dragged } = self.gestures.up() {
            if dragged {
                self.end_drag();
            }
            if tap {
                self.register_tap(now);
            }
        }
    }

    pub fn key(&mut self, key: Key) -> Option<FrontEndAction> {
        match map_key(key, self.settings.seek_step)? {
            KeyAction::TogglePlayback => {
                if self.session.has_source() {
                    self.toggle_playback();
                }
            }
            KeyAction::SeekBy(offset) => {
                if self.session.has_source() {
                    self.sync_from_backend();
                    if self.session.duration().is_some() {
                        self.seek(self.session.current_time() + offset);
                    }
                }
            }
            KeyAction::Dismiss => return Some(FrontEndAction::DismissOverlays),
        }
        None
    }

    /// Play button: loads the default track when nothing is loaded.
    pub fn play_button(&mut self) {
        if self.session.has_source() {
            self.toggle_playback();
        } else {
            self.load_default_track();
        }
    }

    fn begin_drag(&mut self, angle: f64, now: Instant) {
        self.cue(HapticCue::Grab);
        self.groove.begin(now);
        self.scrub.begin(angle, now);
        self.scrub_direction = ScrubDirection::Still;
        if let Some(backend) = self.transport.backend() {
            self.session
                .report_times(backend.current_time(), backend.duration());
        }
        log::debug!(
            "Drag started at {:.1}s of {:?}",
            self.session.current_time(),
            self.session.duration()
        );
    }

    fn drag_to(&mut self, angle: f64, now: Instant) {
        let sample = self.scrub.apply(
            angle,
            now,
            &mut self.rotation,
            &mut self.session,
            self.transport.backend_mut(),
        );
        if sample.position.is_none() {
            return;
        }
        self.show_progress();

        match self.groove.sample(sample.delta, now) {
            Some(GroovePulse::Ridge(intensity)) => self.cue(HapticCue::Groove(intensity)),
            Some(GroovePulse::DirectionChange) => self.cue(HapticCue::DirectionChange),
            None => {}
        }

        self.scrub_direction = if !self.settings.glitch.is_audible(sample.delta) {
            ScrubDirection::Still
        } else if sample.delta < 0.0 {
            ScrubDirection::Rewind
        } else {
            ScrubDirection::Forward
        };
        let command = self.glitch.on_delta(sample.delta);
        self.send_glitch(command);
    }

    fn end_drag(&mut self) {
        self.scrub_direction = ScrubDirection::Still;
        let command = self.glitch.release();
        self.send_glitch(command);
    }

    fn register_tap(&mut self, now: Instant) {
        self.poll_taps(now);
        if self.taps.tap(now) == TapOutcome::Double {
            self.cue(HapticCue::CdSwap);
            let slot = self.carousel.cycle();
            log::debug!("Double tap: cover {slot:?}");
        }
    }

    fn poll_taps(&mut self, now: Instant) {
        if self.taps.poll(now) && self.session.has_source() {
            log::debug!("Single tap: toggle playback");
            self.toggle_playback();
        }
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn sync_from_backend(&mut self) {
        if let Some(backend) = self.transport.backend() {
            if backend.is_synchronous() {
                self.session
                    .report_times(backend.current_time(), backend.duration());
            }
        }
    }

    /// Plays when paused and pauses when playing.
    pub fn toggle_playback(&mut self) {
        if !self.session.has_source() {
            return;
        }
        if self.session.is_playing() {
            self.cue(HapticCue::Pause);
            if let Some(backend) = self.transport.backend_mut() {
                backend.pause();
                if backend.is_synchronous() {
                    self.session.set_playing(false);
                }
            }
        } else {
            self.cue(HapticCue::Play);
            let Some(backend) = self.transport.backend_mut() else {
                return;
            };
            let synchronous = backend.is_synchronous();
            match backend.play() {
                Ok(()) => {
                    if synchronous {
                        self.session.set_playing(true);
                    }
                }
                Err(PlaybackError::Blocked) => {
                    self.session.set_playing(false);
                    self.set_status(STATUS_TAP_TO_START);
                }
                Err(err) => self.fail_playback(&err),
            }
        }
    }

    /// Seeks the active source to `secs`, clamped to the known duration.
    /// Does nothing while the duration is unknown.
    pub fn seek(&mut self, secs: f64) {
        self.sync_from_backend();
        if self.session.duration().is_none() {
            return;
        }
        let target = self.session.seek_clamped(secs);
        if let Some(backend) = self.transport.backend_mut() {
            backend.seek(target);
        }
        self.show_progress();
    }

    fn fail_playback(&mut self, err: &PlaybackError) {
        log::warn!("Playback failed: {err} ({:?})", err.class());
        self.cue(HapticCue::Error);
        self.session.set_playing(false);
        self.set_status(err.status_text());
    }

    /// Loads a local track and plays it once it is ready.
    pub fn load_local(&mut self, track: LocalTrack) {
        log::info!("Loading local track {}", track.location());
        self.session.begin(SourceMode::LocalFile);
        self.transport.load_local(&track);
        self.remote_video = None;
        self.autoplay_pending = true;
        track.title().clone_into(&mut self.title);
        self.set_status(STATUS_LOADING);
    }

    pub fn load_default_track(&mut self) {
        let track = self.settings.default_track.clone();
        self.load_local(track);
    }

    /// Loads whatever video or playlist `input` points at.
    ///
    /// Returns false, with the reason in the status line, when nothing was
    /// loaded.
    pub fn load_remote_url(&mut self, input: &str) -> bool {
        self.cue(HapticCue::Tap);
        let loaded = self.try_load_remote(input);
        if !loaded {
            self.cue(HapticCue::Error);
        }
        loaded
    }

    fn try_load_remote(&mut self, input: &str) -> bool {
        if !self.transport.remote_available() {
            self.set_status(STATUS_PLAYER_NOT_READY);
            return false;
        }
        self.set_status(STATUS_LOADING);
        self.title.clear();

        let target = match parse_youtube_url(input) {
            Ok(target) => target,
            Err(err) => {
                log::info!("Rejected remote input {input:?}: {err}");
                self.set_status(err.status_text());
                return false;
            }
        };

        self.autoplay_pending = false;
        self.session.begin(SourceMode::RemoteVideo);
        if let Err(err) = self.transport.load_remote(&target) {
            log::warn!("Remote load failed: {err}");
            self.session.clear();
            self.set_status(STATUS_REMOTE_LOAD_FAILED);
            return false;
        }

        self.cue(HapticCue::Success);
        self.remote_video = target.video().cloned();
        match target.video() {
            Some(video) => self.request_title(video.clone()),
            None => PLAYLIST_TITLE.clone_into(&mut self.title),
        }
        true
    }

    /// Asks an event-driven backend for fresh times. Skipped while dragging.
    pub fn poll_remote(&mut self) {
        if self.session.mode() != SourceMode::RemoteVideo || self.is_dragging() {
            return;
        }
        if let Some(backend) = self.transport.backend_mut() {
            backend.refresh();
        }
    }

    // =========================================================================
    // Backend events
    // =========================================================================

    /// Applies one backend event. Events from a torn-down activation are
    /// dropped.
    pub fn handle_source_event(&mut self, event: SourceEvent) {
        if !self.transport.is_current(&event) {
            log::debug!(
                "Dropping stale event {:?} (generation {}, live {})",
                event.event,
                event.generation,
                self.transport.generation()
            );
            return;
        }
        if let Some(backend) = self.transport.backend_mut() {
            backend.absorb(&event.event);
        }
        match self.session.mode() {
            SourceMode::LocalFile => self.on_local_event(event.event),
            SourceMode::RemoteVideo => self.on_remote_event(event.event),
            SourceMode::None => {}
        }
    }

    fn report_times(&mut self, current: f64, duration: Option<f64>) {
        if self.is_dragging() {
            return;
        }
        self.session.report_times(current, duration);
        self.show_progress();
    }

    fn on_ended(&mut self) {
        self.session.set_playing(false);
        self.rotation.halt();
    }

    fn on_local_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Ready => {
                if std::mem::take(&mut self.autoplay_pending) {
                    self.autoplay();
                }
            }
            BackendEvent::Times { current, duration } => self.report_times(current, duration),
            BackendEvent::Ended => self.on_ended(),
            BackendEvent::Failed(err) => {
                if std::mem::take(&mut self.autoplay_pending) {
                    log::warn!("Local load failed: {err}");
                    self.session.set_playing(false);
                    self.set_status(STATUS_LOAD_AUDIO_FAILED);
                    self.cue(HapticCue::Error);
                } else {
                    self.fail_playback(&err);
                }
            }
            BackendEvent::State(_) | BackendEvent::NowPlaying(_) | BackendEvent::Rejected => {}
        }
    }

    fn autoplay(&mut self) {
        self.sync_from_backend();
        let Some(backend) = self.transport.backend_mut() else {
            return;
        };
        match backend.play() {
            Ok(()) => {
                self.cue(HapticCue::Success);
                self.session.set_playing(true);
                self.status.clear();
            }
            Err(PlaybackError::Blocked) => {
                log::info!("Autoplay blocked");
                self.set_status(STATUS_TAP_TO_START);
            }
            Err(err) => {
                log::warn!("Autoplay failed: {err}");
                self.set_status(STATUS_LOAD_AUDIO_FAILED);
                self.cue(HapticCue::Error);
            }
        }
    }

    fn on_remote_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::State(RemoteState::Playing) => {
                self.session.set_playing(true);
                if !self.is_dragging() {
                    self.status.clear();
                }
                if let Some(video) = self.remote_video.clone() {
                    self.request_title(video);
                }
            }
            BackendEvent::State(RemoteState::Paused) => {
                if !self.is_dragging() {
                    self.session.set_playing(false);
                }
            }
            BackendEvent::State(RemoteState::Ended) | BackendEvent::Ended => self.on_ended(),
            BackendEvent::State(RemoteState::Buffering) => {
                if !self.is_dragging() {
                    self.set_status(STATUS_BUFFERING);
                }
            }
            BackendEvent::State(RemoteState::Cued) | BackendEvent::Ready => {}
            BackendEvent::NowPlaying(video) => {
                self.remote_video = Some(video.clone());
                self.request_title(video);
            }
            BackendEvent::Times { current, duration } => self.report_times(current, duration),
            BackendEvent::Failed(err) => self.fail_playback(&err),
            BackendEvent::Rejected => {
                log::warn!("Remote player rejected the load");
                self.transport.teardown();
                self.session.clear();
                self.remote_video = None;
                self.set_status(STATUS_REMOTE_LOAD_FAILED);
            }
        }
    }

    // =========================================================================
    // Titles
    // =========================================================================

    fn request_title(&mut self, id: VideoId) {
        self.title_requests.push(TitleRequest {
            generation: self.transport.generation(),
            id,
        });
    }

    /// Title lookups queued since the last call.
    pub fn take_title_requests(&mut self) -> Vec<TitleRequest> {
        std::mem::take(&mut self.title_requests)
    }

    /// Shows a fetched title if its activation is still live.
    pub fn apply_title(&mut self, request: &TitleRequest, title: Option<String>) {
        let live = self.session.mode() == SourceMode::RemoteVideo
            && request.generation == self.transport.generation();
        match title {
            Some(title) if live && !title.is_empty() => self.title = title,
            _ => {}
        }
    }

    // =========================================================================
    // Cover
    // =========================================================================

    /// Stores and shows a custom cover.
    pub fn upload_cover(&mut self, bytes: &[u8]) -> bool {
        self.cue(HapticCue::Tap);
        match self.ports.covers.store(bytes) {
            Ok(()) => {
                self.carousel.set_custom();
                self.cue(HapticCue::Success);
                self.status.clear();
                true
            }
            Err(err) => {
                log::warn!("Cover rejected: {err}");
                self.set_status(err.status_text());
                self.cue(HapticCue::Error);
                false
            }
        }
    }

    /// Forgets the custom cover and shows the first built-in one.
    pub fn reset_cover(&mut self) {
        self.cue(HapticCue::Tap);
        match self.ports.covers.clear() {
            Ok(()) => {
                self.carousel.reset();
                self.cue(HapticCue::Success);
            }
            Err(err) => log::warn!("Could not reset cover: {err}"),
        }
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// One animation frame at `now`: physics, due single taps, presentation.
    pub fn tick(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last_frame = Some(now);

        let regime = if self.is_dragging() {
            SpinRegime::Dragging
        } else if self.session.is_playing() {
            SpinRegime::Playing
        } else {
            SpinRegime::Idle
        };
        self.rotation.tick(dt, regime, &self.settings.spin);
        self.poll_taps(now);
        self.present();
    }

    /// Stops playback and the glitch voice.
    pub fn shutdown(&mut self) {
        log::info!("Deck shutting down");
        self.end_drag();
        self.taps.cancel();
        self.transport.teardown();
        self.session.clear();
    }
}

#[cfg(test)]
mod tests;
