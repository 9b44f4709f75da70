// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::application::port::{EventNotifier, GlitchCommand, MediaElement, RemoteCommand, RemoteRequest};
use crate::domain::newtypes::HapticIntensity;
use crate::test_utils::{assert_abs_diff_eq, LastView, RecordingGlitch, RecordingHaptics};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const PIVOT: Point = Point::new(200.0, 200.0);

#[derive(Default)]
struct ElementState {
    notifier: Option<EventNotifier>,
    loaded: Option<String>,
    playing: bool,
    current: f64,
    duration: Option<f64>,
    block_play: bool,
}

#[derive(Clone, Default)]
struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    fn emit(&self, event: BackendEvent) {
        if let Some(notifier) = &self.0.borrow().notifier {
            notifier.notify(event);
        }
    }

    fn set_duration(&self, secs: f64) {
        self.0.borrow_mut().duration = Some(secs);
    }
}

impl MediaElement for FakeElement {
    fn load(&mut self, track: &LocalTrack, notifier: EventNotifier) {
        let mut state = self.0.borrow_mut();
        state.loaded = Some(track.location().to_string());
        state.notifier = Some(notifier);
        state.current = 0.0;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.0.borrow_mut();
        if state.block_play {
            return Err(PlaybackError::Blocked);
        }
        if state.loaded.is_none() {
            return Err(PlaybackError::LoadFailed);
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().current
    }

    fn set_current_time(&mut self, secs: f64) {
        self.0.borrow_mut().current = secs;
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }

    fn unload(&mut self) {
        let mut state = self.0.borrow_mut();
        state.loaded = None;
        state.playing = false;
        state.notifier = None;
    }
}

struct Harness {
    deck: Deck,
    element: FakeElement,
    haptics: RecordingHaptics,
    glitch: RecordingGlitch,
    view: LastView,
    events: UnboundedReceiver<SourceEvent>,
    remote: UnboundedReceiver<RemoteRequest>,
    start: Instant,
}

impl Harness {
    fn new() -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (remote_tx, remote) = mpsc::unbounded_channel();
        Self::with_channels(events_tx, events, Some(remote_tx), remote)
    }

    fn without_player() -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (_unused, remote) = mpsc::unbounded_channel();
        Self::with_channels(events_tx, events, None, remote)
    }

    fn with_channels(
        events_tx: mpsc::UnboundedSender<SourceEvent>,
        events: UnboundedReceiver<SourceEvent>,
        remote_tx: Option<mpsc::UnboundedSender<RemoteRequest>>,
        remote: UnboundedReceiver<RemoteRequest>,
    ) -> Self {
        let element = FakeElement::default();
        let haptics = RecordingHaptics::default();
        let glitch = RecordingGlitch::default();
        let view = LastView::default();
        let transport = Transport::new(Box::new(element.clone()), remote_tx, events_tx);
        let ports = DeckPorts {
            haptics: Box::new(haptics.clone()),
            glitch: Box::new(glitch.clone()),
            presenter: Box::new(view.clone()),
            covers: Box::new(InMemoryCovers::default()),
        };
        Self {
            deck: Deck::new(DeckSettings::default(), transport, PIVOT, ports),
            element,
            haptics,
            glitch,
            view,
            events,
            remote,
            start: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.deck.handle_source_event(event);
        }
    }

    fn remote_commands(&mut self) -> Vec<RemoteCommand> {
        std::iter::from_fn(|| self.remote.try_recv().ok())
            .map(|request| request.command)
            .collect()
    }

    fn remote_event(&mut self, event: BackendEvent) {
        let generation = self.deck.transport().generation();
        self.deck
            .handle_source_event(SourceEvent { generation, event });
    }

    /// Loads a local track of `duration` seconds and lets it start.
    fn playing_local(duration: f64) -> Self {
        let mut h = Self::new();
        h.element.set_duration(duration);
        h.deck.load_local(LocalTrack::new("/music/song.mp3", "song"));
        h.element.emit(BackendEvent::Ready);
        h.element.emit(BackendEvent::Times {
            current: 0.0,
            duration: Some(duration),
        });
        h.pump();
        h.haptics.take();
        h
    }

    fn playing_remote() -> Self {
        let mut h = Self::new();
        assert!(h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ"));
        h.remote_event(BackendEvent::State(RemoteState::Playing));
        h.remote_event(BackendEvent::Times {
            current: 30.0,
            duration: Some(240.0),
        });
        h.remote_commands();
        h.haptics.take();
        h.deck.take_title_requests();
        h
    }
}

fn right_of_pivot() -> Point {
    PIVOT.on_circle(100.0, 0.0)
}

// =============================================================================
// Local loading
// =============================================================================

#[test]
fn local_load_shows_title_then_autoplays_on_ready() {
    let mut h = Harness::new();
    h.deck.load_local(LocalTrack::new("/music/song.mp3", "song"));
    assert_eq!(h.deck.status(), STATUS_LOADING);
    assert_eq!(h.deck.title(), "song");
    assert_eq!(h.deck.session().mode(), SourceMode::LocalFile);
    assert!(!h.deck.session().is_playing());

    h.element.emit(BackendEvent::Ready);
    h.pump();
    assert!(h.deck.session().is_playing());
    assert_eq!(h.deck.status(), "");
    assert_eq!(h.haptics.take(), vec![HapticCue::Success]);
}

#[test]
fn blocked_autoplay_asks_for_a_tap() {
    let mut h = Harness::new();
    h.element.0.borrow_mut().block_play = true;
    h.deck.load_local(LocalTrack::new("a.mp3", "a"));
    h.element.emit(BackendEvent::Ready);
    h.pump();

    assert_eq!(h.deck.status(), STATUS_TAP_TO_START);
    assert!(!h.deck.session().is_playing());
    assert!(h.haptics.take().is_empty());
}

#[test]
fn failure_while_loading_reports_generic_message() {
    let mut h = Harness::new();
    h.deck.load_local(LocalTrack::new("broken.mp3", "broken"));
    h.element
        .emit(BackendEvent::Failed(PlaybackError::FormatNotSupported));
    h.pump();

    assert_eq!(h.deck.status(), STATUS_LOAD_AUDIO_FAILED);
    assert_eq!(h.haptics.take(), vec![HapticCue::Error]);
    assert!(!h.deck.session().is_playing());
}

#[test]
fn failure_during_playback_reports_its_own_text() {
    let mut h = Harness::playing_local(120.0);
    h.element.emit(BackendEvent::Failed(PlaybackError::Network));
    h.pump();

    assert_eq!(h.deck.status(), "Network error");
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.haptics.take(), vec![HapticCue::Error]);
    assert!(!h.deck.view().playing);
}

#[test]
fn time_reports_show_progress() {
    let mut h = Harness::playing_local(120.0);
    h.element.emit(BackendEvent::Times {
        current: 65.4,
        duration: Some(120.0),
    });
    h.pump();
    assert_eq!(h.deck.status(), "1:05 / 2:00");
}

#[test]
fn seek_past_the_end_clamps_to_duration() {
    let mut h = Harness::playing_local(120.0);
    h.deck.seek(200.0);

    assert_abs_diff_eq!(h.deck.session().current_time(), 120.0);
    assert_abs_diff_eq!(h.element.0.borrow().current, 120.0);
    assert_eq!(h.deck.status(), "2:00 / 2:00");
}

#[test]
fn ended_stops_playback_and_the_disc() {
    let mut h = Harness::playing_local(120.0);
    let now = h.at(0);
    h.deck.tick(now);
    h.deck.tick(h.at(100));
    assert!(h.deck.rotation().angular_velocity() > 0.0);

    h.element.emit(BackendEvent::Ended);
    h.pump();
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.deck.rotation().angular_velocity(), 0.0);
}

#[test]
fn play_button_without_source_loads_default_track() {
    let mut h = Harness::new();
    h.deck.handle_input(InputEvent::PlayButton, h.at(0));

    assert_eq!(h.deck.title(), "Mondays Thoughts");
    assert_eq!(
        h.element.0.borrow().loaded.as_deref(),
        Some("default-track.mp3")
    );
}

#[test]
fn play_button_toggles_loaded_source() {
    let mut h = Harness::playing_local(60.0);
    h.deck.handle_input(InputEvent::PlayButton, h.at(0));
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.haptics.take(), vec![HapticCue::Pause]);

    h.deck.handle_input(InputEvent::PlayButton, h.at(10));
    assert!(h.deck.session().is_playing());
    assert_eq!(h.haptics.take(), vec![HapticCue::Play]);
}

// =============================================================================
// Taps
// =============================================================================

fn tap(h: &mut Harness, ms: u64) {
    let now = h.at(ms);
    h.deck.handle_input(
        InputEvent::Down {
            point: right_of_pivot(),
            kind: PointerKind::Mouse,
        },
        now,
    );
    h.deck.handle_input(InputEvent::Up, now);
}

#[test]
fn single_tap_toggles_once_the_window_closes() {
    let mut h = Harness::playing_local(120.0);
    tap(&mut h, 0);
    h.deck.tick(h.at(300));
    assert!(h.deck.session().is_playing());

    h.deck.tick(h.at(416));
    assert!(!h.deck.session().is_playing());
    let cues = h.haptics.take();
    assert_eq!(cues.first(), Some(&HapticCue::Grab));
    assert_eq!(cues.last(), Some(&HapticCue::Pause));
}

#[test]
fn double_tap_swaps_cover_even_without_source() {
    let mut h = Harness::new();
    tap(&mut h, 0);
    tap(&mut h, 250);
    assert_eq!(h.deck.cover(), CoverSlot::BuiltIn(1));
    assert_eq!(h.haptics.take(), vec![HapticCue::CdSwap]);

    h.deck.tick(h.at(1_000));
    assert!(!h.deck.session().has_source());
}

#[test]
fn double_tap_does_not_toggle_playback() {
    let mut h = Harness::playing_local(120.0);
    tap(&mut h, 0);
    tap(&mut h, 300);
    h.deck.tick(h.at(2_000));
    assert!(h.deck.session().is_playing());
}

// =============================================================================
// Dragging
// =============================================================================

#[test]
fn drag_scrubs_rotates_and_sounds() {
    let mut h = Harness::playing_local(120.0);
    h.deck.seek(60.0);
    let rotation_before = h.deck.rotation().rotation_degrees();

    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    assert!(h.deck.is_dragging());
    h.deck.pointer_move(PIVOT.on_circle(100.0, 90.0), h.at(16));

    assert_abs_diff_eq!(h.deck.session().current_time(), 60.75, epsilon = 1e-9);
    assert_abs_diff_eq!(h.element.0.borrow().current, 60.75, epsilon = 1e-9);
    assert_abs_diff_eq!(
        h.deck.rotation().rotation_degrees() - rotation_before,
        90.0,
        epsilon = 1e-9
    );
    assert_eq!(h.deck.status(), "1:00 / 2:00");
    assert_eq!(h.deck.view().scrub, ScrubDirection::Forward);
    assert_eq!(
        h.haptics.take(),
        vec![HapticCue::Grab, HapticCue::Groove(HapticIntensity::FULL)]
    );
    assert!(matches!(
        h.glitch.take().as_slice(),
        [GlitchCommand::Start(_)]
    ));

    h.deck.pointer_up(h.at(32));
    assert!(!h.deck.is_dragging());
    assert_eq!(h.deck.view().scrub, ScrubDirection::Still);
    assert!(matches!(
        h.glitch.take().as_slice(),
        [GlitchCommand::Release { .. }]
    ));

    // Moved well past the threshold: no single tap later.
    h.deck.tick(h.at(1_000));
    assert!(h.deck.session().is_playing());
}

#[test]
fn reverse_scrub_shows_rewind() {
    let mut h = Harness::playing_local(120.0);
    h.deck.pointer_down(right_of_pivot(), PointerKind::Touch, h.at(0));
    h.deck.pointer_move(PIVOT.on_circle(100.0, -10.0), h.at(16));
    assert_eq!(h.deck.view().scrub, ScrubDirection::Rewind);

    h.deck.pointer_move(PIVOT.on_circle(100.0, -11.0), h.at(32));
    assert_eq!(h.deck.view().scrub, ScrubDirection::Still);
}

#[test]
fn drag_without_duration_does_not_seek_or_sound() {
    let mut h = Harness::new();
    h.deck.load_local(LocalTrack::new("a.mp3", "a"));
    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    h.deck.pointer_move(PIVOT.on_circle(100.0, 45.0), h.at(16));

    assert_abs_diff_eq!(h.deck.rotation().rotation_degrees(), 45.0, epsilon = 1e-9);
    assert_abs_diff_eq!(h.deck.session().current_time(), 0.0);
    assert!(h.glitch.take().is_empty());
    assert_eq!(h.deck.status(), STATUS_LOADING);
}

#[test]
fn no_drag_without_source() {
    let mut h = Harness::new();
    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    assert!(!h.deck.is_dragging());
    h.deck.pointer_move(PIVOT.on_circle(100.0, 90.0), h.at(16));
    assert_abs_diff_eq!(h.deck.rotation().rotation_degrees(), 0.0);
    assert!(h.haptics.take().is_empty());
}

#[test]
fn time_reports_are_ignored_while_dragging() {
    let mut h = Harness::playing_local(120.0);
    h.deck.seek(30.0);
    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    h.element.emit(BackendEvent::Times {
        current: 90.0,
        duration: Some(120.0),
    });
    h.pump();
    assert_abs_diff_eq!(h.deck.session().current_time(), 30.0);
}

#[test]
fn glitch_respects_disabled_setting() {
    let mut h = Harness::playing_local(120.0);
    h.deck.settings.glitch_enabled = false;
    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    h.deck.pointer_move(PIVOT.on_circle(100.0, 30.0), h.at(16));
    h.deck.pointer_up(h.at(32));
    assert!(h.glitch.take().is_empty());
}

// =============================================================================
// Keyboard
// =============================================================================

#[test]
fn arrows_seek_by_step_within_bounds() {
    let mut h = Harness::playing_local(120.0);
    h.deck.seek(2.0);
    h.deck.key(Key::Left);
    assert_abs_diff_eq!(h.deck.session().current_time(), 0.0);
    h.deck.key(Key::Right);
    h.deck.key(Key::Right);
    assert_abs_diff_eq!(h.deck.session().current_time(), 10.0);
}

#[test]
fn keys_do_nothing_without_source() {
    let mut h = Harness::new();
    h.deck.key(Key::Space);
    h.deck.key(Key::Right);
    assert!(!h.deck.session().has_source());
    assert!(h.haptics.take().is_empty());
}

#[test]
fn space_and_k_toggle_and_escape_dismisses() {
    let mut h = Harness::playing_local(120.0);
    assert_eq!(h.deck.key(Key::Space), None);
    assert!(!h.deck.session().is_playing());
    h.deck.key(Key::Char('k'));
    assert!(h.deck.session().is_playing());
    assert_eq!(
        h.deck.handle_input(InputEvent::Key(Key::Escape), h.at(0)),
        Some(FrontEndAction::DismissOverlays)
    );
}

// =============================================================================
// Remote
// =============================================================================

#[test]
fn remote_load_sends_video_and_requests_title() {
    let mut h = Harness::new();
    assert!(h.deck.load_remote_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));

    assert_eq!(h.deck.session().mode(), SourceMode::RemoteVideo);
    assert_eq!(h.deck.status(), STATUS_LOADING);
    assert_eq!(h.haptics.take(), vec![HapticCue::Tap, HapticCue::Success]);
    assert!(matches!(
        h.remote_commands().as_slice(),
        [RemoteCommand::LoadVideo(_)]
    ));
    let requests = h.deck.take_title_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id.as_str(), "dQw4w9WgXcQ");
}

#[test]
fn playlist_load_uses_playlist_title() {
    let mut h = Harness::new();
    assert!(h.deck.load_remote_url("youtube.com/playlist?list=PL123"));
    assert_eq!(h.deck.title(), PLAYLIST_TITLE);
    assert!(h.deck.take_title_requests().is_empty());
}

#[test]
fn remote_state_comes_from_events_only() {
    let mut h = Harness::new();
    h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ");
    h.remote_commands();

    h.deck.toggle_playback();
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.remote_commands(), vec![RemoteCommand::Play]);

    h.remote_event(BackendEvent::State(RemoteState::Playing));
    assert!(h.deck.session().is_playing());
    assert_eq!(h.deck.status(), "");

    h.remote_event(BackendEvent::State(RemoteState::Buffering));
    assert_eq!(h.deck.status(), STATUS_BUFFERING);

    h.remote_event(BackendEvent::State(RemoteState::Paused));
    assert!(!h.deck.session().is_playing());
}

#[test]
fn remote_error_codes_map_to_status() {
    let mut h = Harness::playing_remote();
    h.remote_event(BackendEvent::Failed(PlaybackError::from_remote_code(150)));
    assert_eq!(h.deck.status(), "Embedding disabled");
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.haptics.take(), vec![HapticCue::Error]);
}

#[test]
fn remote_times_show_progress_and_poll_queries() {
    let mut h = Harness::playing_remote();
    assert_eq!(h.deck.status(), "0:30 / 4:00");

    h.deck.poll_remote();
    assert_eq!(h.remote_commands(), vec![RemoteCommand::QueryTimes]);

    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    h.deck.poll_remote();
    assert!(h.remote_commands().is_empty());
}

#[test]
fn remote_scrub_seeks_with_cached_duration() {
    let mut h = Harness::playing_remote();
    h.deck.pointer_down(right_of_pivot(), PointerKind::Mouse, h.at(0));
    h.deck.pointer_move(PIVOT.on_circle(100.0, 120.0), h.at(16));
    match h.remote_commands().as_slice() {
        [RemoteCommand::Seek(target)] => assert_abs_diff_eq!(*target, 31.0, epsilon = 1e-9),
        other => panic!("expected one seek, got {other:?}"),
    }
}

#[test]
fn now_playing_triggers_title_lookup() {
    let mut h = Harness::playing_remote();
    let next = VideoId::parse("abcdefghijk").unwrap();
    h.remote_event(BackendEvent::NowPlaying(next.clone()));
    let requests = h.deck.take_title_requests();
    assert_eq!(requests.last().map(|r| &r.id), Some(&next));
}

#[test]
fn late_remote_event_cannot_touch_local_session() {
    let mut h = Harness::playing_remote();
    let stale_generation = h.deck.transport().generation();

    h.deck.load_local(LocalTrack::new("a.mp3", "a"));
    assert_eq!(h.remote_commands(), vec![RemoteCommand::Stop]);

    h.deck.handle_source_event(SourceEvent {
        generation: stale_generation,
        event: BackendEvent::State(RemoteState::Playing),
    });
    assert!(!h.deck.session().is_playing());
    assert_eq!(h.deck.session().mode(), SourceMode::LocalFile);
}

#[test]
fn stale_title_is_dropped() {
    let mut h = Harness::new();
    h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ");
    let request = h.deck.take_title_requests().remove(0);

    h.deck.load_local(LocalTrack::new("a.mp3", "a"));
    h.deck.apply_title(&request, Some("Old video".into()));
    assert_eq!(h.deck.title(), "a");
}

#[test]
fn fetched_title_is_shown() {
    let mut h = Harness::new();
    h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ");
    let request = h.deck.take_title_requests().remove(0);
    h.deck.apply_title(&request, Some("Never Gonna Give You Up".into()));
    assert_eq!(h.deck.title(), "Never Gonna Give You Up");

    h.deck.apply_title(&request, None);
    assert_eq!(h.deck.title(), "Never Gonna Give You Up");
}

#[test]
fn rejected_load_returns_to_no_source() {
    let mut h = Harness::new();
    h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ");
    h.remote_event(BackendEvent::Rejected);

    assert_eq!(h.deck.status(), STATUS_REMOTE_LOAD_FAILED);
    assert_eq!(h.deck.session().mode(), SourceMode::None);
    assert_eq!(h.deck.transport().active(), SourceMode::None);
}

#[test]
fn bad_url_keeps_previous_source() {
    let mut h = Harness::playing_local(120.0);
    assert!(!h.deck.load_remote_url("https://example.com/video"));

    assert_eq!(h.deck.status(), "Not a YouTube URL");
    assert_eq!(h.deck.session().mode(), SourceMode::LocalFile);
    assert!(h.remote_commands().is_empty());
    assert_eq!(h.haptics.take(), vec![HapticCue::Tap, HapticCue::Error]);
}

#[test]
fn missing_player_is_not_ready() {
    let mut h = Harness::without_player();
    assert!(!h.deck.load_remote_url("https://youtu.be/dQw4w9WgXcQ"));
    assert_eq!(h.deck.status(), STATUS_PLAYER_NOT_READY);
    assert_eq!(h.deck.session().mode(), SourceMode::None);
}

// =============================================================================
// Cover, presentation, shutdown
// =============================================================================

#[test]
fn cover_upload_validates_and_shows_custom() {
    let mut h = Harness::new();
    assert!(!h.deck.upload_cover(b"not an image"));
    assert_eq!(h.deck.status(), "Please select an image");

    assert!(h.deck.upload_cover(b"\x89PNG\r\n\x1a\nrest"));
    assert_eq!(h.deck.cover(), CoverSlot::Custom);

    tap(&mut h, 0);
    tap(&mut h, 200);
    assert_eq!(h.deck.cover(), CoverSlot::BuiltIn(0));

    h.deck.reset_cover();
    assert_eq!(h.deck.cover(), CoverSlot::BuiltIn(0));
    tap(&mut h, 1_000);
    tap(&mut h, 1_200);
    tap(&mut h, 2_000);
    tap(&mut h, 2_200);
    assert_eq!(h.deck.cover(), CoverSlot::BuiltIn(0));
}

#[test]
fn tick_presents_changes_only() {
    let mut h = Harness::new();
    h.deck.tick(h.at(0));
    let first = h.view.get().expect("first view presented");
    assert_eq!(first.status, "");

    h.view.view.borrow_mut().take();
    h.deck.tick(h.at(16));
    assert!(h.view.get().is_none());

    h.deck.load_local(LocalTrack::new("a.mp3", "a"));
    h.deck.tick(h.at(32));
    assert_eq!(h.view.get().map(|v| v.status), Some(STATUS_LOADING.to_string()));
}

#[test]
fn shutdown_unloads_the_element() {
    let mut h = Harness::playing_local(120.0);
    h.deck.shutdown();
    assert!(h.element.0.borrow().loaded.is_none());
    assert_eq!(h.deck.transport().active(), SourceMode::None);
    assert!(!h.deck.session().has_source());
}
