// SPDX-License-Identifier: MPL-2.0
//! Clock-driven stand-ins for the two playback collaborators.
//!
//! Neither decodes anything. They keep a position that advances with the
//! tokio clock while "playing" and report it the way a real media element
//! or embedded player would, so the terminal front-end can exercise every
//! deck flow without a browser.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::port::{
    BackendEvent, EventNotifier, MediaElement, RemoteCommand, RemoteRequest, RemoteState,
    SourceEvent,
};
use crate::domain::error::PlaybackError;
use crate::domain::source::LocalTrack;

/// How often a playing element reports its position.
pub const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// A position that advances with the clock while running.
#[derive(Debug, Clone, Copy)]
struct PlayClock {
    duration: f64,
    offset: f64,
    started: Option<Instant>,
}

impl PlayClock {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            offset: 0.0,
            started: None,
        }
    }

    fn position(&self) -> f64 {
        let running = self
            .started
            .map_or(0.0, |at| at.elapsed().as_secs_f64());
        (self.offset + running).min(self.duration)
    }

    fn is_running(&self) -> bool {
        self.started.is_some()
    }

    fn start(&mut self) {
        if self.position() >= self.duration {
            self.offset = 0.0;
        }
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        self.offset = self.position();
        self.started = None;
    }

    fn set(&mut self, secs: f64) {
        let running = self.is_running();
        self.offset = secs.clamp(0.0, self.duration);
        self.started = running.then(Instant::now);
    }

    fn remaining(&self) -> Option<Duration> {
        self.started?;
        Some(Duration::from_secs_f64(
            (self.duration - self.position()).max(0.0),
        ))
    }

    fn reached_end(&self) -> bool {
        self.is_running() && self.position() >= self.duration
    }
}

// =============================================================================
// Local element
// =============================================================================

#[derive(Debug)]
struct ElementState {
    clock: PlayClock,
    loaded: bool,
}

/// A media element whose tracks all last a fixed number of seconds.
///
/// Missing files fail to load. While playing, a background task reports
/// the position every [`TIME_UPDATE_INTERVAL`] and signals the end.
pub struct ClockedMediaElement {
    track_secs: f64,
    state: Arc<Mutex<ElementState>>,
    reporter: Option<JoinHandle<()>>,
}

impl ClockedMediaElement {
    #[must_use]
    pub fn new(track_secs: f64) -> Self {
        Self {
            track_secs,
            state: Arc::new(Mutex::new(ElementState {
                clock: PlayClock::new(track_secs),
                loaded: false,
            })),
            reporter: None,
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ElementState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn spawn_reporter(&mut self, notifier: EventNotifier) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::warn!("No async runtime, local element will not report progress");
            return;
        };
        let state = Arc::clone(&self.state);
        self.reporter = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(TIME_UPDATE_INTERVAL);
            loop {
                ticker.tick().await;
                let (times, ended) = {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    if !state.clock.is_running() {
                        continue;
                    }
                    let ended = state.clock.reached_end();
                    if ended {
                        state.clock.stop();
                    }
                    (
                        BackendEvent::Times {
                            current: state.clock.position(),
                            duration: Some(state.clock.duration),
                        },
                        ended,
                    )
                };
                notifier.notify(times);
                if ended {
                    notifier.notify(BackendEvent::Ended);
                }
            }
        }));
    }
}

impl MediaElement for ClockedMediaElement {
    fn load(&mut self, track: &LocalTrack, notifier: EventNotifier) {
        self.unload();
        if !Path::new(track.location()).is_file() {
            log::warn!("Local track {} does not exist", track.location());
            notifier.notify(BackendEvent::Failed(PlaybackError::LoadFailed));
            return;
        }
        let secs = self.track_secs;
        self.with_state(|state| {
            state.clock = PlayClock::new(secs);
            state.loaded = true;
        });
        notifier.notify(BackendEvent::Ready);
        notifier.notify(BackendEvent::Times {
            current: 0.0,
            duration: Some(secs),
        });
        self.spawn_reporter(notifier);
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.with_state(|state| {
            if !state.loaded {
                return Err(PlaybackError::LoadFailed);
            }
            state.clock.start();
            Ok(())
        })
    }

    fn pause(&mut self) {
        self.with_state(|state| state.clock.stop());
    }

    fn current_time(&self) -> f64 {
        self.with_state(|state| state.clock.position())
    }

    fn set_current_time(&mut self, secs: f64) {
        self.with_state(|state| state.clock.set(secs));
    }

    fn duration(&self) -> Option<f64> {
        self.with_state(|state| state.loaded.then_some(state.clock.duration))
    }

    fn unload(&mut self) {
        if let Some(reporter) = self.reporter.take() {
            reporter.abort();
        }
        let secs = self.track_secs;
        self.with_state(|state| {
            state.clock = PlayClock::new(secs);
            state.loaded = false;
        });
    }
}

impl Drop for ClockedMediaElement {
    fn drop(&mut self) {
        if let Some(reporter) = self.reporter.take() {
            reporter.abort();
        }
    }
}

// =============================================================================
// Embedded player
// =============================================================================

/// An embedded video player answering the remote command channel.
///
/// Every video lasts `video_secs` and starts playing as soon as it loads.
pub struct SimulatedEmbeddedPlayer {
    clock: PlayClock,
    generation: u64,
    loaded: bool,
}

impl SimulatedEmbeddedPlayer {
    #[must_use]
    pub fn new(video_secs: f64) -> Self {
        Self {
            clock: PlayClock::new(video_secs),
            generation: 0,
            loaded: false,
        }
    }

    /// Serves `requests` until the channel closes.
    pub async fn run(
        mut self,
        mut requests: UnboundedReceiver<RemoteRequest>,
        events: UnboundedSender<SourceEvent>,
    ) {
        log::debug!("Simulated embedded player ready");
        loop {
            let until_end = self.clock.remaining();
            tokio::select! {
                request = requests.recv() => {
                    let Some(request) = request else { break };
                    self.handle(request, &events);
                }
                () = tokio::time::sleep(until_end.unwrap_or_default()), if until_end.is_some() => {
                    self.clock.stop();
                    self.emit(&events, BackendEvent::State(RemoteState::Ended));
                }
            }
        }
        log::debug!("Simulated embedded player closed");
    }

    fn emit(&self, events: &UnboundedSender<SourceEvent>, event: BackendEvent) {
        let _ = events.send(SourceEvent {
            generation: self.generation,
            event,
        });
    }

    fn handle(&mut self, request: RemoteRequest, events: &UnboundedSender<SourceEvent>) {
        self.generation = request.generation;
        match request.command {
            RemoteCommand::LoadVideo(_) | RemoteCommand::LoadPlaylist(_) => {
                self.clock = PlayClock::new(self.clock.duration);
                self.loaded = true;
                self.emit(events, BackendEvent::State(RemoteState::Buffering));
                self.clock.start();
                self.emit(events, BackendEvent::State(RemoteState::Playing));
            }
            RemoteCommand::Play if self.loaded => {
                self.clock.start();
                self.emit(events, BackendEvent::State(RemoteState::Playing));
            }
            RemoteCommand::Pause if self.loaded => {
                self.clock.stop();
                self.emit(events, BackendEvent::State(RemoteState::Paused));
            }
            RemoteCommand::Seek(secs) if self.loaded => self.clock.set(secs),
            RemoteCommand::QueryTimes if self.loaded => {
                self.emit(
                    events,
                    BackendEvent::Times {
                        current: self.clock.position(),
                        duration: Some(self.clock.duration),
                    },
                );
            }
            RemoteCommand::Stop => {
                self.clock = PlayClock::new(self.clock.duration);
                self.loaded = false;
            }
            RemoteCommand::Play
            | RemoteCommand::Pause
            | RemoteCommand::Seek(_)
            | RemoteCommand::QueryTimes => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::VideoId;
    use crate::test_utils::assert_abs_diff_eq;
    use tokio::sync::mpsc;

    fn drain(rx: &mut UnboundedReceiver<SourceEvent>) -> Vec<BackendEvent> {
        std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.event)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn missing_file_fails_to_load() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut element = ClockedMediaElement::new(60.0);
        element.load(
            &LocalTrack::new("/definitely/not/here.mp3", "x"),
            EventNotifier::new(1, tx),
        );
        assert_eq!(
            drain(&mut rx),
            vec![BackendEvent::Failed(PlaybackError::LoadFailed)]
        );
        assert_eq!(element.duration(), None);
        assert_eq!(element.play(), Err(PlaybackError::LoadFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn element_reports_progress_and_end() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let track = LocalTrack::from_path(file.path());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut element = ClockedMediaElement::new(1.0);

        element.load(&track, EventNotifier::new(3, tx));
        let first = drain(&mut rx);
        assert_eq!(first[0], BackendEvent::Ready);

        element.play().unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_abs_diff_eq!(element.current_time(), 0.6, epsilon = 0.05);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let events = drain(&mut rx);
        assert!(events
            .iter()
            .any(|e| matches!(e, BackendEvent::Times { .. })));
        assert_eq!(
            events.iter().filter(|e| **e == BackendEvent::Ended).count(),
            1
        );
        assert_abs_diff_eq!(element.current_time(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_and_unload() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut element = ClockedMediaElement::new(120.0);
        element.load(&LocalTrack::from_path(file.path()), EventNotifier::new(1, tx));

        element.set_current_time(500.0);
        assert_abs_diff_eq!(element.current_time(), 120.0);
        element.unload();
        assert_eq!(element.duration(), None);
        assert_abs_diff_eq!(element.current_time(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn player_answers_commands_with_generation() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        let player = tokio::spawn(SimulatedEmbeddedPlayer::new(2.0).run(req_rx, ev_tx));
        let send = |command| {
            req_tx
                .send(RemoteRequest {
                    generation: 7,
                    command,
                })
                .unwrap();
        };

        send(RemoteCommand::LoadVideo(VideoId::parse("dQw4w9WgXcQ").unwrap()));
        tokio::time::sleep(Duration::from_millis(500)).await;
        send(RemoteCommand::QueryTimes);
        send(RemoteCommand::Pause);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let events: Vec<SourceEvent> = std::iter::from_fn(|| ev_rx.try_recv().ok()).collect();
        assert!(events.iter().all(|e| e.generation == 7));
        let kinds: Vec<_> = events.into_iter().map(|e| e.event).collect();
        assert_eq!(kinds[0], BackendEvent::State(RemoteState::Buffering));
        assert_eq!(kinds[1], BackendEvent::State(RemoteState::Playing));
        match &kinds[2] {
            BackendEvent::Times { current, duration } => {
                assert_abs_diff_eq!(*current, 0.5, epsilon = 0.05);
                assert_eq!(*duration, Some(2.0));
            }
            other => panic!("expected times, got {other:?}"),
        }
        assert_eq!(kinds[3], BackendEvent::State(RemoteState::Paused));

        send(RemoteCommand::Play);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            drain(&mut ev_rx),
            vec![
                BackendEvent::State(RemoteState::Playing),
                BackendEvent::State(RemoteState::Ended),
            ]
        );

        drop(req_tx);
        player.await.unwrap();
    }
}
