// SPDX-License-Identifier: MPL-2.0
//! Drives a [`Deck`] on a single-threaded tokio runtime.
//!
//! One `select!` loop interleaves everything the deck reacts to:
//!
//! - the frame interval (rotation physics, due single taps, presentation)
//! - the remote poll interval
//! - front-end commands
//! - backend events
//! - finished title lookups
//! - the shutdown signal
//!
//! The deck is never touched from two places at once, so it needs no locks.

use crate::application::port::{SourceEvent, TitleFetcher};
use crate::config::PlaybackConfig;
use crate::deck::{Deck, FrontEndAction, TitleRequest};
use crate::domain::source::LocalTrack;
use crate::gesture::InputEvent;
use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Something the front-end asks the deck to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckCommand {
    Input(InputEvent),
    LoadLocal(LocalTrack),
    LoadRemote(String),
    UploadCover(Vec<u8>),
    ResetCover,
    Seek(f64),
}

type TitleLookup = LocalBoxFuture<'static, (TitleRequest, Option<String>)>;

pub struct DeckRuntime {
    deck: Deck,
    titles: Box<dyn TitleFetcher>,
    commands: mpsc::UnboundedReceiver<DeckCommand>,
    events: mpsc::UnboundedReceiver<SourceEvent>,
    shutdown: oneshot::Receiver<()>,
    front_end: Option<mpsc::UnboundedSender<FrontEndAction>>,
    frame_interval: Duration,
    poll_interval: Duration,
}

impl DeckRuntime {
    /// `events` must be the receiving half of the channel the deck's
    /// transport reports on. Dropping the shutdown sender also stops the loop.
    #[must_use]
    pub fn new(
        deck: Deck,
        titles: Box<dyn TitleFetcher>,
        commands: mpsc::UnboundedReceiver<DeckCommand>,
        events: mpsc::UnboundedReceiver<SourceEvent>,
        shutdown: oneshot::Receiver<()>,
    ) -> Self {
        let playback = PlaybackConfig::default();
        Self {
            deck,
            titles,
            commands,
            events,
            shutdown,
            front_end: None,
            frame_interval: Duration::from_millis(playback.frame_interval_ms),
            poll_interval: Duration::from_millis(playback.remote_poll_ms),
        }
    }

    #[must_use]
    pub fn with_intervals(mut self, playback: &PlaybackConfig) -> Self {
        self.frame_interval = Duration::from_millis(playback.frame_interval_ms.max(1));
        self.poll_interval = Duration::from_millis(playback.remote_poll_ms.max(1));
        self
    }

    /// Forwards requests the deck cannot handle (closing overlays).
    #[must_use]
    pub fn with_front_end(mut self, tx: mpsc::UnboundedSender<FrontEndAction>) -> Self {
        self.front_end = Some(tx);
        self
    }

    /// Runs until shutdown or until the command channel closes, then tears
    /// the deck down and hands it back.
    pub async fn run(self) -> Deck {
        let Self {
            mut deck,
            titles,
            mut commands,
            mut events,
            mut shutdown,
            front_end,
            frame_interval,
            poll_interval,
        } = self;

        let mut frame = tokio::time::interval(frame_interval);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = tokio::time::interval(poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut lookups: FuturesUnordered<TitleLookup> = FuturesUnordered::new();

        log::info!("Deck runtime started");
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = frame.tick() => deck.tick(Instant::now()),
                _ = poll.tick() => deck.poll_remote(),
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if let Some(action) = apply(&mut deck, command) {
                        if let Some(tx) = &front_end {
                            let _ = tx.send(action);
                        }
                    }
                }
                Some(event) = events.recv() => deck.handle_source_event(event),
                Some((request, title)) = lookups.next(), if !lookups.is_empty() => {
                    deck.apply_title(&request, title);
                }
            }

            for request in deck.take_title_requests() {
                let lookup = titles.fetch_title(&request.id);
                lookups.push(Box::pin(async move { (request, lookup.await) }));
            }
        }

        deck.shutdown();
        deck.present();
        log::info!("Deck runtime stopped");
        deck
    }
}

fn apply(deck: &mut Deck, command: DeckCommand) -> Option<FrontEndAction> {
    match command {
        DeckCommand::Input(event) => return deck.handle_input(event, Instant::now()),
        DeckCommand::LoadLocal(track) => deck.load_local(track),
        DeckCommand::LoadRemote(url) => {
            deck.load_remote_url(&url);
        }
        DeckCommand::UploadCover(bytes) => {
            deck.upload_cover(&bytes);
        }
        DeckCommand::ResetCover => deck.reset_cover(),
        DeckCommand::Seek(secs) => deck.seek(secs),
    }
    None
}
