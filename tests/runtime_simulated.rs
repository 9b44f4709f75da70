// SPDX-License-Identifier: MPL-2.0
//! The runtime driving a deck wired to the simulated collaborators.

use std::time::Duration;

use spin_deck::application::port::NoTitles;
use spin_deck::deck::{Deck, DeckPorts, DeckSettings};
use spin_deck::domain::geometry::Point;
use spin_deck::domain::source::LocalTrack;
use spin_deck::gesture::{InputEvent, Key};
use spin_deck::infrastructure::{ClockedMediaElement, SimulatedEmbeddedPlayer};
use spin_deck::runtime::{DeckCommand, DeckRuntime};
use spin_deck::transport::Transport;
use tokio::sync::{mpsc, oneshot};

const TRACK_SECS: f64 = 120.0;

struct Wiring {
    runtime: DeckRuntime,
    commands: mpsc::UnboundedSender<DeckCommand>,
    shutdown: oneshot::Sender<()>,
}

fn wire() -> Wiring {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (remote_tx, remote_rx) = mpsc::unbounded_channel();
    let (commands, commands_rx) = mpsc::unbounded_channel();
    let (shutdown, shutdown_rx) = oneshot::channel();

    tokio::spawn(SimulatedEmbeddedPlayer::new(TRACK_SECS).run(remote_rx, events_tx.clone()));
    let transport = Transport::new(
        Box::new(ClockedMediaElement::new(TRACK_SECS)),
        Some(remote_tx),
        events_tx,
    );
    let deck = Deck::new(
        DeckSettings::default(),
        transport,
        Point::new(100.0, 100.0),
        DeckPorts::default(),
    );
    Wiring {
        runtime: DeckRuntime::new(deck, Box::new(NoTitles), commands_rx, events_rx, shutdown_rx),
        commands,
        shutdown,
    }
}

#[tokio::test(start_paused = true)]
async fn local_file_plays_seeks_and_ends() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let Wiring {
        runtime,
        commands,
        shutdown,
    } = wire();

    let driver = async move {
        commands
            .send(DeckCommand::LoadLocal(LocalTrack::from_path(file.path())))
            .unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        commands.send(DeckCommand::Seek(200.0)).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        shutdown.send(()).unwrap();
        file
    };
    let (deck, _file) = tokio::join!(runtime.run(), driver);

    assert_eq!(deck.status(), "2:00 / 2:00");
}

#[tokio::test(start_paused = true)]
async fn remote_video_reports_progress_through_polling() {
    let Wiring {
        runtime,
        commands,
        shutdown,
    } = wire();

    let driver = async move {
        commands
            .send(DeckCommand::LoadRemote(
                "https://youtu.be/dQw4w9WgXcQ".to_string(),
            ))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5_600)).await;
        shutdown.send(()).unwrap();
    };
    let (deck, ()) = tokio::join!(runtime.run(), driver);

    assert_eq!(deck.status(), "0:05 / 2:00");
}

#[tokio::test(start_paused = true)]
async fn space_pauses_remote_video() {
    let Wiring {
        runtime,
        commands,
        shutdown,
    } = wire();

    let driver = async move {
        commands
            .send(DeckCommand::LoadRemote(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            ))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        commands
            .send(DeckCommand::Input(InputEvent::Key(Key::Space)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(3_300)).await;
        shutdown.send(()).unwrap();
    };
    let (deck, ()) = tokio::join!(runtime.run(), driver);

    // Paused at 0.2 s; an unpaused video would read 0:03 by now.
    assert_eq!(deck.status(), "0:00 / 2:00");
}
