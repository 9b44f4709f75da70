// SPDX-License-Identifier: MPL-2.0
//! Terminal front-end: drives a deck from line commands on stdin.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use spin_deck::application::port::{
    CoverStore, GlitchSink, HapticSink, InMemoryCovers, NoTitles, Silent, TitleFetcher,
};
use spin_deck::config::{self, paths, DEFAULT_TRACK_FILE};
use spin_deck::console::{self, ConsoleCommand, DiscGeometry, HELP};
use spin_deck::deck::{Deck, DeckPorts, DeckSettings, FrontEndAction};
use spin_deck::domain::geometry::Point;
use spin_deck::domain::source::LocalTrack;
use spin_deck::infrastructure::{
    ClockedMediaElement, CoarseVibration, CpalGlitchOutput, FileCoverStore, LogHaptics,
    OEmbedTitleFetcher, SimulatedEmbeddedPlayer, TerminalPresenter,
};
use spin_deck::runtime::{DeckCommand, DeckRuntime};
use spin_deck::transport::Transport;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

const DEFAULT_TRACK_SECS: f64 = 180.0;
const DISC: DiscGeometry = DiscGeometry {
    pivot: Point::new(200.0, 200.0),
    radius: 150.0,
};

struct Flags {
    config_dir: Option<String>,
    data_dir: Option<String>,
    duration: f64,
    no_audio: bool,
    coarse_haptics: bool,
    source: Option<String>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        duration: args
            .opt_value_from_str("--duration")?
            .filter(|secs: &f64| secs.is_finite() && *secs > 0.0)
            .unwrap_or(DEFAULT_TRACK_SECS),
        no_audio: args.contains("--no-audio"),
        coarse_haptics: args.contains("--coarse-haptics"),
        source: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };
    Ok(flags)
}

fn initial_command(source: &str) -> DeckCommand {
    let lower = source.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.contains("youtu") {
        DeckCommand::LoadRemote(source.to_string())
    } else {
        DeckCommand::LoadLocal(LocalTrack::from_path(PathBuf::from(source).as_path()))
    }
}

fn build_ports(config: &config::Config, flags: &Flags) -> DeckPorts {
    let haptics: Box<dyn HapticSink> = if flags.coarse_haptics {
        Box::new(CoarseVibration::new(|pattern: &[u64]| {
            log::debug!("vibrate {pattern:?}");
            Ok(())
        }))
    } else {
        Box::new(LogHaptics)
    };

    let glitch: Box<dyn GlitchSink> = if flags.no_audio || !config.glitch.enabled {
        Box::new(Silent)
    } else {
        match CpalGlitchOutput::new(&config.glitch) {
            Ok(output) => Box::new(output),
            Err(err) => {
                log::warn!("Scrub audio disabled: {err}");
                Box::new(Silent)
            }
        }
    };

    let covers: Box<dyn CoverStore> = match FileCoverStore::in_data_dir() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("No data directory, custom covers will not persist");
            Box::new(InMemoryCovers::default())
        }
    };

    DeckPorts {
        haptics,
        glitch,
        presenter: Box::new(TerminalPresenter::new(std::io::stdout())),
        covers,
    }
}

async fn play_script(commands: &mpsc::UnboundedSender<DeckCommand>, script: Vec<console::ScriptStep>) {
    for step in script {
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        if commands.send(DeckCommand::Input(step.event)).is_err() {
            return;
        }
    }
}

/// Reads stdin until `quit` or end of input, then asks the deck to stop.
async fn console_loop(commands: mpsc::UnboundedSender<DeckCommand>, shutdown: oneshot::Sender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                log::error!("Could not read stdin: {err}");
                break;
            }
        };
        let command = match console::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match command {
            ConsoleCommand::Deck(command) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            ConsoleCommand::Drag { degrees, over } => {
                play_script(&commands, DISC.drag(degrees, over)).await;
            }
            ConsoleCommand::Tap => play_script(&commands, DISC.tap()).await,
            ConsoleCommand::DoubleTap => play_script(&commands, DISC.double_tap()).await,
            ConsoleCommand::Cover(path) => match std::fs::read(&path) {
                Ok(bytes) => {
                    let _ = commands.send(DeckCommand::UploadCover(bytes));
                }
                Err(err) => println!("cannot read {}: {err}", path.display()),
            },
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => break,
        }
    }
    let _ = shutdown.send(());
}

async fn run(flags: Flags) -> Deck {
    let (config, warning) = config::load();
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    let mut settings = DeckSettings::from_config(&config);
    if let Some(dir) = paths::get_app_data_dir() {
        settings = settings.with_default_track_at(dir.join(DEFAULT_TRACK_FILE).to_string_lossy());
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (remote_tx, remote_rx) = mpsc::unbounded_channel();
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let (front_tx, mut front_rx) = mpsc::unbounded_channel();

    tokio::spawn(SimulatedEmbeddedPlayer::new(flags.duration).run(remote_rx, events_tx.clone()));
    let transport = Transport::new(
        Box::new(ClockedMediaElement::new(flags.duration)),
        Some(remote_tx),
        events_tx,
    );

    let titles: Box<dyn TitleFetcher> = match OEmbedTitleFetcher::new() {
        Ok(fetcher) => Box::new(fetcher),
        Err(err) => {
            log::warn!("Video titles disabled: {err}");
            Box::new(NoTitles)
        }
    };

    let ports = build_ports(&config, &flags);
    let deck = Deck::new(settings, transport, DISC.pivot, ports);
    let runtime = DeckRuntime::new(deck, titles, commands_rx, events_rx, shutdown_rx)
        .with_intervals(&config.playback)
        .with_front_end(front_tx);

    if let Some(source) = flags.source.as_deref() {
        let _ = commands_tx.send(initial_command(source));
    }
    tokio::task::spawn_local(async move {
        while let Some(FrontEndAction::DismissOverlays) = front_rx.recv().await {
            println!("(overlays dismissed)");
        }
    });
    tokio::task::spawn_local(console_loop(commands_tx, shutdown_tx));

    println!("{HELP}");
    runtime.run().await
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("spin_deck: {err}");
            eprintln!(
                "usage: spin_deck [--config-dir DIR] [--data-dir DIR] [--duration SECS] \
                 [--no-audio] [--coarse-haptics] [FILE|URL]"
            );
            return ExitCode::FAILURE;
        }
    };
    paths::init_cli_overrides(flags.config_dir.clone(), flags.data_dir.clone());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("spin_deck: cannot start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let local = tokio::task::LocalSet::new();
    let deck = local.block_on(&runtime, run(flags));
    log::info!("Stopped with status {:?}", deck.status());
    drop(local);

    // Stdin reads may still be parked on the blocking pool.
    runtime.shutdown_timeout(Duration::from_millis(100));
    ExitCode::SUCCESS
}
