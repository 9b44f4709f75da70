// SPDX-License-Identifier: MPL-2.0
//! Remote video backend over the embedded player's command channel.
//!
//! Every command is a fire-and-forget request. The player answers with
//! [`BackendEvent`]s, from which this backend caches position and duration.
//! It never decides on its own whether playback is running.

use crate::application::port::{
    clamp_seek, BackendEvent, RemoteCommand, RemoteRequest, TransportBackend,
};
use crate::domain::error::PlaybackError;
use crate::domain::session::SourceMode;
use crate::domain::source::RemoteTarget;
use tokio::sync::mpsc::UnboundedSender;

pub struct RemoteVideoBackend {
    commands: Option<UnboundedSender<RemoteRequest>>,
    generation: u64,
    current: f64,
    duration: Option<f64>,
}

impl RemoteVideoBackend {
    /// `commands` is `None` when no embedded player could be created.
    #[must_use]
    pub fn new(commands: Option<UnboundedSender<RemoteRequest>>) -> Self {
        Self {
            commands,
            generation: 0,
            current: 0.0,
            duration: None,
        }
    }

    /// True while a player is attached and listening.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.commands.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    fn send(&self, command: RemoteCommand) -> Result<(), PlaybackError> {
        let tx = self
            .commands
            .as_ref()
            .ok_or(PlaybackError::PlayerUnavailable)?;
        tx.send(RemoteRequest {
            generation: self.generation,
            command,
        })
        .map_err(|_| PlaybackError::PlayerUnavailable)
    }

    /// Loads `target` under activation `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::PlayerUnavailable`] when the command cannot
    /// be delivered. Refusals by the player arrive later as
    /// [`BackendEvent::Rejected`].
    pub fn load(&mut self, generation: u64, target: &RemoteTarget) -> Result<(), PlaybackError> {
        self.generation = generation;
        self.current = 0.0;
        self.duration = None;
        let command = match (target.video(), target.list()) {
            (Some(video), _) => RemoteCommand::LoadVideo(video.clone()),
            (None, Some(list)) => RemoteCommand::LoadPlaylist(list.to_string()),
            (None, None) => return Err(PlaybackError::RemoteLoadFailed),
        };
        log::debug!("Remote load {command:?} (generation {generation})");
        self.send(command)
    }
}

impl TransportBackend for RemoteVideoBackend {
    fn kind(&self) -> SourceMode {
        SourceMode::RemoteVideo
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.send(RemoteCommand::Play)
    }

    fn pause(&mut self) {
        if let Err(err) = self.send(RemoteCommand::Pause) {
            log::debug!("Remote pause not delivered: {err}");
        }
    }

    fn seek(&mut self, secs: f64) -> Option<f64> {
        let target = clamp_seek(secs, self.duration)?;
        if let Err(err) = self.send(RemoteCommand::Seek(target)) {
            log::debug!("Remote seek not delivered: {err}");
        }
        self.current = target;
        Some(target)
    }

    fn current_time(&self) -> f64 {
        self.current
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_synchronous(&self) -> bool {
        false
    }

    fn refresh(&mut self) {
        let _ = self.send(RemoteCommand::QueryTimes);
    }

    fn absorb(&mut self, event: &BackendEvent) {
        if let BackendEvent::Times { current, duration } = event {
            self.duration = duration.filter(|d| d.is_finite() && *d > 0.0);
            self.current = if current.is_finite() {
                current.max(0.0)
            } else {
                0.0
            };
        }
    }

    fn stop(&mut self) {
        if let Err(err) = self.send(RemoteCommand::Stop) {
            log::debug!("Remote stop ignored: {err}");
        }
        self.current = 0.0;
        self.duration = None;
    }
}
