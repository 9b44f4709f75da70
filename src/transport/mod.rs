// SPDX-License-Identifier: MPL-2.0
//! Source-agnostic transport: owns both backends and decides which is live.
//!
//! At most one backend is active at a time. Activating one first tears the
//! other down (best-effort, errors swallowed), then bumps the generation
//! counter. Events stamped with an older generation are stale and must be
//! ignored by the caller; [`Transport::is_current`] answers that.

pub mod local;
pub mod remote;
pub mod remote_url;

pub use local::LocalFileBackend;
pub use remote::RemoteVideoBackend;

use crate::application::port::{
    EventNotifier, MediaElement, RemoteRequest, SourceEvent, TransportBackend,
};
use crate::domain::error::PlaybackError;
use crate::domain::session::SourceMode;
use crate::domain::source::{LocalTrack, RemoteTarget};
use tokio::sync::mpsc::UnboundedSender;

pub struct Transport {
    local: LocalFileBackend,
    remote: RemoteVideoBackend,
    active: SourceMode,
    generation: u64,
    events: UnboundedSender<SourceEvent>,
}

impl Transport {
    /// Builds a transport with nothing active.
    ///
    /// `events` is the channel both backends report on; `remote` is `None`
    /// when no embedded player is available.
    #[must_use]
    pub fn new(
        element: Box<dyn MediaElement>,
        remote: Option<UnboundedSender<RemoteRequest>>,
        events: UnboundedSender<SourceEvent>,
    ) -> Self {
        Self {
            local: LocalFileBackend::new(element),
            remote: RemoteVideoBackend::new(remote),
            active: SourceMode::None,
            generation: 0,
            events,
        }
    }

    #[must_use]
    pub fn active(&self) -> SourceMode {
        self.active
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when `event` belongs to the live activation.
    #[must_use]
    pub fn is_current(&self, event: &SourceEvent) -> bool {
        !self.active.is_none() && event.generation == self.generation
    }

    #[must_use]
    pub fn remote_available(&self) -> bool {
        self.remote.is_available()
    }

    /// The live backend, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&dyn TransportBackend> {
        match self.active {
            SourceMode::None => None,
            SourceMode::LocalFile => Some(&self.local),
            SourceMode::RemoteVideo => Some(&self.remote),
        }
    }

    pub fn backend_mut(&mut self) -> Option<&mut dyn TransportBackend> {
        match self.active {
            SourceMode::None => None,
            SourceMode::LocalFile => Some(&mut self.local),
            SourceMode::RemoteVideo => Some(&mut self.remote),
        }
    }

    /// Stops the live backend and leaves nothing active.
    pub fn teardown(&mut self) {
        if let Some(backend) = self.backend_mut() {
            log::debug!("Tearing down {:?} backend", backend.kind());
            backend.stop();
        }
        self.active = SourceMode::None;
        self.generation += 1;
    }

    fn activate(&mut self, mode: SourceMode) -> u64 {
        self.teardown();
        self.active = mode;
        log::info!("Activated {mode:?} backend (generation {})", self.generation);
        self.generation
    }

    /// Switches to the local backend and starts loading `track`.
    pub fn load_local(&mut self, track: &LocalTrack) {
        let generation = self.activate(SourceMode::LocalFile);
        let notifier = EventNotifier::new(generation, self.events.clone());
        self.local.load(track, notifier);
    }

    /// Switches to the remote backend and asks it to load `target`.
    ///
    /// # Errors
    ///
    /// Fails when the player cannot be reached; the transport is then left
    /// with nothing active.
    pub fn load_remote(&mut self, target: &RemoteTarget) -> Result<(), PlaybackError> {
        let generation = self.activate(SourceMode::RemoteVideo);
        if let Err(err) = self.remote.load(generation, target) {
            self.teardown();
            return Err(err);
        }
        Ok(())
    }
}
