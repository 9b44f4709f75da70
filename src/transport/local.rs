// SPDX-License-Identifier: MPL-2.0
//! Local file backend over a [`MediaElement`].

use crate::application::port::{
    clamp_seek, EventNotifier, MediaElement, TransportBackend,
};
use crate::domain::error::PlaybackError;
use crate::domain::session::SourceMode;
use crate::domain::source::LocalTrack;

/// Plays local audio through a media element. Queries are answered from
/// the element's live state.
pub struct LocalFileBackend {
    element: Box<dyn MediaElement>,
    loaded: bool,
}

impl LocalFileBackend {
    #[must_use]
    pub fn new(element: Box<dyn MediaElement>) -> Self {
        Self {
            element,
            loaded: false,
        }
    }

    /// Starts loading `track`; readiness arrives through `notifier`.
    pub fn load(&mut self, track: &LocalTrack, notifier: EventNotifier) {
        if self.loaded {
            self.element.unload();
        }
        log::debug!("Loading local track {:?}", track.location());
        self.element.load(track, notifier);
        self.loaded = true;
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl TransportBackend for LocalFileBackend {
    fn kind(&self) -> SourceMode {
        SourceMode::LocalFile
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.loaded {
            return Err(PlaybackError::LoadFailed);
        }
        self.element.play()
    }

    fn pause(&mut self) {
        if self.loaded {
            self.element.pause();
        }
    }

    fn seek(&mut self, secs: f64) -> Option<f64> {
        let target = clamp_seek(secs, self.duration())?;
        self.element.set_current_time(target);
        Some(target)
    }

    fn current_time(&self) -> f64 {
        if self.loaded {
            self.element.current_time()
        } else {
            0.0
        }
    }

    fn duration(&self) -> Option<f64> {
        if self.loaded {
            self.element.duration()
        } else {
            None
        }
    }

    fn is_synchronous(&self) -> bool {
        true
    }

    fn stop(&mut self) {
        if self.loaded {
            self.element.pause();
            self.element.unload();
            self.loaded = false;
        }
    }
}
