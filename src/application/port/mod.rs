// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the deck's collaborators.
//!
//! Infrastructure adapters implement these; the engine only sees the traits.
//!
//! # Available Ports
//!
//! - [`transport`]: playback backends, the local media element and remote
//!   player commands
//! - [`feedback`]: haptic cues and the glitch voice
//! - [`metadata`]: title lookup and cover persistence
//! - [`view`]: the presenter receiving [`DeckView`] snapshots
//!
//! # Design Notes
//!
//! - Ports are single-threaded: the deck runs on one cooperative executor,
//!   so nothing here is `Send`
//! - Asynchronous results come back as channel messages or boxed local
//!   futures, never as callbacks into the deck

pub mod feedback;
pub mod metadata;
pub mod transport;
pub mod view;

pub use feedback::{GlitchCommand, GlitchSink, GlitchVoice, HapticCue, HapticSink, Silent};
pub use metadata::{CoverStore, InMemoryCovers, NoTitles, TitleFetcher};
pub use transport::{
    clamp_seek, BackendEvent, EventNotifier, MediaElement, RemoteCommand, RemoteRequest,
    RemoteState, SourceEvent, TransportBackend,
};
pub use view::{DeckView, Headless, Presenter, ScrubDirection};
