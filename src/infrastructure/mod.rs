// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`, wrapping audio devices, HTTP and the filesystem.
//!
//! # Available Adapters
//!
//! - [`audio_output`]: glitch voice on the default device via cpal
//!   (implements [`GlitchSink`])
//! - [`oembed`]: video titles over HTTP (implements [`TitleFetcher`])
//! - [`cover_store`]: custom cover on disk (implements [`CoverStore`])
//! - [`haptics`]: log and coarse-vibration haptic sinks
//! - [`simulated`]: clock-driven media element and embedded player
//! - [`terminal`]: line-oriented presenter
//!
//! [`GlitchSink`]: crate::application::port::GlitchSink
//! [`TitleFetcher`]: crate::application::port::TitleFetcher
//! [`CoverStore`]: crate::application::port::CoverStore

pub mod audio_output;
pub mod cover_store;
pub mod haptics;
pub mod oembed;
pub mod simulated;
pub mod terminal;

pub use audio_output::CpalGlitchOutput;
pub use cover_store::FileCoverStore;
pub use haptics::{vibration_pattern, CoarseVibration, LogHaptics};
pub use oembed::OEmbedTitleFetcher;
pub use simulated::{ClockedMediaElement, SimulatedEmbeddedPlayer};
pub use terminal::TerminalPresenter;
