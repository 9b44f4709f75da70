// SPDX-License-Identifier: MPL-2.0
//! `spin_deck` is a spinning-disc music deck: drag the disc to scrub, tap to
//! play or pause, double-tap to change the cover.
//!
//! The same deck plays local audio files and remote embedded videos. A drag
//! becomes an angle stream, the angle stream becomes seeks, and scrub speed
//! drives a haptic groove and a filtered-noise glitch sound.
//!
//! - [`deck::Deck`] is the synchronous engine
//! - [`runtime::DeckRuntime`] drives it on a single-threaded tokio runtime
//! - [`infrastructure`] holds the cpal, HTTP, filesystem and simulated adapters

pub mod application;
pub mod config;
pub mod console;
pub mod deck;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod gesture;
pub mod infrastructure;
pub mod runtime;
pub mod scrub;
pub mod transport;

#[cfg(test)]
mod test_utils;
