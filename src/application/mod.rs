// SPDX-License-Identifier: MPL-2.0
//! Application layer: the ports the deck talks through.
//!
//! - [`port`]: trait definitions implemented by infrastructure adapters
//!
//! # Dependency Rule
//!
//! - The application layer depends on the domain layer only
//! - Infrastructure implements the ports
//! - The deck and runtime consume them as trait objects

pub mod port;
