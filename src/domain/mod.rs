// SPDX-License-Identifier: MPL-2.0
//! Domain layer: value types and rules with no I/O.
//!
//! Nothing in here depends on an external crate. Engines and adapters build
//! on these types; they never reach back into the rest of the crate except
//! for default constants.
//!
//! # Modules
//!
//! - [`geometry`]: pointer angles around the disc pivot
//! - [`rotation`]: inertial spin ([`RotationState`](rotation::RotationState))
//! - [`session`]: the active source ([`PlaybackSession`](session::PlaybackSession))
//! - [`source`]: [`VideoId`](source::VideoId), [`RemoteTarget`](source::RemoteTarget),
//!   [`LocalTrack`](source::LocalTrack)
//! - [`cover`]: double-tap cover cycling
//! - [`error`]: playback, URL and cover errors with their status text
//! - [`newtypes`]: clamped settings such as [`KeyboardSeekStep`](newtypes::KeyboardSeekStep)
//! - [`time_format`]: `M:SS` strings

pub mod cover;
pub mod error;
pub mod geometry;
pub mod newtypes;
pub mod rotation;
pub mod session;
pub mod source;
pub mod time_format;
