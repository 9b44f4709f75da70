// SPDX-License-Identifier: MPL-2.0
//! Down/move/up state machine.
//!
//! ```text
//! Idle --down--> PointerDown --up--> Idle        (tap candidate unless moved)
//! Idle --down--> Dragging    --up--> Idle        (when a source can be scrubbed)
//! ```
//!
//! Every move during a drag is forwarded as a scrub sample. The movement
//! threshold only decides whether the release still counts as a tap.

use super::PointerKind;
use crate::config::{checked, ScrubConfig};
use crate::domain::geometry::{angle_of, Point};

/// Per-axis movement (px) after which a release is no longer a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveThresholds {
    pub mouse: f64,
    pub touch: f64,
}

impl Default for MoveThresholds {
    fn default() -> Self {
        Self::from(&ScrubConfig::default())
    }
}

impl From<&ScrubConfig> for MoveThresholds {
    fn from(config: &ScrubConfig) -> Self {
        let fallback = ScrubConfig::default();
        Self {
            mouse: checked(
                "scrub.mouse_threshold_px",
                config.mouse_threshold_px,
                fallback.mouse_threshold_px,
                |v| v >= 0.0,
            ),
            touch: checked(
                "scrub.touch_threshold_px",
                config.touch_threshold_px,
                fallback.touch_threshold_px,
                |v| v >= 0.0,
            ),
        }
    }
}

impl MoveThresholds {
    #[must_use]
    pub fn for_kind(&self, kind: PointerKind) -> f64 {
        match kind {
            PointerKind::Mouse => self.mouse,
            PointerKind::Touch => self.touch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pressed, but nothing to scrub.
    PointerDown,
    Dragging,
}

/// What one input event meant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do (stray move/up, or a re-entrant down).
    Ignored,
    /// Pressed without starting a drag.
    Pressed,
    /// A drag began with the pointer at `angle` degrees.
    DragStarted { angle: f64 },
    /// Scrub sample at `angle` degrees.
    DragMoved { angle: f64 },
    /// The gesture ended.
    Released { tap: bool, dragged: bool },
}

/// One down→up lifetime.
#[derive(Debug, Clone, Copy)]
struct GestureSession {
    origin: Point,
    kind: PointerKind,
    moved_beyond_threshold: bool,
    dragging: bool,
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    pivot: Point,
    thresholds: MoveThresholds,
    session: Option<GestureSession>,
}

impl GestureClassifier {
    /// `pivot` is the disc center in viewport pixels.
    #[must_use]
    pub fn new(pivot: Point, thresholds: MoveThresholds) -> Self {
        Self {
            pivot,
            thresholds,
            session: None,
        }
    }

    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.session {
            None => GesturePhase::Idle,
            Some(session) if session.dragging => GesturePhase::Dragging,
            Some(_) => GesturePhase::PointerDown,
        }
    }

    /// Starts a gesture. `can_drag` is false when nothing is loaded.
    pub fn down(&mut self, point: Point, kind: PointerKind, can_drag: bool) -> GestureOutcome {
        if self.session.is_some() {
            return GestureOutcome::Ignored;
        }
        self.session = Some(GestureSession {
            origin: point,
            kind,
            moved_beyond_threshold: false,
            dragging: can_drag,
        });
        if can_drag {
            GestureOutcome::DragStarted {
                angle: angle_of(self.pivot, point),
            }
        } else {
            GestureOutcome::Pressed
        }
    }

    pub fn moved(&mut self, point: Point) -> GestureOutcome {
        let Some(session) = self.session.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if point.axis_distance(session.origin) > self.thresholds.for_kind(session.kind) {
            session.moved_beyond_threshold = true;
        }
        if session.dragging {
            GestureOutcome::DragMoved {
                angle: angle_of(self.pivot, point),
            }
        } else {
            GestureOutcome::Ignored
        }
    }

    pub fn up(&mut self) -> GestureOutcome {
        match self.session.take() {
            None => GestureOutcome::Ignored,
            Some(session) => GestureOutcome::Released {
                tap: !session.moved_beyond_threshold,
                dragged: session.dragging,
            },
        }
    }
}
