// SPDX-License-Identifier: MPL-2.0
//! Angle geometry around the disc pivot.
//!
//! Pointer coordinates are converted into an angle around the disc center,
//! and successive angles into a signed delta that never jumps across the
//! ±180° seam.

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Largest per-axis distance to `other` (|dx| or |dy|, whichever is bigger).
    #[must_use]
    pub fn axis_distance(self, other: Point) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Returns the point at `degrees` on a circle of `radius` around `self`.
    ///
    /// Uses the same screen convention as [`angle_of`]: 0° points right and
    /// positive angles turn clockwise (y grows downwards).
    #[must_use]
    pub fn on_circle(self, radius: f64, degrees: f64) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            self.x + radius * radians.cos(),
            self.y + radius * radians.sin(),
        )
    }
}

/// Angle of `point` around `pivot`, in degrees within (−180, 180].
///
/// A point sitting exactly on the pivot yields 0.
#[must_use]
pub fn angle_of(pivot: Point, point: Point) -> f64 {
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let degrees = dy.atan2(dx).to_degrees();
    // atan2 returns [-π, π]; fold -180 onto 180 so the range is half-open.
    if degrees <= -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Signed shortest delta from `from` to `to`, normalized to (−180, 180].
///
/// Going from 179° to −179° is +2°, not −358°.
#[must_use]
pub fn normalize_delta(from: f64, to: f64) -> f64 {
    wrap_degrees(to - from)
}

/// Folds an arbitrary angle difference into (−180, 180].
#[must_use]
pub fn wrap_degrees(delta: f64) -> f64 {
    let mut wrapped = delta % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
