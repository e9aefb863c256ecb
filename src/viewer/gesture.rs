// SPDX-License-Identifier: MPL-2.0
//! Drag math for the viewer.
//!
//! Pure helpers shared by the state machine: offset tracking for both zoom
//! levels, backdrop fading during a downward drag, and release intent.

use super::options::ViewerOptions;
use iced_core::{Point, Vector};

/// Snapshot taken when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Pointer position at gesture start.
    pub pointer_start: Point,
    /// Rendered offset at gesture start.
    pub drag_base: Vector,
}

impl Drag {
    #[must_use]
    pub fn new(pointer_start: Point, drag_base: Vector) -> Self {
        Self {
            pointer_start,
            drag_base,
        }
    }

    /// Pointer travel since the drag started.
    #[must_use]
    pub fn delta(&self, position: Point) -> Vector {
        position - self.pointer_start
    }

    /// Zoomed offset: tracks the pointer 1:1.
    #[must_use]
    pub fn panned_offset(&self, position: Point) -> Vector {
        self.drag_base + self.delta(position)
    }
}

/// Offset at scale 1: the pointer delta damped by `resistance`.
#[must_use]
pub fn rubber_band(delta: Vector, resistance: f32) -> Vector {
    delta * resistance
}

/// Recovers the undamped travel from a rubber-banded offset.
#[must_use]
pub fn unscaled(offset: Vector, resistance: f32) -> Vector {
    Vector::new(offset.x / resistance, offset.y / resistance)
}

/// Backdrop opacity for a downward drag of `dy`, linear to zero over
/// `fade_distance`. Upward travel leaves the backdrop fully opaque.
#[must_use]
pub fn backdrop_opacity(dy: f32, fade_distance: f32) -> f32 {
    if dy <= 0.0 {
        1.0
    } else {
        (1.0 - dy / fade_distance).max(0.0)
    }
}

/// What releasing a drag at scale 1 means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseIntent {
    Close,
    /// Navigate by the given step (`+1` for a leftward swipe).
    Navigate(i32),
    SnapBack,
}

/// Evaluates the undamped travel against the thresholds. Dismissal wins over
/// navigation.
#[must_use]
pub fn release_intent(travel: Vector, options: &ViewerOptions) -> ReleaseIntent {
    if travel.y > options.close_threshold {
        ReleaseIntent::Close
    } else if travel.x.abs() > options.swipe_threshold {
        ReleaseIntent::Navigate(if travel.x < 0.0 { 1 } else { -1 })
    } else {
        ReleaseIntent::SnapBack
    }
}
