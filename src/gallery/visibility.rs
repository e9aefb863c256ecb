// SPDX-License-Identifier: MPL-2.0
//! Viewport visibility tracking.
//!
//! A single tracker is shared by every tile and by the batch sentinel. Targets
//! are explicitly observed and unobserved, and the tracker reports a target
//! only on the transition from outside to inside the (margin-expanded)
//! viewport. A freshly observed target counts as outside, so observing an
//! element that is already on screen reports it on the next update.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Something whose visibility the gallery cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// Marker at the end of the rendered list that triggers the next batch.
    Sentinel,
    /// Tile at a global item index.
    Tile(usize),
}

/// Subscription surface used by the loader.
pub trait VisibilityTracker {
    /// Starts watching `target`. Re-observing resets it to "not visible".
    fn observe(&mut self, target: Target);

    /// Stops watching `target`. Unknown targets are ignored.
    fn unobserve(&mut self, target: Target);

    /// Whether `target` is currently watched.
    fn is_observed(&self, target: Target) -> bool;
}

/// A tracker shared between the loader and the host on the UI thread.
pub type SharedTracker<T> = Rc<RefCell<T>>;

impl<T: VisibilityTracker> VisibilityTracker for Rc<RefCell<T>> {
    fn observe(&mut self, target: Target) {
        self.borrow_mut().observe(target);
    }

    fn unobserve(&mut self, target: Target) {
        self.borrow_mut().unobserve(target);
    }

    fn is_observed(&self, target: Target) -> bool {
        self.borrow().is_observed(target)
    }
}

/// Extent of an element along the scroll axis, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    /// Creates a span, swapping the bounds if given in reverse.
    #[must_use]
    pub fn new(start: f32, end: f32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Grows the span by `margin` on both ends.
    #[must_use]
    pub fn expand(self, margin: f32) -> Self {
        Self::new(self.start - margin, self.end + margin)
    }

    /// Edge contact counts as intersecting, so zero-height sentinels work.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// In-memory tracker driven by viewport geometry.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    margin: f32,
    /// Observed targets and whether each was inside at the last update.
    observed: BTreeMap<Target, bool>,
}

impl ViewportTracker {
    /// Creates a tracker that treats anything within `margin` of the
    /// viewport as visible.
    #[must_use]
    pub fn new(margin: f32) -> Self {
        Self {
            margin: margin.max(0.0),
            observed: BTreeMap::new(),
        }
    }

    /// Wraps a new tracker for sharing with a loader.
    #[must_use]
    pub fn shared(margin: f32) -> SharedTracker<Self> {
        Rc::new(RefCell::new(Self::new(margin)))
    }

    /// Feeds the current viewport and element layout; returns the observed
    /// targets that just entered, in layout order.
    ///
    /// Targets missing from `layout` keep their previous state.
    pub fn update<I>(&mut self, viewport: Span, layout: I) -> Vec<Target>
    where
        I: IntoIterator<Item = (Target, Span)>,
    {
        let area = viewport.expand(self.margin);
        let mut entered = Vec::new();
        for (target, span) in layout {
            if let Some(inside) = self.observed.get_mut(&target) {
                let now = span.intersects(area);
                if now && !*inside {
                    entered.push(target);
                }
                *inside = now;
            }
        }
        entered
    }

    /// Number of targets currently watched.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl VisibilityTracker for ViewportTracker {
    fn observe(&mut self, target: Target) {
        self.observed.insert(target, false);
    }

    fn unobserve(&mut self, target: Target) {
        self.observed.remove(&target);
    }

    fn is_observed(&self, target: Target) -> bool {
        self.observed.contains_key(&target)
    }
}
