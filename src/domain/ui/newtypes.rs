// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for gallery and gesture tuning
//! values, ensuring they are always within valid ranges.

use crate::config::defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_SCALE, DEFAULT_PRELOAD_COUNT, DEFAULT_RESISTANCE,
    MAX_BATCH_SIZE, MAX_MAX_SCALE, MAX_PRELOAD_COUNT, MAX_RESISTANCE, MIN_BATCH_SIZE,
    MIN_MAX_SCALE, MIN_PRELOAD_COUNT, MIN_RESISTANCE,
};

// =============================================================================
// BatchSize
// =============================================================================

/// Number of tiles rendered per batch, guaranteed to be at least one.
///
/// A zero batch would make `render_next_batch` spin without progress, so the
/// value is clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Creates a new batch size, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

// =============================================================================
// PreloadCount
// =============================================================================

/// Size of one read-ahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadCount(usize);

impl PreloadCount {
    /// Creates a new preload count, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_PRELOAD_COUNT, MAX_PRELOAD_COUNT))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Distance from the cursor at which a completion advances the window.
    #[must_use]
    pub fn trigger_distance(self) -> usize {
        self.0 - 1
    }
}

impl Default for PreloadCount {
    fn default() -> Self {
        Self(DEFAULT_PRELOAD_COUNT)
    }
}

// =============================================================================
// Resistance
// =============================================================================

/// Rubber-band factor for drags at scale 1.
///
/// The engine divides by this value to recover the undamped distance, so
/// it must never be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistance(f32);

impl Resistance {
    /// Creates a new resistance, clamping to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_RESISTANCE, MAX_RESISTANCE))
        } else {
            Self::default()
        }
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Resistance {
    fn default() -> Self {
        Self(DEFAULT_RESISTANCE)
    }
}

// =============================================================================
// MaxScale
// =============================================================================

/// Scale applied when the viewer is zoomed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxScale(f32);

impl MaxScale {
    /// Creates a new zoomed scale, clamping to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_MAX_SCALE, MAX_MAX_SCALE))
        } else {
            Self::default()
        }
    }

    /// Returns the raw scale factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for MaxScale {
    fn default() -> Self {
        Self(DEFAULT_MAX_SCALE)
    }
}
