// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gallery**: Batch rendering and read-ahead window
//! - **Viewer gestures**: Tap, drag and swipe thresholds
//! - **Viewer timing**: Transition and grace delays
//! - **Server**: Default data source location

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of tiles appended by one batch render.
pub const DEFAULT_BATCH_SIZE: usize = 40;

/// Minimum allowed batch size.
pub const MIN_BATCH_SIZE: usize = 1;

/// Maximum allowed batch size.
pub const MAX_BATCH_SIZE: usize = 500;

/// Number of images force-loaded per read-ahead window.
pub const DEFAULT_PRELOAD_COUNT: usize = 12;

/// Minimum read-ahead window.
pub const MIN_PRELOAD_COUNT: usize = 1;

/// Maximum read-ahead window.
pub const MAX_PRELOAD_COUNT: usize = 200;

/// Extra distance (logical units) added around the viewport when deciding
/// whether a target is visible.
pub const DEFAULT_LAZY_MARGIN: f32 = 200.0;

/// Delay between the sentinel entering the viewport and the batch render.
pub const DEFAULT_BATCH_DEBOUNCE_MS: u64 = 300;

// ==========================================================================
// Viewer Gesture Defaults
// ==========================================================================

/// Two pointer-downs closer than this form a double-tap.
pub const DEFAULT_DOUBLE_TAP_DELAY_MS: u64 = 300;

/// Scale applied when zooming in with a double-tap.
pub const DEFAULT_MAX_SCALE: f32 = 3.0;

/// Smallest zoomed scale accepted from configuration.
pub const MIN_MAX_SCALE: f32 = 1.5;

/// Largest zoomed scale accepted from configuration.
pub const MAX_MAX_SCALE: f32 = 10.0;

/// Undamped horizontal travel needed to navigate on release.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 60.0;

/// Undamped downward travel needed to close on release.
pub const DEFAULT_CLOSE_THRESHOLD: f32 = 100.0;

/// Rubber-band factor applied to drags at scale 1 (lower is stiffer).
pub const DEFAULT_RESISTANCE: f32 = 0.4;

/// Lowest accepted resistance.
pub const MIN_RESISTANCE: f32 = 0.05;

/// Highest accepted resistance (no damping).
pub const MAX_RESISTANCE: f32 = 1.0;

/// Downward travel over which the backdrop fades from full to none.
pub const DEFAULT_DISMISS_FADE_DISTANCE: f32 = 300.0;

/// Horizontal amplitude of the edge bounce, in logical units.
pub const BOUNCE_AMPLITUDE: f32 = 15.0;

// ==========================================================================
// Viewer Timing Defaults
// ==========================================================================

/// Delay before the image source is cleared after closing.
pub const DEFAULT_CLOSE_GRACE_MS: u64 = 300;

/// Duration of the fade-out that starts a navigation.
pub const NAVIGATION_FADE_MS: u64 = 150;

/// Opacity the current image fades to while the next one preloads.
pub const NAVIGATION_FADE_OPACITY: f32 = 0.4;

/// Duration of the edge bounce animation.
pub const BOUNCE_DURATION_MS: u64 = 300;

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Base URL of the generation and history server.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_BATCH_SIZE > 0);
    assert!(DEFAULT_BATCH_SIZE >= MIN_BATCH_SIZE);
    assert!(DEFAULT_BATCH_SIZE <= MAX_BATCH_SIZE);

    assert!(MIN_PRELOAD_COUNT > 0);
    assert!(DEFAULT_PRELOAD_COUNT >= MIN_PRELOAD_COUNT);
    assert!(DEFAULT_PRELOAD_COUNT <= MAX_PRELOAD_COUNT);

    assert!(MIN_MAX_SCALE > 1.0);
    assert!(DEFAULT_MAX_SCALE >= MIN_MAX_SCALE);
    assert!(DEFAULT_MAX_SCALE <= MAX_MAX_SCALE);

    assert!(MIN_RESISTANCE > 0.0);
    assert!(DEFAULT_RESISTANCE >= MIN_RESISTANCE);
    assert!(DEFAULT_RESISTANCE <= MAX_RESISTANCE);

    assert!(DEFAULT_SWIPE_THRESHOLD > 0.0);
    assert!(DEFAULT_CLOSE_THRESHOLD > 0.0);
    assert!(DEFAULT_DISMISS_FADE_DISTANCE > 0.0);
    assert!(NAVIGATION_FADE_OPACITY > 0.0 && NAVIGATION_FADE_OPACITY < 1.0);
};
