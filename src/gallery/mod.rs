// SPDX-License-Identifier: MPL-2.0
//! Incremental gallery loading.
//!
//! The gallery renders a potentially large item list in fixed-size batches and
//! schedules full-resolution loads ahead of the scroll position.
//!
//! ## Architecture
//!
//! ```text
//! loader.rs (GalleryLoader)
//!     ├── batches      - sentinel-triggered, debounced batch rendering
//!     ├── read-ahead   - completion-driven preload window
//!     └── visibility   - injected VisibilityTracker for deferred tiles
//! ```
//!
//! Like the viewer, the loader never touches a rendering surface: it consumes
//! [`Message`]s and returns [`Effect`]s for the host to apply.

pub mod loader;
pub mod visibility;

use crate::config::defaults::{DEFAULT_BATCH_DEBOUNCE_MS, DEFAULT_LAZY_MARGIN};
use crate::domain::ui::{BatchSize, PreloadCount};
use std::time::Duration;

pub use loader::{Effect, GalleryLoader, LoadOutcome, LoadState, Message, SentinelState};
pub use visibility::{SharedTracker, Span, Target, ViewportTracker, VisibilityTracker};

/// Construction-time tuning for [`GalleryLoader`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryOptions {
    /// Tiles appended per batch.
    pub batch_size: BatchSize,
    /// Images force-loaded per read-ahead window.
    pub preload_count: PreloadCount,
    /// Margin added around the viewport by [`ViewportTracker`].
    pub lazy_margin: f32,
    /// Delay between the sentinel entering the viewport and the batch render.
    pub batch_debounce: Duration,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            batch_size: BatchSize::default(),
            preload_count: PreloadCount::default(),
            lazy_margin: DEFAULT_LAZY_MARGIN,
            batch_debounce: Duration::from_millis(DEFAULT_BATCH_DEBOUNCE_MS),
        }
    }
}
