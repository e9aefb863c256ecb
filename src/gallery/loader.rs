// SPDX-License-Identifier: MPL-2.0
//! Batch renderer and read-ahead scheduler for the gallery.
//!
//! # Load priority
//!
//! Every tile starts deferred. A tile's image is force-loaded when:
//! - its index is below the preload cursor (or inside the primed second
//!   window) at the time the tile is created,
//! - the read-ahead window advances over it,
//! - the visibility tracker reports it entering the viewport.
//!
//! # Read-ahead window
//!
//! When a requested image settles (loaded *or* failed) within
//! `preload_count - 1` of the cursor (on either side), the next `preload_count` images are
//! force-loaded and the cursor advances by that amount. Progress is driven
//! by completions, never by elapsed time.

use super::visibility::{Target, VisibilityTracker};
use super::GalleryOptions;
use crate::domain::media::{ImageList, ImageRef};
use std::collections::BTreeMap;
use std::time::Duration;

/// Load progress of one tile's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Tile exists, source withheld until forced or visible.
    Deferred,
    /// Source assigned, waiting for the image to settle.
    Requested,
    Loaded,
    /// Terminal like `Loaded`; the tile stays visually unloaded.
    Failed,
}

/// How an image load settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Visual state of the batch sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelState {
    /// Every item is rendered, or there is nothing to render.
    Hidden,
    /// Waiting to scroll into view.
    Idle,
    /// A batch render is scheduled.
    Loading,
}

/// Inputs to the loader.
#[derive(Debug, Clone)]
pub enum Message {
    /// Replace the item list and render the first batch.
    Reload(Vec<ImageRef>),
    /// Render the next batch now.
    RenderNextBatch,
    /// The visibility tracker reported a target entering the viewport.
    Entered(Target),
    /// A `ScheduleBatch` delay has elapsed.
    BatchTimerElapsed { cycle: u64 },
    /// A `LoadImage` request finished.
    ImageSettled {
        cycle: u64,
        index: usize,
        outcome: LoadOutcome,
    },
    /// A tile was activated (clicked / tapped).
    Activate(usize),
}

/// Work for the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Remove every rendered tile.
    ClearTiles,
    /// Show or hide the empty-state indicator.
    ShowEmptyState(bool),
    SetSentinel(SentinelState),
    /// Append a tile for `index`, image source deferred.
    CreateTile { index: usize, url: Option<String> },
    /// Assign the tile's image source; answer with [`Message::ImageSettled`].
    LoadImage {
        cycle: u64,
        index: usize,
        url: String,
    },
    /// Answer with [`Message::BatchTimerElapsed`] after `delay`.
    ScheduleBatch { cycle: u64, delay: Duration },
    /// Hand the full list and the tile's global index to the viewer.
    OpenViewer { items: ImageList, index: usize },
}

/// Owns the gallery item list and its render / preload cursors.
#[derive(Debug)]
pub struct GalleryLoader<V> {
    options: GalleryOptions,
    tracker: V,
    items: ImageList,
    rendered_count: usize,
    preload_cursor: usize,
    /// End of the second window primed right after the first batch.
    primed_until: usize,
    primed: bool,
    slots: BTreeMap<usize, LoadState>,
    sentinel: SentinelState,
    batch_pending: bool,
    /// Load cycle; bumped on every reload so late events can be dropped.
    cycle: u64,
}

impl<V: VisibilityTracker> GalleryLoader<V> {
    /// Creates an empty loader using `tracker` for deferred tiles.
    pub fn new(options: GalleryOptions, tracker: V) -> Self {
        Self {
            options,
            tracker,
            items: Vec::new().into(),
            rendered_count: 0,
            preload_cursor: 0,
            primed_until: 0,
            primed: false,
            slots: BTreeMap::new(),
            sentinel: SentinelState::Hidden,
            batch_pending: false,
            cycle: 0,
        }
    }

    /// Handles a loader message.
    pub fn handle(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Reload(items) => self.reload(items),
            Message::RenderNextBatch => self.render_next_batch(),
            Message::Entered(target) => self.on_entered(target),
            Message::BatchTimerElapsed { cycle } => self.on_batch_timer(cycle),
            Message::ImageSettled {
                cycle,
                index,
                outcome,
            } => self.on_settled(cycle, index, outcome),
            Message::Activate(index) => self.activate(index),
        }
    }

    /// Replaces the list and resets every cursor without rendering.
    pub fn set_items(&mut self, items: Vec<ImageRef>) -> Vec<Effect> {
        let mut effects = vec![Effect::ClearTiles];

        for (&index, state) in &self.slots {
            if *state == LoadState::Deferred {
                self.tracker.unobserve(Target::Tile(index));
            }
        }

        self.cycle += 1;
        self.items = items.into();
        self.rendered_count = 0;
        self.preload_cursor = self.options.preload_count.value().min(self.items.len());
        self.primed_until = 0;
        self.primed = false;
        self.slots.clear();
        self.batch_pending = false;

        if self.items.is_empty() {
            effects.push(Effect::ShowEmptyState(true));
            self.tracker.unobserve(Target::Sentinel);
            self.set_sentinel(SentinelState::Hidden, &mut effects);
        } else {
            effects.push(Effect::ShowEmptyState(false));
            self.tracker.observe(Target::Sentinel);
            self.set_sentinel(SentinelState::Idle, &mut effects);
        }

        log::debug!(
            "gallery cycle {} with {} items",
            self.cycle,
            self.items.len()
        );
        effects
    }

    /// Replaces the list, resets every cursor and renders the first batch.
    pub fn reload(&mut self, items: Vec<ImageRef>) -> Vec<Effect> {
        let mut effects = self.set_items(items);
        if !self.items.is_empty() {
            effects.extend(self.render_next_batch());
        }
        effects
    }

    /// Appends up to one batch of tiles. A no-op (besides hiding the
    /// sentinel) once everything is rendered.
    pub fn render_next_batch(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let total = self.items.len();

        if self.rendered_count >= total {
            self.batch_pending = false;
            self.tracker.unobserve(Target::Sentinel);
            self.set_sentinel(SentinelState::Hidden, &mut effects);
            return effects;
        }

        let first_batch = self.rendered_count == 0;
        let start = self.rendered_count;
        let end = (start + self.options.batch_size.value()).min(total);

        for index in start..end {
            effects.push(Effect::CreateTile {
                index,
                url: self.items[index].url().map(str::to_owned),
            });
            self.slots.insert(index, LoadState::Deferred);
            self.rendered_count = index + 1;

            if index < self.eager_limit() {
                self.force_load(index, &mut effects);
            } else {
                self.tracker.observe(Target::Tile(index));
            }
        }

        let window = self.options.preload_count.value();
        if first_batch && !self.primed && total > window {
            self.primed = true;
            self.primed_until = (2 * window).min(total);
            for index in window..self.primed_until {
                self.force_load(index, &mut effects);
            }
        }

        self.batch_pending = false;
        if self.rendered_count >= total {
            self.tracker.unobserve(Target::Sentinel);
            self.set_sentinel(SentinelState::Hidden, &mut effects);
        } else {
            // Re-arm so a sentinel still on screen triggers again.
            self.tracker.observe(Target::Sentinel);
            self.set_sentinel(SentinelState::Idle, &mut effects);
        }

        log::debug!(
            "rendered tiles {start}..{end} of {total}, preload cursor {}",
            self.preload_cursor
        );
        effects
    }

    /// Opens the viewer on a rendered tile.
    pub fn activate(&self, index: usize) -> Vec<Effect> {
        if index >= self.rendered_count {
            log::debug!("ignoring activation of unrendered tile {index}");
            return Vec::new();
        }
        vec![Effect::OpenViewer {
            items: self.items.clone(),
            index,
        }]
    }

    fn on_entered(&mut self, target: Target) -> Vec<Effect> {
        let mut effects = Vec::new();
        match target {
            Target::Sentinel => {
                if self.sentinel == SentinelState::Hidden || self.batch_pending {
                    return effects;
                }
                self.batch_pending = true;
                self.set_sentinel(SentinelState::Loading, &mut effects);
                effects.push(Effect::ScheduleBatch {
                    cycle: self.cycle,
                    delay: self.options.batch_debounce,
                });
            }
            Target::Tile(index) => self.force_load(index, &mut effects),
        }
        effects
    }

    fn on_batch_timer(&mut self, cycle: u64) -> Vec<Effect> {
        if cycle != self.cycle || !self.batch_pending {
            log::debug!("dropping stale batch timer from cycle {cycle}");
            return Vec::new();
        }
        self.render_next_batch()
    }

    fn on_settled(&mut self, cycle: u64, index: usize, outcome: LoadOutcome) -> Vec<Effect> {
        let mut effects = Vec::new();
        if cycle != self.cycle {
            log::debug!("dropping completion of {index} from stale cycle {cycle}");
            return effects;
        }
        if self.slots.get(&index) != Some(&LoadState::Requested) {
            return effects;
        }

        let state = match outcome {
            LoadOutcome::Loaded => LoadState::Loaded,
            LoadOutcome::Failed => {
                log::warn!("gallery image {index} failed to load");
                LoadState::Failed
            }
        };
        self.slots.insert(index, state);
        self.advance_window(index, &mut effects);
        effects
    }

    /// Tiles below this index are force-loaded at creation.
    fn eager_limit(&self) -> usize {
        self.preload_cursor.max(self.primed_until)
    }

    /// Assigns the source of a deferred tile. Tiles that do not exist yet are
    /// picked up by `eager_limit` when their batch renders.
    fn force_load(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if self.slots.get(&index) != Some(&LoadState::Deferred) {
            return;
        }
        self.tracker.unobserve(Target::Tile(index));

        if let Some(url) = self.items[index].url() {
            self.slots.insert(index, LoadState::Requested);
            effects.push(Effect::LoadImage {
                cycle: self.cycle,
                index,
                url: url.to_owned(),
            });
        } else {
            // An unusable source fails at once; account for it like any
            // other completion so the window keeps moving.
            log::warn!("gallery item {index} has no usable url");
            self.slots.insert(index, LoadState::Failed);
            self.advance_window(index, effects);
        }
    }

    fn advance_window(&mut self, settled: usize, effects: &mut Vec<Effect>) {
        let total = self.items.len();
        if self.preload_cursor >= total {
            return;
        }
        if settled.abs_diff(self.preload_cursor) > self.options.preload_count.trigger_distance() {
            return;
        }

        let start = self.preload_cursor;
        let end = (start + self.options.preload_count.value()).min(total);
        self.preload_cursor = end;
        for index in start..end {
            self.force_load(index, effects);
        }
    }

    fn set_sentinel(&mut self, state: SentinelState, effects: &mut Vec<Effect>) {
        if self.sentinel != state {
            self.sentinel = state;
            effects.push(Effect::SetSentinel(state));
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn items(&self) -> &ImageList {
        &self.items
    }

    #[must_use]
    pub fn rendered_count(&self) -> usize {
        self.rendered_count
    }

    #[must_use]
    pub fn preload_cursor(&self) -> usize {
        self.preload_cursor
    }

    /// Load state of a rendered tile, `None` if the tile does not exist.
    #[must_use]
    pub fn load_state(&self, index: usize) -> Option<LoadState> {
        self.slots.get(&index).copied()
    }

    #[must_use]
    pub fn sentinel(&self) -> SentinelState {
        self.sentinel
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rendered_count >= self.items.len()
    }

    /// Current load cycle, echoed back by timers and completions.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn tracker(&self) -> &V {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut V {
        &mut self.tracker
    }
}
