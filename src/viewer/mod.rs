// SPDX-License-Identifier: MPL-2.0
//! Full-screen lightbox viewer.
//!
//! Turns low-level pointer and keyboard input into zoom, pan, swipe and
//! dismiss semantics with rubber-band feedback and crossfade navigation.
//!
//! ## Architecture
//!
//! ```text
//! engine.rs (ViewerEngine)
//!     └── state.rs   - ViewerState + pure transition(state, message, options)
//!           └── gesture.rs - drag math and release intent
//! ```
//!
//! The viewer works on its own snapshot of the item list taken at open time;
//! it never touches gallery state. Reaching either end of the list surfaces
//! as [`Effect::ReachedEdge`].

mod engine;
pub mod gesture;
mod options;
pub mod state;

pub use engine::ViewerEngine;
pub use options::ViewerOptions;
pub use state::{
    transition, Edge, Effect, Gesture, Message, NavAffordance, PreloadOutcome, Session,
    Transform, ViewerState, Zoom,
};
