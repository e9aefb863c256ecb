// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`source`]: History, generation and default payload
//!
//! # Design Notes
//!
//! - Traits use domain types only (no `reqwest` types leak out)
//! - Futures are `Send` so adapters can run on a multi-threaded runtime
//! - Methods return `Result` with [`SourceError`](crate::error::SourceError)

pub mod source;

pub use source::{GalleryBackend, HistoryPage};
