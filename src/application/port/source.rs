// SPDX-License-Identifier: MPL-2.0
//! Gallery data source port.
//!
//! This module defines the [`GalleryBackend`] trait through which the host
//! fetches the persisted history, runs a one-off generation, and reads the
//! server's default generation payload.
//!
//! # Design Notes
//!
//! - History items arrive as [`ImageRef`]s with absolute URLs
//! - Generation output is already normalized to data URIs
//! - A missing default payload is `Ok(None)`, not an error

use crate::domain::media::ImageRef;
use crate::error::SourceError;
use std::future::Future;

// =============================================================================
// HistoryPage
// =============================================================================

/// Snapshot of the server-side history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryPage {
    /// `false` when the server has no history directory. The host then
    /// leaves the current gallery untouched.
    pub enabled: bool,

    /// Server-provided reason when history is disabled.
    pub error: String,

    /// Newest first.
    pub items: Vec<ImageRef>,
}

impl HistoryPage {
    /// A page from an enabled history.
    #[must_use]
    pub fn enabled(items: Vec<ImageRef>) -> Self {
        Self {
            enabled: true,
            error: String::new(),
            items,
        }
    }

    /// A page from a server without history.
    pub fn disabled(error: impl Into<String>) -> Self {
        Self {
            enabled: false,
            error: error.into(),
            items: Vec::new(),
        }
    }
}

// =============================================================================
// GalleryBackend Trait
// =============================================================================

/// Port for the remote generation and history service.
pub trait GalleryBackend {
    /// Fetches the history listing.
    fn history(&self) -> impl Future<Output = Result<HistoryPage, SourceError>> + Send;

    /// Posts a generation payload and returns the produced images.
    fn generate(
        &self,
        payload: &serde_json::Value,
    ) -> impl Future<Output = Result<Vec<ImageRef>, SourceError>> + Send;

    /// Reads the default generation payload, if the server has one.
    fn default_payload(
        &self,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, SourceError>> + Send;
}
