// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains the image reference shape shared by the gallery
//! loader and the viewer.

pub mod image_ref;

// Re-export commonly used types
pub use image_ref::{normalize_generated, ImageList, ImageRef, DATA_URI_PREFIX, PNG_BASE64_PREFIX};
