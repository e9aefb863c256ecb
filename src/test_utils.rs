// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.
//!
//! Offsets and opacities are `f32`; compare them with the `approx` macros
//! rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

use crate::domain::media::ImageRef;

/// Default epsilon for gesture geometry comparisons.
pub const F32_EPSILON: f32 = 1e-4;

/// `count` history-style image references, named by index.
pub fn history_refs(count: usize) -> Vec<ImageRef> {
    (0..count)
        .map(|i| ImageRef::from(format!("/history/image?name={i}.png")))
        .collect()
}
