// SPDX-License-Identifier: MPL-2.0
//! User-facing feedback surfaces.
//!
//! - [`notifications`] - Notification queue for user feedback

pub mod notifications;
