// SPDX-License-Identifier: MPL-2.0
//! Transient user feedback.
//!
//! Notifications inform users about outcomes (generation finished, server
//! unreachable, first / last image reached) without blocking interaction.
//! Messages are stored as i18n keys and resolved when rendered.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for queuing and lifecycle management
//!
//! # Usage
//!
//! ```
//! use lens_gallery::ui::notifications::{Manager, Severity};
//!
//! let mut manager = Manager::new();
//! manager.notify("notification-generate-success", Severity::Success, &[("count", "4")]);
//! assert_eq!(manager.visible_count(), 1);
//! ```
//!
//! # Design Considerations
//!
//! - Duration: ~3s for success/info, ~5s for warnings, manual dismiss for errors
//! - Max visible: 3 (others are queued)

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, NotificationId, Severity};
