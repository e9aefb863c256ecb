// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` handles queuing, display timing, and dismissal of notifications.
//! It limits the number of visible notifications and manages auto-dismiss timers.

use super::notification::{Notification, NotificationId, Severity};
use crate::i18n::I18n;
use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of notifications visible at once.
const MAX_VISIBLE: usize = 3;

/// Manages the notification queue and visible notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Queued notifications waiting to be displayed.
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new notification to be displayed.
    ///
    /// If fewer than `MAX_VISIBLE` notifications are showing, it's displayed
    /// immediately. Otherwise, it's added to the queue and shown when space
    /// becomes available. Warnings and errors are also logged.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => log::warn!("notification: {}", notification.message_key()),
            Severity::Error => log::error!("notification: {}", notification.message_key()),
            Severity::Success | Severity::Info => {
                log::debug!("notification: {}", notification.message_key());
            }
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Builds and pushes a notification from a key, severity and named
    /// arguments. Returns its ID.
    pub fn notify(
        &mut self,
        key: &str,
        severity: Severity,
        params: &[(&str, &str)],
    ) -> NotificationId {
        let notification = params
            .iter()
            .fold(Notification::new(severity, key), |n, (name, value)| {
                n.with_arg(*name, *value)
            });
        let id = notification.id();
        self.push(notification);
        id
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Dismisses every visible notification that has expired.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// [`tick`](Self::tick) against an explicit clock.
    pub fn tick_at(&mut self, now: Instant) {
        let to_dismiss: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.is_expired_at(now))
            .map(Notification::id)
            .collect();

        for id in to_dismiss {
            self.dismiss(id);
        }
    }

    /// Returns the currently visible notifications.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Resolved text of the visible notifications, newest first.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> Vec<String> {
        self.visible.iter().map(|n| n.render(i18n)).collect()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Clears all notifications (visible and queued).
    pub fn clear(&mut self) {
        self.visible.clear();
        self.queue.clear();
    }

    /// Removes server error notifications.
    ///
    /// Called after a successful request so a stale "server unreachable"
    /// message does not linger.
    pub fn clear_server_errors(&mut self) {
        let visible_before = self.visible.len();
        self.visible
            .retain(|n| n.message_key() != "notification-server-error");
        self.queue
            .retain(|n| n.message_key() != "notification-server-error");

        if self.visible.len() < visible_before {
            self.promote_from_queue();
        }
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            if let Some(notification) = self.queue.pop_front() {
                self.visible.push_back(notification);
            } else {
                break;
            }
        }
    }
}
