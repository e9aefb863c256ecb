// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use crate::i18n::I18n;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (3s).
    #[default]
    Success,
    /// Informational message, e.g. "first image" (3s).
    Info,
    /// Degraded but usable, e.g. config fallback (5s).
    Warning,
    /// Server or payload failure (manual dismiss).
    Error,
}

impl Severity {
    /// Returns the auto-dismiss duration for this severity.
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }

    /// i18n key of the short label shown before the message.
    #[must_use]
    pub fn label_key(&self) -> &'static str {
        match self {
            Severity::Success => "severity-success",
            Severity::Info => "severity-info",
            Severity::Warning => "severity-warning",
            Severity::Error => "severity-error",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// The i18n key for the notification message.
    message_key: String,
    /// Arguments for message interpolation.
    message_args: Vec<(String, String)>,
    created_at: Instant,
    /// Custom auto-dismiss duration (overrides severity default).
    custom_dismiss_duration: Option<Duration>,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    ///
    /// The `message_key` should be a valid i18n key that will be resolved
    /// at render time.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            custom_dismiss_duration: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the severity default.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.custom_dismiss_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Whether the notification has outlived its display duration at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.custom_dismiss_duration
            .or_else(|| self.severity.auto_dismiss_duration())
            .is_some_and(|duration| now.saturating_duration_since(self.created_at) >= duration)
    }

    /// Resolves the message text in the current locale.
    #[must_use]
    pub fn text(&self, i18n: &I18n) -> String {
        let args: Vec<(&str, &str)> = self
            .message_args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        i18n.tr_with_args(&self.message_key, &args)
    }

    /// Label and message, e.g. `Error: Could not reach the server`.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> String {
        format!(
            "{}: {}",
            i18n.tr(self.severity.label_key()),
            self.text(i18n)
        )
    }
}
