// SPDX-License-Identifier: MPL-2.0
//! Command-line host.
//!
//! Wires a [`GalleryBackend`] to the gallery loader, the viewer, text lookup
//! and notifications. Each command produces a [`Report`] of output lines and
//! resolved notifications; `main.rs` prints it.

pub mod message;

pub use message::{parse_flags, Command, Flags, FlagsError};

use crate::application::port::GalleryBackend;
use crate::config::{self, Config};
use crate::domain::media::{ImageList, DATA_URI_PREFIX};
use crate::gallery::{self, GalleryLoader, SharedTracker, ViewportTracker};
use crate::i18n::I18n;
use crate::infrastructure::HttpBackend;
use crate::payload;
use crate::ui::notifications::{Manager, Notification, Severity};
use crate::viewer::{self, ViewerEngine};
use std::path::Path;
use std::process::ExitCode;

/// Inline images are summarized instead of printed in full.
const INLINE_PREVIEW_LEN: usize = 48;

/// Output of one command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Lines for standard output.
    pub lines: Vec<String>,
    /// Resolved notifications, newest first.
    pub notifications: Vec<String>,
    pub success: bool,
}

/// Host state for one run.
pub struct App<B> {
    i18n: I18n,
    backend: B,
    notifications: Manager,
    tracker: SharedTracker<ViewportTracker>,
    gallery: GalleryLoader<SharedTracker<ViewportTracker>>,
    viewer: ViewerEngine,
}

impl<B: GalleryBackend> App<B> {
    /// Creates the host from loaded settings. `config_warning` is an i18n key
    /// reported by [`config::load`].
    pub fn new(i18n: I18n, config: &Config, config_warning: Option<String>, backend: B) -> Self {
        let options = config.gallery_options();
        let tracker = ViewportTracker::shared(options.lazy_margin);
        let gallery = GalleryLoader::new(options, tracker.clone());
        let mut notifications = Manager::new();
        if let Some(key) = config_warning {
            notifications.notify(&key, Severity::Warning, &[]);
        }

        Self {
            i18n,
            backend,
            notifications,
            tracker,
            gallery,
            viewer: ViewerEngine::new(config.viewer_options()),
        }
    }

    /// Runs a command to completion.
    pub async fn execute(&mut self, command: &Command) -> Report {
        self.notifications.tick();
        let mut lines = Vec::new();
        let success = match command {
            Command::History => self.history(&mut lines).await,
            Command::Generate(path) => self.generate(path, &mut lines).await,
            Command::Format(path) => self.format(path, &mut lines),
            Command::Payload => self.default_payload(&mut lines).await,
            Command::Help => {
                lines.push(self.i18n.tr("cli-usage"));
                true
            }
        };

        Report {
            lines,
            notifications: self.notifications.render(&self.i18n),
            success,
        }
    }

    async fn history(&mut self, lines: &mut Vec<String>) -> bool {
        let page = match self.backend.history().await {
            Ok(page) => page,
            Err(err) => {
                log::error!("history request failed: {err}");
                self.notifications
                    .notify(err.i18n_key(), Severity::Error, &[]);
                return false;
            }
        };
        self.notifications.clear_server_errors();

        if !page.enabled {
            self.notifications
                .notify("notification-history-disabled", Severity::Info, &[]);
            if !page.error.is_empty() {
                lines.push(
                    self.i18n
                        .tr_with_args("cli-history-server-error", &[("error", page.error.as_str())]),
                );
            }
            return true;
        }

        let effects = self.gallery.reload(page.items);
        let mut rendered = 0;
        let mut requested = Vec::new();
        for effect in &effects {
            match effect {
                gallery::Effect::CreateTile { .. } => rendered += 1,
                gallery::Effect::LoadImage { index, url, .. } => requested.push((*index, url)),
                _ => {}
            }
        }

        if self.gallery.items().is_empty() {
            lines.push(self.i18n.tr("gallery-empty"));
            return true;
        }

        let total = self.gallery.items().len().to_string();
        let rendered = rendered.to_string();
        let requested_count = requested.len().to_string();
        lines.push(self.i18n.tr_with_args(
            "cli-history-summary",
            &[
                ("total", total.as_str()),
                ("rendered", rendered.as_str()),
                ("requested", requested_count.as_str()),
            ],
        ));
        for (index, url) in requested {
            lines.push(image_line(&self.i18n, index, url));
        }
        log::debug!(
            "{} targets awaiting visibility",
            self.tracker.borrow().observed_count()
        );
        true
    }

    async fn generate(&mut self, path: &Path, lines: &mut Vec<String>) -> bool {
        let Some(text) = self.read_file(path) else {
            return false;
        };
        let payload = match payload::parse(&text) {
            Ok(payload) => payload,
            Err(err) => {
                self.notifications
                    .notify(err.i18n_key(), Severity::Error, &[]);
                return false;
            }
        };

        let images = match self.backend.generate(&payload).await {
            Ok(images) => images,
            Err(err) => {
                log::error!("generation failed: {err}");
                self.notifications
                    .notify(err.i18n_key(), Severity::Error, &[]);
                return false;
            }
        };
        self.notifications.clear_server_errors();

        if images.is_empty() {
            self.notifications
                .notify("notification-generate-empty", Severity::Info, &[]);
            return true;
        }

        let count = images.len().to_string();
        self.notifications.notify(
            "notification-generate-success",
            Severity::Success,
            &[("count", count.as_str())],
        );

        // One-off results go straight to the viewer.
        let items: ImageList = images.into();
        let effects = self.viewer.open(items.clone(), 0);
        self.apply_viewer_effects(effects);
        for (index, item) in items.iter().enumerate() {
            if let Some(url) = item.url() {
                lines.push(image_line(&self.i18n, index, url));
            }
        }

        // The server stores new images in its history; pick them up.
        if !self.history(lines).await {
            log::warn!("history refresh after generation failed");
        }
        true
    }

    /// Feeds a message to the viewer and applies the resulting effects.
    pub fn handle_viewer(&mut self, message: viewer::Message) {
        let effects = self.viewer.handle(message);
        self.apply_viewer_effects(effects);
    }

    /// Applies the viewer effects a command-line host can express: edge
    /// feedback becomes a notification, source changes are logged.
    fn apply_viewer_effects(&mut self, effects: Vec<viewer::Effect>) {
        for effect in effects {
            match effect {
                viewer::Effect::ReachedEdge(edge) => {
                    self.notifications
                        .notify(edge.notification_key(), Severity::Info, &[]);
                }
                viewer::Effect::SetSource(source) => {
                    log::debug!("viewer showing {:?}", source.as_deref().map(preview));
                }
                _ => {}
            }
        }
    }

    fn format(&mut self, path: &Path, lines: &mut Vec<String>) -> bool {
        let Some(text) = self.read_file(path) else {
            return false;
        };
        match payload::format(&text) {
            Ok(formatted) => {
                lines.push(formatted);
                self.notifications
                    .notify("notification-format-ok", Severity::Success, &[]);
                true
            }
            Err(err) => {
                self.notifications
                    .notify(err.i18n_key(), Severity::Error, &[]);
                false
            }
        }
    }

    async fn default_payload(&mut self, lines: &mut Vec<String>) -> bool {
        match self.backend.default_payload().await {
            Ok(Some(payload)) => match serde_json::to_string_pretty(&payload) {
                Ok(text) => {
                    lines.push(text);
                    true
                }
                Err(err) => {
                    log::error!("cannot print payload: {err}");
                    false
                }
            },
            Ok(None) => {
                self.notifications
                    .notify("notification-payload-missing", Severity::Info, &[]);
                true
            }
            Err(err) => {
                log::error!("payload request failed: {err}");
                self.notifications
                    .notify(err.i18n_key(), Severity::Error, &[]);
                false
            }
        }
    }

    fn read_file(&mut self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("reading {}: {err}", path.display());
                let shown = path.display().to_string();
                self.notifications
                    .notify("cli-read-failed", Severity::Error, &[("path", shown.as_str())]);
                None
            }
        }
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryLoader<SharedTracker<ViewportTracker>> {
        &self.gallery
    }

    #[must_use]
    pub fn viewer(&self) -> &ViewerEngine {
        &self.viewer
    }

    /// Shows a notification alongside the ones commands raise.
    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    #[must_use]
    pub fn notifications(&self) -> &Manager {
        &self.notifications
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }
}

fn preview(url: &str) -> String {
    if !url.starts_with(DATA_URI_PREFIX) {
        return url.to_string();
    }
    match url.char_indices().nth(INLINE_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}… ({} bytes)", &url[..cut], url.len()),
        None => url.to_string(),
    }
}

fn image_line(i18n: &I18n, index: usize, url: &str) -> String {
    let index = index.to_string();
    let url = preview(url);
    i18n.tr_with_args("cli-image-line", &[("index", index.as_str()), ("url", url.as_str())])
}

/// Loads settings, builds the HTTP backend and runs the command.
pub async fn run(flags: Flags) -> ExitCode {
    config::paths::init_cli_override(flags.config_dir.clone());
    let (config, config_warning) = config::load();
    let i18n = I18n::new(flags.lang.clone(), &config);

    let server = flags.server.clone().unwrap_or_else(|| config.server_url());
    let backend = match HttpBackend::new(&server) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{}", i18n.tr(err.i18n_key()));
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(i18n, &config, config_warning, backend);
    let report = app.execute(&flags.command).await;
    for line in &report.lines {
        println!("{line}");
    }
    for notification in &report.notifications {
        eprintln!("{notification}");
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
