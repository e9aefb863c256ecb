// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use iced_core::keyboard::key::Named;
use iced_core::{Point, Vector};
use lens_gallery::app::{App, Command};
use lens_gallery::application::port::{GalleryBackend, HistoryPage};
use lens_gallery::config::{self, Config, GalleryConfig, GeneralConfig};
use lens_gallery::domain::media::{normalize_generated, ImageList, ImageRef};
use lens_gallery::domain::ui::{BatchSize, PreloadCount};
use lens_gallery::error::SourceError;
use lens_gallery::gallery::{
    self, GalleryLoader, GalleryOptions, LoadOutcome, LoadState, SentinelState, Span, Target,
    ViewportTracker, VisibilityTracker,
};
use lens_gallery::i18n::I18n;
use lens_gallery::ui::notifications::{Notification, Severity};
use lens_gallery::viewer::{
    self, transition, Edge, PreloadOutcome, ViewerEngine, ViewerOptions, ViewerState,
};
use std::time::{Duration, Instant};
use tempfile::tempdir;

// =============================================================================
// Helpers
// =============================================================================

fn refs(count: usize) -> Vec<ImageRef> {
    (0..count)
        .map(|i| ImageRef::from(format!("http://127.0.0.1:8080/history/image?name={i}.png")))
        .collect()
}

fn list(urls: &[&str]) -> ImageList {
    urls.iter().map(|url| ImageRef::from(*url)).collect()
}

fn gallery_options(batch: usize, window: usize) -> GalleryOptions {
    GalleryOptions {
        batch_size: BatchSize::new(batch),
        preload_count: PreloadCount::new(window),
        ..GalleryOptions::default()
    }
}

fn loaded(effects: &[gallery::Effect]) -> Vec<usize> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            gallery::Effect::LoadImage { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

fn created(effects: &[gallery::Effect]) -> Vec<usize> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            gallery::Effect::CreateTile { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

fn settle<V: VisibilityTracker>(
    gallery: &mut GalleryLoader<V>,
    index: usize,
    outcome: LoadOutcome,
) -> Vec<gallery::Effect> {
    let cycle = gallery.cycle();
    gallery.handle(gallery::Message::ImageSettled {
        cycle,
        index,
        outcome,
    })
}

fn preload_token(effects: &[viewer::Effect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        viewer::Effect::Preload { token, .. } => Some(*token),
        _ => None,
    })
}

fn finish_preload(engine: &mut ViewerEngine, effects: &[viewer::Effect]) -> Vec<viewer::Effect> {
    let token = preload_token(effects).expect("navigation should request a preload");
    engine.handle(viewer::Message::PreloadFinished {
        token,
        outcome: PreloadOutcome::Loaded,
    })
}

fn drag(engine: &mut ViewerEngine, from: Point, to: Point, at: Instant) -> Vec<viewer::Effect> {
    let mut effects = engine.handle(viewer::Message::PointerDown { position: from, at });
    effects.extend(engine.handle(viewer::Message::PointerMove { position: to }));
    effects.extend(engine.handle(viewer::Message::Frame));
    effects.extend(engine.handle(viewer::Message::PointerUp));
    effects
}

// =============================================================================
// Gallery loader
// =============================================================================

#[test]
fn hundred_items_render_first_batch_and_prime_two_windows() {
    let mut gallery = GalleryLoader::new(gallery_options(40, 12), ViewportTracker::new(0.0));
    let effects = gallery.reload(refs(100));

    assert_eq!(created(&effects), (0..40).collect::<Vec<_>>());
    assert!(loaded(&effects).starts_with(&(0..12).collect::<Vec<_>>()));

    let mut advanced = Vec::new();
    for index in 0..=10 {
        advanced.extend(loaded(&settle(&mut gallery, index, LoadOutcome::Loaded)));
    }
    assert_eq!(gallery.preload_cursor(), 24);
    for index in 12..24 {
        assert_eq!(gallery.load_state(index), Some(LoadState::Requested));
    }
    // Nothing beyond the second window was requested early.
    assert!(advanced.iter().all(|&index| index < 24));
    assert_eq!(gallery.load_state(24), Some(LoadState::Deferred));
}

#[test]
fn repeated_batches_cover_the_list_once_then_stop() {
    let mut gallery = GalleryLoader::new(gallery_options(40, 12), ViewportTracker::new(0.0));
    let mut tiles = created(&gallery.reload(refs(95)));
    let mut previous = gallery.rendered_count();

    for _ in 0..5 {
        tiles.extend(created(&gallery.render_next_batch()));
        assert!(gallery.rendered_count() >= previous);
        assert!(gallery.rendered_count() <= 95);
        previous = gallery.rendered_count();
    }

    assert_eq!(tiles, (0..95).collect::<Vec<_>>());
    assert_eq!(gallery.sentinel(), SentinelState::Hidden);
    assert!(gallery.render_next_batch().is_empty());
}

#[test]
fn completions_drive_every_image_to_settle() {
    let mut gallery = GalleryLoader::new(gallery_options(40, 12), ViewportTracker::new(0.0));
    let mut pending: Vec<usize> = loaded(&gallery.reload(refs(100)));
    pending.extend(loaded(&gallery.render_next_batch()));
    pending.extend(loaded(&gallery.render_next_batch()));

    let mut cursor = gallery.preload_cursor();
    let mut next = 0;
    while next < pending.len() {
        let index = pending[next];
        next += 1;
        let requested = loaded(&settle(&mut gallery, index, LoadOutcome::Loaded));
        assert!(gallery.preload_cursor() >= cursor, "cursor moved backwards");
        cursor = gallery.preload_cursor();
        assert!(requested.iter().all(|&i| i < cursor));
        pending.extend(requested);
    }

    assert_eq!(gallery.preload_cursor(), 100);
    for index in 0..100 {
        assert_eq!(gallery.load_state(index), Some(LoadState::Loaded), "tile {index}");
    }
}

#[test]
fn empty_reload_shows_empty_state_without_tiles() {
    let mut gallery = GalleryLoader::new(GalleryOptions::default(), ViewportTracker::new(0.0));
    gallery.reload(refs(3));

    let effects = gallery.reload(Vec::new());
    assert_eq!(effects.first(), Some(&gallery::Effect::ClearTiles));
    assert!(effects.contains(&gallery::Effect::ShowEmptyState(true)));
    assert!(created(&effects).is_empty());
    assert_eq!(gallery.sentinel(), SentinelState::Hidden);
    assert_eq!(gallery.rendered_count(), 0);
}

#[test]
fn failed_images_keep_the_window_moving() {
    let mut gallery = GalleryLoader::new(gallery_options(40, 12), ViewportTracker::new(0.0));
    gallery.reload(refs(60));
    settle(&mut gallery, 3, LoadOutcome::Failed);

    assert_eq!(gallery.load_state(3), Some(LoadState::Failed));
    assert_eq!(gallery.preload_cursor(), 24);
}

#[test]
fn viewport_tracker_drives_tiles_and_batches() {
    const ROW: f32 = 100.0;
    let tracker = ViewportTracker::shared(200.0);
    let mut gallery = GalleryLoader::new(gallery_options(40, 12), tracker.clone());
    gallery.reload(refs(100));

    let layout = |rendered: usize| {
        let mut spans: Vec<(Target, Span)> = (0..rendered)
            .map(|i| (Target::Tile(i), Span::new(i as f32 * ROW, (i + 1) as f32 * ROW)))
            .collect();
        let end = rendered as f32 * ROW;
        spans.push((Target::Sentinel, Span::new(end, end)));
        spans
    };

    // Scroll into the deferred part of the first batch.
    let entered = tracker
        .borrow_mut()
        .update(Span::new(2700.0, 3200.0), layout(gallery.rendered_count()));
    assert!(entered.contains(&Target::Tile(30)));
    assert!(!entered.contains(&Target::Sentinel));

    let mut requested = Vec::new();
    for target in entered {
        requested.extend(loaded(&gallery.handle(gallery::Message::Entered(target))));
    }
    assert!(requested.contains(&30));
    assert_eq!(gallery.load_state(30), Some(LoadState::Requested));
    assert_eq!(gallery.load_state(39), Some(LoadState::Deferred));
    assert!(!tracker.borrow().is_observed(Target::Tile(30)));

    // Reach the end of the rendered list.
    let entered = tracker
        .borrow_mut()
        .update(Span::new(3500.0, 4000.0), layout(gallery.rendered_count()));
    assert!(entered.contains(&Target::Sentinel));

    let effects = gallery.handle(gallery::Message::Entered(Target::Sentinel));
    let cycle = gallery.cycle();
    assert!(effects.contains(&gallery::Effect::ScheduleBatch {
        cycle,
        delay: Duration::from_millis(300),
    }));
    assert_eq!(gallery.sentinel(), SentinelState::Loading);

    let effects = gallery.handle(gallery::Message::BatchTimerElapsed { cycle });
    assert_eq!(created(&effects), (40..80).collect::<Vec<_>>());
    assert!(tracker.borrow().is_observed(Target::Sentinel));
}

// =============================================================================
// Viewer
// =============================================================================

#[test]
fn navigating_back_swaps_then_bounces_at_first_item() {
    let mut engine = ViewerEngine::new(ViewerOptions::default());
    engine.open(list(&["A", "B", "C"]), 1);
    assert_eq!(engine.current_source(), Some("B"));

    let effects = engine.handle(viewer::Message::Navigate(-1));
    assert_eq!(engine.current_index(), Some(1), "swap waits for the preload");
    let effects = finish_preload(&mut engine, &effects);
    assert!(effects.contains(&viewer::Effect::SetSource(Some("A".to_string()))));
    assert_eq!(engine.current_index(), Some(0));
    assert_eq!(engine.current_source(), Some("A"));

    let effects = engine.handle(viewer::Message::Navigate(-1));
    assert_eq!(engine.current_index(), Some(0));
    assert!(preload_token(&effects).is_none());
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, viewer::Effect::Bounce { .. })));
    assert!(effects.contains(&viewer::Effect::ReachedEdge(Edge::First)));
    assert_eq!(Edge::First.direction(), -1);
}

#[test]
fn navigating_past_last_item_reports_forward_edge() {
    let mut engine = ViewerEngine::new(ViewerOptions::default());
    engine.open(list(&["A", "B"]), 1);

    let effects = engine.handle(viewer::Message::Key(Named::ArrowRight));
    assert_eq!(engine.current_index(), Some(1));
    assert!(effects.contains(&viewer::Effect::ReachedEdge(Edge::Last)));
    assert_eq!(Edge::Last.direction(), 1);
}

#[test]
fn long_downward_drag_closes_the_viewer() {
    let mut engine = ViewerEngine::new(ViewerOptions::default());
    engine.open(list(&["A", "B", "C"]), 0);

    let effects = drag(
        &mut engine,
        Point::new(200.0, 200.0),
        Point::new(200.0, 450.0),
        Instant::now(),
    );
    assert!(effects.contains(&viewer::Effect::Hide));
    assert!(!engine.is_open());
}

#[test]
fn fit_drag_is_damped_and_snaps_back() {
    let mut engine = ViewerEngine::new(ViewerOptions::default());
    engine.open(list(&["A", "B", "C"]), 1);

    let start = Point::new(100.0, 100.0);
    engine.handle(viewer::Message::PointerDown {
        position: start,
        at: Instant::now(),
    });
    engine.handle(viewer::Message::PointerMove {
        position: start + Vector::new(20.0, -35.0),
    });
    let transform = engine.transform().expect("viewer is open");
    assert_abs_diff_eq!(transform.offset.x, 8.0, epsilon = 1e-4);
    assert_abs_diff_eq!(transform.offset.y, -14.0, epsilon = 1e-4);

    engine.handle(viewer::Message::PointerUp);
    let transform = engine.transform().expect("viewer is open");
    assert_eq!(transform.offset, Vector::ZERO);
    assert_eq!(engine.current_index(), Some(1));
}

#[test]
fn double_tap_zooms_and_third_tap_starts_over() {
    let options = ViewerOptions::default();
    let mut engine = ViewerEngine::new(options);
    engine.open(list(&["A"]), 0);

    let t0 = Instant::now();
    let at = Point::new(50.0, 50.0);
    engine.handle(viewer::Message::PointerDown { position: at, at: t0 });
    engine.handle(viewer::Message::PointerUp);
    engine.handle(viewer::Message::PointerDown {
        position: at,
        at: t0 + Duration::from_millis(100),
    });
    engine.handle(viewer::Message::PointerUp);
    let scale = engine.transform().map(|t| t.scale);
    assert_eq!(scale, Some(options.max_scale.value()));

    // Within the window of the toggle, but the timestamp was consumed.
    engine.handle(viewer::Message::PointerDown {
        position: at,
        at: t0 + Duration::from_millis(200),
    });
    engine.handle(viewer::Message::PointerUp);
    assert_eq!(engine.transform().map(|t| t.scale), scale);

    engine.handle(viewer::Message::PointerDown {
        position: at,
        at: t0 + Duration::from_millis(250),
    });
    assert_eq!(engine.transform().map(|t| t.scale), Some(1.0));
}

#[test]
fn zoomed_drags_pan_without_damping() {
    let mut engine = ViewerEngine::new(ViewerOptions::default());
    engine.open(list(&["A", "B"]), 0);

    let t0 = Instant::now();
    let origin = Point::new(10.0, 10.0);
    engine.handle(viewer::Message::PointerDown { position: origin, at: t0 });
    engine.handle(viewer::Message::PointerUp);
    engine.handle(viewer::Message::PointerDown {
        position: origin,
        at: t0 + Duration::from_millis(50),
    });

    let later = t0 + Duration::from_secs(1);
    drag(&mut engine, origin, origin + Vector::new(-120.0, 40.0), later);
    drag(
        &mut engine,
        origin,
        origin + Vector::new(30.0, 5.0),
        later + Duration::from_secs(1),
    );

    let transform = engine.transform().expect("viewer is open");
    assert_abs_diff_eq!(transform.offset.x, -90.0, epsilon = 1e-4);
    assert_abs_diff_eq!(transform.offset.y, 45.0, epsilon = 1e-4);
    // A wide pan while zoomed never navigates.
    assert_eq!(engine.current_index(), Some(0));
}

#[test]
fn viewer_keeps_its_snapshot_across_gallery_reloads() {
    let mut gallery = GalleryLoader::new(GalleryOptions::default(), ViewportTracker::new(0.0));
    gallery.reload(refs(100));
    let mut engine = ViewerEngine::new(ViewerOptions::default());

    for effect in gallery.handle(gallery::Message::Activate(5)) {
        if let gallery::Effect::OpenViewer { items, index } = effect {
            engine.open(items, index);
        }
    }
    assert_eq!(engine.current_index(), Some(5));

    gallery.reload(refs(2));
    let effects = engine.handle(viewer::Message::Navigate(1));
    finish_preload(&mut engine, &effects);
    assert_eq!(engine.current_index(), Some(6));
    assert_eq!(
        engine.current_source(),
        Some("http://127.0.0.1:8080/history/image?name=6.png")
    );
}

#[test]
fn transition_is_a_pure_function_of_its_inputs() {
    let options = ViewerOptions::default();
    let (state, effects) = transition(
        ViewerState::default(),
        viewer::Message::Open {
            items: list(&["A", "B"]),
            index: 9,
        },
        &options,
    );
    assert_eq!(state.current_index(), Some(1));
    assert!(effects.contains(&viewer::Effect::Show));

    let (closed, effects) =
        transition(state.clone(), viewer::Message::Key(Named::Escape), &options);
    assert!(!closed.is_open());
    assert!(effects.contains(&viewer::Effect::Hide));
    // The input snapshot is untouched.
    assert!(state.is_open());
}

// =============================================================================
// Config and i18n
// =============================================================================

#[test]
fn config_round_trip_feeds_component_options() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let config = Config {
        general: GeneralConfig {
            language: Some("zh-CN".to_string()),
        },
        gallery: GalleryConfig {
            batch_size: Some(25),
            preload_count: Some(5),
            ..GalleryConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let options = loaded.gallery_options();
    assert_eq!(options.batch_size.value(), 25);
    assert_eq!(options.preload_count.value(), 5);

    let i18n = I18n::new(None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "zh-CN");
    let i18n = I18n::new(Some("en-US".to_string()), &loaded);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn unreadable_config_falls_back_to_defaults_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "gallery = 12")
        .expect("Failed to write config file");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}

// =============================================================================
// Command-line host
// =============================================================================

#[derive(Clone)]
struct FakeBackend {
    history: Result<HistoryPage, SourceError>,
    generated: Vec<ImageRef>,
    payload: Option<serde_json::Value>,
}

impl FakeBackend {
    fn with_history(history: Result<HistoryPage, SourceError>) -> Self {
        Self {
            history,
            generated: Vec::new(),
            payload: None,
        }
    }
}

impl GalleryBackend for FakeBackend {
    async fn history(&self) -> Result<HistoryPage, SourceError> {
        self.history.clone()
    }

    async fn generate(&self, _payload: &serde_json::Value) -> Result<Vec<ImageRef>, SourceError> {
        Ok(self.generated.clone())
    }

    async fn default_payload(&self) -> Result<Option<serde_json::Value>, SourceError> {
        Ok(self.payload.clone())
    }
}

fn app(backend: FakeBackend) -> App<FakeBackend> {
    let config = Config::default();
    let i18n = I18n::new(Some("en-US".to_string()), &config);
    App::new(i18n, &config, None, backend)
}

#[tokio::test]
async fn history_command_plans_the_first_batch() {
    let mut app = app(FakeBackend::with_history(Ok(HistoryPage::enabled(refs(100)))));
    let report = app.execute(&Command::History).await;

    assert!(report.success);
    assert_eq!(report.lines[0], "100 images, 40 rendered, 24 loading now");
    assert_eq!(report.lines.len(), 1 + 24);
    assert_eq!(
        report.lines[1],
        "0: http://127.0.0.1:8080/history/image?name=0.png"
    );
    assert!(report.notifications.is_empty());
    assert_eq!(app.gallery().rendered_count(), 40);
}

#[tokio::test]
async fn history_failures_become_notifications() {
    let mut app = app(FakeBackend::with_history(Err(SourceError::Unreachable(
        "connection refused".to_string(),
    ))));
    let report = app.execute(&Command::History).await;

    assert!(!report.success);
    assert_eq!(report.notifications, vec!["Error: Could not reach the server"]);
}

#[tokio::test]
async fn disabled_history_leaves_gallery_untouched() {
    let mut app = app(FakeBackend::with_history(Ok(HistoryPage::disabled(
        "no output directory",
    ))));
    let report = app.execute(&Command::History).await;

    assert!(report.success);
    assert_eq!(report.lines, vec!["Server reported: no output directory"]);
    assert_eq!(
        report.notifications,
        vec!["Info: History is disabled on the server"]
    );
    assert!(app.gallery().items().is_empty());
}

#[tokio::test]
async fn generate_command_opens_results_in_viewer() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("payload.json");
    std::fs::write(&path, r#"{"prompt": "a lighthouse"}"#).expect("Failed to write payload");

    let mut backend = FakeBackend::with_history(Ok(HistoryPage::enabled(refs(3))));
    backend.generated = normalize_generated(["iVBORw0KGgo", "data:image/png;base64,AAAA"]);
    let mut app = app(backend);
    let report = app.execute(&Command::Generate(path)).await;

    assert!(report.success);
    assert_eq!(
        report.lines[..2],
        [
            "0: data:image/png;base64,iVBORw0KGgo",
            "1: data:image/png;base64,AAAA",
        ]
    );
    assert_eq!(app.viewer().current_index(), Some(0));

    // The history is fetched again once results arrive.
    assert_eq!(report.lines[2], "3 images, 3 rendered, 3 loading now");
    assert_eq!(report.lines.len(), 2 + 1 + 3);
    assert_eq!(app.gallery().items().len(), 3);
    assert_eq!(report.notifications, vec!["Success: Generated 2 images"]);
}

#[tokio::test]
async fn viewer_edges_become_notifications() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("payload.json");
    std::fs::write(&path, r#"{"prompt": "a lighthouse"}"#).expect("Failed to write payload");

    let mut backend = FakeBackend::with_history(Ok(HistoryPage::default()));
    backend.generated = normalize_generated(["iVBORw0KGgo", "data:image/png;base64,AAAA"]);
    let mut app = app(backend);
    assert!(app.execute(&Command::Generate(path)).await.success);

    app.handle_viewer(viewer::Message::Navigate(-1));
    assert_eq!(app.viewer().current_index(), Some(0));
    assert_eq!(
        app.notifications().render(app.i18n())[0],
        "Info: This is the first image"
    );

    // Moving away from the edge stays quiet.
    let shown = app.notifications().render(app.i18n()).len();
    app.handle_viewer(viewer::Message::Navigate(1));
    assert_eq!(app.notifications().render(app.i18n()).len(), shown);
}

#[tokio::test]
async fn generate_rejects_empty_payload() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("payload.json");
    std::fs::write(&path, "   \n").expect("Failed to write payload");

    let mut app = app(FakeBackend::with_history(Ok(HistoryPage::default())));
    let report = app.execute(&Command::Generate(path)).await;

    assert!(!report.success);
    assert_eq!(report.notifications, vec!["Error: The payload is empty"]);
    assert!(!app.viewer().is_open());
}

#[tokio::test]
async fn format_and_payload_commands_print_json() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("payload.json");
    std::fs::write(&path, r#"{"steps":20}"#).expect("Failed to write payload");

    let mut backend = FakeBackend::with_history(Ok(HistoryPage::default()));
    backend.payload = Some(serde_json::json!({ "seed": 7 }));
    let mut app = app(backend);

    let report = app.execute(&Command::Format(path)).await;
    assert_eq!(report.lines, vec!["{\n  \"steps\": 20\n}"]);

    let report = app.execute(&Command::Payload).await;
    assert!(report.success);
    assert_eq!(report.lines, vec!["{\n  \"seed\": 7\n}"]);
}

#[tokio::test]
async fn commands_expire_stale_notifications() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("payload.json");
    std::fs::write(&path, r#"{"steps":20}"#).expect("Failed to write payload");

    let mut app = app(FakeBackend::with_history(Ok(HistoryPage::default())));
    app.push_notification(
        Notification::new(Severity::Info, "notification-nav-first").auto_dismiss(Duration::ZERO),
    );
    app.push_notification(Notification::new(Severity::Error, "notification-nav-last"));

    let report = app.execute(&Command::Format(path)).await;
    assert!(report.success);
    assert_eq!(report.notifications.len(), 2);
    assert!(report
        .notifications
        .iter()
        .all(|text| text != "Info: This is the first image"));
    assert!(report
        .notifications
        .contains(&"Error: This is the last image".to_string()));
}
