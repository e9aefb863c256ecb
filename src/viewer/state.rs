// SPDX-License-Identifier: MPL-2.0
//! Viewer state and its transition function.
//!
//! The viewer is either closed or presenting one image of a snapshot list.
//! An open session crosses a zoom level (`Fit` / `Zoomed`) with a gesture
//! (`Idle` / `Dragging`), so a drag can only exist while the viewer is open.
//!
//! [`transition`] never performs I/O: rendering, preloading, timers and
//! pointer capture are described by [`Effect`]s that the host applies.

use super::gesture::{self, Drag, ReleaseIntent};
use super::options::ViewerOptions;
use crate::config::defaults::{
    BOUNCE_AMPLITUDE, BOUNCE_DURATION_MS, NAVIGATION_FADE_MS, NAVIGATION_FADE_OPACITY,
};
use crate::domain::media::ImageList;
use iced_core::keyboard::key::Named;
use iced_core::{Point, Vector};
use std::time::{Duration, Instant};

/// End of the list reached by a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

impl Edge {
    /// Direction of the rejected step: `-1` before the first item, `+1`
    /// past the last.
    #[must_use]
    pub fn direction(self) -> i32 {
        match self {
            Edge::First => -1,
            Edge::Last => 1,
        }
    }

    /// Notification key for "first / last item" feedback.
    #[must_use]
    pub fn notification_key(self) -> &'static str {
        match self {
            Edge::First => "notification-nav-first",
            Edge::Last => "notification-nav-last",
        }
    }
}

/// Visibility of the prev / next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAffordance {
    /// Hidden entirely for lists of one item.
    pub visible: bool,
    pub prev_dimmed: bool,
    pub next_dimmed: bool,
}

impl NavAffordance {
    fn for_position(index: usize, len: usize) -> Self {
        Self {
            visible: len > 1,
            prev_dimmed: index == 0,
            next_dimmed: index + 1 >= len,
        }
    }
}

/// Rendered image transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset: Vector,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        offset: Vector::ZERO,
        scale: 1.0,
    };
}

/// Result of an off-screen image preload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded,
    Failed,
}

/// Zoom level of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zoom {
    /// Scale 1, drags are rubber-banded.
    #[default]
    Fit,
    /// Scale `max_scale`, drags pan 1:1.
    Zoomed,
}

/// Pointer gesture of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(Drag),
}

/// A navigation waiting for its preload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNavigation {
    pub token: u64,
    pub target: usize,
}

/// State of an open viewer.
#[derive(Debug, Clone)]
pub struct Session {
    /// Snapshot handed over at open time.
    pub items: ImageList,
    pub index: usize,
    pub zoom: Zoom,
    pub offset: Vector,
    pub gesture: Gesture,
    pub last_tap: Option<Instant>,
    pub pending_navigation: Option<PendingNavigation>,
    /// A `RequestFrame` is outstanding.
    frame_pending: bool,
}

impl Session {
    fn new(items: ImageList, index: usize) -> Self {
        Self {
            items,
            index,
            zoom: Zoom::Fit,
            offset: Vector::ZERO,
            gesture: Gesture::Idle,
            last_tap: None,
            pending_navigation: None,
            frame_pending: false,
        }
    }

    fn scale(&self, options: &ViewerOptions) -> f32 {
        match self.zoom {
            Zoom::Fit => 1.0,
            Zoom::Zoomed => options.max_scale.value(),
        }
    }

    fn transform(&self, options: &ViewerOptions) -> Transform {
        Transform {
            offset: self.offset,
            scale: self.scale(options),
        }
    }

    fn source(&self, index: usize) -> Option<String> {
        self.items
            .get(index)
            .and_then(|item| item.url())
            .map(str::to_owned)
    }

    fn affordance(&self) -> NavAffordance {
        NavAffordance::for_position(self.index, self.items.len())
    }
}

/// Open or closed.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open(Session),
}

/// Complete viewer state, including the token counters that outlive a
/// session.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub phase: Phase,
    /// Last token handed to a navigation preload.
    nav_token: u64,
    /// Token of the most recent close grace timer.
    close_token: u64,
}

impl ViewerState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Open(session) => Some(session),
            Phase::Closed => None,
        }
    }

    /// Index of the shown image, `None` while closed.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.session().map(|session| session.index)
    }

    #[must_use]
    pub fn transform(&self, options: &ViewerOptions) -> Option<Transform> {
        self.session().map(|session| session.transform(options))
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session()
            .is_some_and(|session| matches!(session.gesture, Gesture::Dragging(_)))
    }
}

/// Viewer input.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show `items[index]`. The index is clamped, an empty list is ignored.
    Open { items: ImageList, index: usize },
    Close,
    /// Click on the dimmed area around the image.
    BackdropClicked,
    PointerDown { position: Point, at: Instant },
    PointerMove { position: Point },
    PointerUp,
    PointerCancel,
    Key(Named),
    /// Step through the list, `-1` or `+1`.
    Navigate(i32),
    /// Zoom in or back out. The position is accepted but zoom stays centered.
    ToggleZoom { position: Point },
    /// Answer to [`Effect::Preload`].
    PreloadFinished { token: u64, outcome: PreloadOutcome },
    /// Animation frame granted after [`Effect::RequestFrame`].
    Frame,
    /// Answer to [`Effect::ClearSourceAfter`].
    CloseGraceElapsed { token: u64 },
}

/// Work for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Show,
    Hide,
    /// Assign the presented image source. `None` shows an unloaded image.
    SetSource(Option<String>),
    ClearSource,
    /// Answer with [`Message::CloseGraceElapsed`] after `delay`.
    ClearSourceAfter { delay: Duration, token: u64 },
    /// Answer with [`Message::Frame`] on the next animation frame.
    RequestFrame,
    Render(Transform),
    /// Enable or disable transform animation.
    SetTransition(bool),
    SetBackdropOpacity(f32),
    /// Drop any backdrop opacity override.
    ClearBackdrop,
    CapturePointer,
    FadeImage { opacity: f32, duration: Duration },
    /// Load `url` off-screen; answer with [`Message::PreloadFinished`].
    Preload { token: u64, url: String },
    /// Horizontal shake.
    Bounce { amplitude: f32, duration: Duration },
    /// Navigation past either end was attempted.
    ReachedEdge(Edge),
    NavButtons(NavAffordance),
}

/// Applies `message` to `state`.
#[must_use]
pub fn transition(
    mut state: ViewerState,
    message: Message,
    options: &ViewerOptions,
) -> (ViewerState, Vec<Effect>) {
    let mut effects = Vec::new();
    state.apply(message, options, &mut effects);
    (state, effects)
}

impl ViewerState {
    pub(crate) fn apply(
        &mut self,
        message: Message,
        options: &ViewerOptions,
        effects: &mut Vec<Effect>,
    ) {
        match message {
            Message::Open { items, index } => self.open(items, index, effects),
            Message::Close | Message::BackdropClicked | Message::Key(Named::Escape) => {
                self.close(options, effects);
            }
            Message::Key(Named::ArrowLeft) => self.navigate(-1, options, effects),
            Message::Key(Named::ArrowRight) => self.navigate(1, options, effects),
            Message::Key(_) => {}
            Message::PointerDown { position, at } => {
                self.pointer_down(position, at, options, effects);
            }
            Message::PointerMove { position } => self.pointer_move(position, options, effects),
            Message::PointerUp | Message::PointerCancel => self.pointer_up(options, effects),
            Message::Navigate(direction) => self.navigate(direction, options, effects),
            Message::ToggleZoom { .. } => {
                if let Phase::Open(session) = &mut self.phase {
                    toggle_zoom(session, options, effects);
                }
            }
            Message::PreloadFinished { token, outcome } => {
                self.preload_finished(token, outcome, effects);
            }
            Message::Frame => {
                if let Phase::Open(session) = &mut self.phase {
                    if session.frame_pending {
                        session.frame_pending = false;
                        effects.push(Effect::Render(session.transform(options)));
                    }
                }
            }
            Message::CloseGraceElapsed { token } => {
                if !self.is_open() && token == self.close_token {
                    effects.push(Effect::ClearSource);
                }
            }
        }
    }

    fn open(&mut self, items: ImageList, index: usize, effects: &mut Vec<Effect>) {
        if items.is_empty() {
            log::warn!("ignoring viewer open with an empty list");
            return;
        }
        let index = index.min(items.len() - 1);
        let session = Session::new(items, index);

        // Invalidate a pending source clear and any in-flight preload.
        self.close_token += 1;
        self.nav_token += 1;

        effects.push(Effect::Show);
        effects.push(Effect::SetTransition(false));
        effects.push(Effect::Render(Transform::IDENTITY));
        effects.push(Effect::ClearBackdrop);
        effects.push(Effect::SetSource(session.source(index)));
        effects.push(Effect::FadeImage {
            opacity: 1.0,
            duration: Duration::ZERO,
        });
        effects.push(Effect::NavButtons(session.affordance()));
        self.phase = Phase::Open(session);
    }

    fn close(&mut self, options: &ViewerOptions, effects: &mut Vec<Effect>) {
        if !self.is_open() {
            return;
        }
        self.phase = Phase::Closed;
        self.close_token += 1;
        self.nav_token += 1;

        effects.push(Effect::Hide);
        effects.push(Effect::ClearBackdrop);
        effects.push(Effect::ClearSourceAfter {
            delay: options.close_grace,
            token: self.close_token,
        });
    }

    fn pointer_down(
        &mut self,
        position: Point,
        at: Instant,
        options: &ViewerOptions,
        effects: &mut Vec<Effect>,
    ) {
        let Phase::Open(session) = &mut self.phase else {
            return;
        };

        let double_tap = session
            .last_tap
            .is_some_and(|last| at.saturating_duration_since(last) < options.double_tap_delay);
        if double_tap {
            // Consumed, so a third tap starts over.
            session.last_tap = None;
            toggle_zoom(session, options, effects);
            return;
        }

        session.last_tap = Some(at);
        session.gesture = Gesture::Dragging(Drag::new(position, session.offset));
        effects.push(Effect::CapturePointer);
        effects.push(Effect::SetTransition(false));
    }

    fn pointer_move(&mut self, position: Point, options: &ViewerOptions, effects: &mut Vec<Effect>) {
        let Phase::Open(session) = &mut self.phase else {
            return;
        };
        let Gesture::Dragging(drag) = session.gesture else {
            return;
        };

        match session.zoom {
            Zoom::Zoomed => session.offset = drag.panned_offset(position),
            Zoom::Fit => {
                let delta = drag.delta(position);
                session.offset = gesture::rubber_band(delta, options.resistance.value());
                if delta.y > 0.0 {
                    effects.push(Effect::SetBackdropOpacity(gesture::backdrop_opacity(
                        delta.y,
                        options.dismiss_fade_distance,
                    )));
                }
            }
        }

        if !session.frame_pending {
            session.frame_pending = true;
            effects.push(Effect::RequestFrame);
        }
    }

    fn pointer_up(&mut self, options: &ViewerOptions, effects: &mut Vec<Effect>) {
        let Phase::Open(session) = &mut self.phase else {
            return;
        };
        if !matches!(session.gesture, Gesture::Dragging(_)) {
            return;
        }
        session.gesture = Gesture::Idle;
        effects.push(Effect::SetTransition(true));

        if session.zoom == Zoom::Zoomed {
            return;
        }

        let travel = gesture::unscaled(session.offset, options.resistance.value());
        match gesture::release_intent(travel, options) {
            ReleaseIntent::Close => self.close(options, effects),
            ReleaseIntent::Navigate(direction) => self.navigate(direction, options, effects),
            ReleaseIntent::SnapBack => {
                reset_transform(session, effects);
                effects.push(Effect::ClearBackdrop);
            }
        }
    }

    fn navigate(&mut self, direction: i32, options: &ViewerOptions, effects: &mut Vec<Effect>) {
        let Phase::Open(session) = &mut self.phase else {
            return;
        };
        if direction == 0 {
            return;
        }

        let target = session
            .index
            .checked_add_signed(direction as isize)
            .filter(|&target| target < session.items.len());

        let Some(target) = target else {
            let edge = if direction < 0 { Edge::First } else { Edge::Last };
            log::debug!("navigation stopped at {edge:?}");
            effects.push(Effect::Bounce {
                amplitude: BOUNCE_AMPLITUDE,
                duration: Duration::from_millis(BOUNCE_DURATION_MS),
            });
            reset_transform(session, effects);
            effects.push(Effect::ClearBackdrop);
            effects.push(Effect::ReachedEdge(edge));
            return;
        };

        self.nav_token += 1;
        let token = self.nav_token;
        session.pending_navigation = Some(PendingNavigation { token, target });

        effects.push(Effect::FadeImage {
            opacity: NAVIGATION_FADE_OPACITY,
            duration: Duration::from_millis(NAVIGATION_FADE_MS),
        });
        match session.source(target) {
            Some(url) => effects.push(Effect::Preload { token, url }),
            None => {
                log::warn!("viewer item {target} has no usable url");
                self.preload_finished(token, PreloadOutcome::Failed, effects);
            }
        }
    }

    fn preload_finished(&mut self, token: u64, outcome: PreloadOutcome, effects: &mut Vec<Effect>) {
        let Phase::Open(session) = &mut self.phase else {
            return;
        };
        let Some(pending) = session.pending_navigation.filter(|p| p.token == token) else {
            log::debug!("dropping stale preload {token}");
            return;
        };
        if outcome == PreloadOutcome::Failed {
            log::warn!("preload of viewer item {} failed", pending.target);
        }

        session.pending_navigation = None;
        session.index = pending.target;
        effects.push(Effect::SetSource(session.source(pending.target)));
        effects.push(Effect::NavButtons(session.affordance()));
        reset_transform(session, effects);
        effects.push(Effect::ClearBackdrop);
        effects.push(Effect::FadeImage {
            opacity: 1.0,
            duration: Duration::from_millis(NAVIGATION_FADE_MS),
        });
    }
}

/// Back to scale 1 at the origin.
fn reset_transform(session: &mut Session, effects: &mut Vec<Effect>) {
    session.zoom = Zoom::Fit;
    session.offset = Vector::ZERO;
    session.frame_pending = false;
    effects.push(Effect::Render(Transform::IDENTITY));
}

/// Double-tap: Fit zooms in centered, Zoomed resets like a snap-back.
fn toggle_zoom(session: &mut Session, options: &ViewerOptions, effects: &mut Vec<Effect>) {
    session.gesture = Gesture::Idle;
    effects.push(Effect::SetTransition(true));
    match session.zoom {
        Zoom::Fit => {
            session.zoom = Zoom::Zoomed;
            session.offset = Vector::ZERO;
            session.frame_pending = false;
            effects.push(Effect::Render(session.transform(options)));
        }
        Zoom::Zoomed => {
            reset_transform(session, effects);
            effects.push(Effect::ClearBackdrop);
        }
    }
}
