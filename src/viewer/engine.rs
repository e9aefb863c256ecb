// SPDX-License-Identifier: MPL-2.0
//! Stateful wrapper around [`transition`](super::state::transition).

use super::options::ViewerOptions;
use super::state::{Effect, Message, Transform, ViewerState};
use crate::domain::media::ImageList;

/// Owns a [`ViewerState`] and its options.
#[derive(Debug, Clone, Default)]
pub struct ViewerEngine {
    options: ViewerOptions,
    state: ViewerState,
}

impl ViewerEngine {
    #[must_use]
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            options,
            state: ViewerState::default(),
        }
    }

    /// Handles a viewer message, returning the effects to apply.
    pub fn handle(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.state.apply(message, &self.options, &mut effects);
        effects
    }

    /// Shorthand for [`Message::Open`].
    pub fn open(&mut self, items: ImageList, index: usize) -> Vec<Effect> {
        self.handle(Message::Open { items, index })
    }

    /// Shorthand for [`Message::Close`].
    pub fn close(&mut self) -> Vec<Effect> {
        self.handle(Message::Close)
    }

    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    /// Current transform, `None` while closed.
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.state.transform(&self.options)
    }

    /// URL of the presented image.
    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        let session = self.state.session()?;
        session.items.get(session.index)?.url()
    }
}
