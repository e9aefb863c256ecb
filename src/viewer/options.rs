// SPDX-License-Identifier: MPL-2.0
//! Construction-time tuning for the viewer.

use crate::config::defaults::{
    DEFAULT_CLOSE_GRACE_MS, DEFAULT_CLOSE_THRESHOLD, DEFAULT_DISMISS_FADE_DISTANCE,
    DEFAULT_DOUBLE_TAP_DELAY_MS, DEFAULT_SWIPE_THRESHOLD,
};
use crate::domain::ui::{MaxScale, Resistance};
use std::time::Duration;

/// Gesture thresholds and timing. Build from [`crate::config::Config`] or
/// use the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerOptions {
    /// Two pointer-downs closer than this are a double tap.
    pub double_tap_delay: Duration,
    /// Scale applied when zoomed in.
    pub max_scale: MaxScale,
    /// Undamped horizontal travel that triggers navigation.
    pub swipe_threshold: f32,
    /// Undamped downward travel that dismisses the viewer.
    pub close_threshold: f32,
    /// Rubber-band factor for drags at scale 1.
    pub resistance: Resistance,
    /// Downward travel over which the backdrop fades to zero.
    pub dismiss_fade_distance: f32,
    /// Delay between closing and blanking the image source.
    pub close_grace: Duration,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            double_tap_delay: Duration::from_millis(DEFAULT_DOUBLE_TAP_DELAY_MS),
            max_scale: MaxScale::default(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            resistance: Resistance::default(),
            dismiss_fade_distance: DEFAULT_DISMISS_FADE_DISTANCE,
            close_grace: Duration::from_millis(DEFAULT_CLOSE_GRACE_MS),
        }
    }
}
