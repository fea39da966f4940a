use std::time::Duration;

pub(crate) const DEFAULT_CLICK_TIME: Duration = Duration::from_millis(300);
pub(crate) const DEFAULT_SWIPE_TIME: Duration = Duration::from_millis(500);
pub(crate) const DEFAULT_SWIPE_DISTANCE: f32 = 0.5;

/// Time and distance windows used to tell clicks from holds and swipes
/// from taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// A release sooner than this after the press counts as a click or tap.
    pub click_time: Duration,
    /// A touch must end within this window to count as a swipe.
    pub swipe_time: Duration,
    /// Minimum displacement along the dominant touchpad axis for a swipe.
    pub swipe_distance: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            click_time: DEFAULT_CLICK_TIME,
            swipe_time: DEFAULT_SWIPE_TIME,
            swipe_distance: DEFAULT_SWIPE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Profile {
    pub thresholds: Thresholds,
    /// Log every fired event.
    pub trace: bool,
}
