use std::fmt;

use vivevents_bit_derive::Bit;
use vivevents_device::{DeviceIndex, Hand, Pose, Vec2};

/// Every semantic event the classifier can raise.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TriggerPressStart,
    TriggerPress,
    TriggerPressEnd,
    TriggerClick,
    GripPressStart,
    GripPress,
    GripPressEnd,
    GripClick,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchTap,
    TouchSwipe,
    TouchpadPressStart,
    TouchpadPress,
    TouchpadPressEnd,
    TouchpadClick,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::TriggerPressStart => "trigger press start",
            EventKind::TriggerPress => "trigger press",
            EventKind::TriggerPressEnd => "trigger press end",
            EventKind::TriggerClick => "trigger click",
            EventKind::GripPressStart => "grip press start",
            EventKind::GripPress => "grip press",
            EventKind::GripPressEnd => "grip press end",
            EventKind::GripClick => "grip click",
            EventKind::TouchStart => "touch start",
            EventKind::TouchMove => "touch move",
            EventKind::TouchEnd => "touch end",
            EventKind::TouchTap => "touch tap",
            EventKind::TouchSwipe => "touch swipe",
            EventKind::TouchpadPressStart => "touchpad press start",
            EventKind::TouchpadPress => "touchpad press",
            EventKind::TouchpadPressEnd => "touchpad press end",
            EventKind::TouchpadClick => "touchpad click",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a touchpad swipe along its dominant axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
}

impl SwipeDirection {
    /// Classify a touch displacement. The axis with the larger magnitude wins,
    /// ties go to Y, and the winner must exceed `min_distance`. A NaN axis is
    /// never a swipe.
    pub fn from_delta(delta: Vec2, min_distance: f32) -> Option<Self> {
        if delta.x.is_nan() || delta.y.is_nan() {
            return None;
        }
        if delta.x.abs() > delta.y.abs() {
            if delta.x.abs() <= min_distance {
                return None;
            }
            Some(if delta.x > 0.0 {
                SwipeDirection::PositiveX
            } else {
                SwipeDirection::NegativeX
            })
        } else {
            if delta.y.abs() <= min_distance {
                return None;
            }
            Some(if delta.y > 0.0 {
                SwipeDirection::PositiveY
            } else {
                SwipeDirection::NegativeY
            })
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::PositiveX => "+X",
            SwipeDirection::NegativeX => "-X",
            SwipeDirection::PositiveY => "+Y",
            SwipeDirection::NegativeY => "-Y",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerEvent {
    pub kind: EventKind,
    pub hand: Hand,
    pub device: DeviceIndex,
    pub pose: Pose,
    /// Trigger pressure at the time of the event.
    pub pressure: f32,
    /// Whether the trigger counted as clicked when the tick began.
    pub trigger_clicked: bool,
    pub touch_point: Vec2,
    /// Set only for [`EventKind::TouchSwipe`].
    pub swipe: Option<SwipeDirection>,
}

impl fmt::Display for ControllerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hand, self.kind)?;
        if let Some(direction) = self.swipe {
            write!(f, " {direction}")?;
        }
        Ok(())
    }
}
