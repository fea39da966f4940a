use crate::types::{Control, DeviceIndex, Hand, Pose, Vec2};
use crate::ControlMask;

/// Edge view of one kind of button signal (touch or press) for a hand.
///
/// `held` includes the frame on which the control went down, and a control
/// that was released this frame is in `up` but not in `held`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEdges {
    pub down: ControlMask,
    pub held: ControlMask,
    pub up: ControlMask,
}

impl ButtonEdges {
    /// No control touched or pressed.
    pub const fn idle() -> Self {
        Self {
            down: ControlMask::empty(),
            held: ControlMask::empty(),
            up: ControlMask::empty(),
        }
    }

    /// Derive edges from the levels seen on the previous and current poll.
    pub fn from_levels(previous: ControlMask, current: ControlMask) -> Self {
        Self {
            down: current.newly_set(&previous),
            held: current,
            up: current.newly_cleared(&previous),
        }
    }

    #[inline]
    pub fn is_down(&self, control: Control) -> bool {
        self.down.contains(control)
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(control)
    }

    #[inline]
    pub fn is_up(&self, control: Control) -> bool {
        self.up.contains(control)
    }
}

/// Immutable snapshot of one hand controller for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSample {
    pub hand: Hand,
    pub device: DeviceIndex,
    pub pose: Pose,
    /// Trigger pressure in `[0, 1]`.
    pub trigger: f32,
    pub touchpad: Vec2,
    pub touch: ButtonEdges,
    pub press: ButtonEdges,
}

impl ControllerSample {
    /// A connected controller with nothing touched or pressed.
    pub fn new(hand: Hand, device: DeviceIndex) -> Self {
        Self {
            hand,
            device,
            pose: Pose::IDENTITY,
            trigger: 0.0,
            touchpad: Vec2::ZERO,
            touch: ButtonEdges::idle(),
            press: ButtonEdges::idle(),
        }
    }

    #[must_use]
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Set the trigger pressure, clamped to `[0, 1]`. NaN reads as released.
    #[must_use]
    pub fn with_trigger(mut self, pressure: f32) -> Self {
        self.trigger = if pressure.is_nan() {
            0.0
        } else {
            pressure.clamp(0.0, 1.0)
        };
        self
    }

    #[must_use]
    pub fn with_touchpad(mut self, point: Vec2) -> Self {
        self.touchpad = point;
        self
    }

    #[must_use]
    pub fn with_touch(mut self, edges: ButtonEdges) -> Self {
        self.touch = edges;
        self
    }

    #[must_use]
    pub fn with_press(mut self, edges: ButtonEdges) -> Self {
        self.press = edges;
        self
    }
}
