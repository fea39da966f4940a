mod provider;
mod recording;
mod sample;
mod types;

pub use crate::provider::DeviceProvider;
pub use crate::recording::{
    RecordedFrame, RecordedHand, Recording, RecordingError, RecordingProvider,
};
pub use crate::sample::{ButtonEdges, ControllerSample};
pub use crate::types::{Control, DeviceIndex, Hand, Pose, Vec2};

/// Per-control button levels of one hand.
pub type ControlMask = vivevents_bit_mask::Bitmask<Control>;
