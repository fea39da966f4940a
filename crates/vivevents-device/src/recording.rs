use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::provider::DeviceProvider;
use crate::sample::{ButtonEdges, ControllerSample};
use crate::types::{Control, DeviceIndex, Hand, Pose, Vec2};
use crate::ControlMask;

const DEFAULT_TICK_MS: u64 = 11;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported recording version: {0}")]
    UnsupportedVersion(u8),
    #[error("tick_ms must be greater than zero")]
    InvalidTickRate,
}

/// A captured session: controller levels for every fixed tick.
#[derive(Debug, Clone, Deserialize)]
pub struct Recording {
    version: u8,
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
    #[serde(default)]
    pub frames: Vec<RecordedFrame>,
}

/// One tick of a recording. A missing hand is disconnected for that tick.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub left: Option<RecordedHand>,
    #[serde(default)]
    pub right: Option<RecordedHand>,
}

impl RecordedFrame {
    pub fn hand(&self, hand: Hand) -> Option<&RecordedHand> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }
}

/// Level state of one controller as captured.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordedHand {
    #[serde(default)]
    pub device: DeviceIndex,
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
    #[serde(default)]
    pub trigger: f32,
    #[serde(default)]
    pub touchpad: Vec2,
    #[serde(default)]
    pub touched: Vec<Control>,
    #[serde(default)]
    pub pressed: Vec<Control>,
}

impl RecordedHand {
    fn pose(&self) -> Pose {
        Pose {
            position: self.position.unwrap_or(Pose::IDENTITY.position),
            rotation: self.rotation.unwrap_or(Pose::IDENTITY.rotation),
        }
    }
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

#[derive(Deserialize)]
struct VersionedRecording {
    version: u8,
}

impl Recording {
    pub fn from_yaml_str(input: &str) -> Result<Self, RecordingError> {
        let versioned: VersionedRecording = serde_yaml::from_str(input)?;
        if versioned.version != 1 {
            return Err(RecordingError::UnsupportedVersion(versioned.version));
        }
        let recording: Recording = serde_yaml::from_str(input)?;
        if recording.tick_ms == 0 {
            return Err(RecordingError::InvalidTickRate);
        }
        Ok(recording)
    }

    pub fn from_path(path: &Path) -> Result<Self, RecordingError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Fixed time step between frames.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Levels {
    touched: ControlMask,
    pressed: ControlMask,
}

/// Replays a [`Recording`], deriving button edges from consecutive levels.
#[derive(Debug)]
pub struct RecordingProvider {
    frames: Vec<RecordedFrame>,
    cursor: Option<usize>,
    levels: [Levels; 2],
}

impl RecordingProvider {
    pub fn new(recording: Recording) -> Self {
        Self::from_frames(recording.frames)
    }

    pub fn from_frames(frames: Vec<RecordedFrame>) -> Self {
        Self {
            frames,
            cursor: None,
            levels: [Levels::default(); 2],
        }
    }

    /// Number of frames not yet replayed.
    pub fn remaining(&self) -> usize {
        let consumed = self.cursor.map_or(0, |c| c + 1);
        self.frames.len().saturating_sub(consumed)
    }

    fn current(&self) -> Option<&RecordedFrame> {
        self.cursor.and_then(|c| self.frames.get(c))
    }
}

impl DeviceProvider for RecordingProvider {
    fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next.min(self.frames.len()));
        next < self.frames.len()
    }

    fn sample(&mut self, hand: Hand) -> Option<ControllerSample> {
        let slot = hand.index();
        let Some(entry) = self.current().and_then(|f| f.hand(hand)).cloned() else {
            // Disconnected: a reconnect starts from released levels.
            self.levels[slot] = Levels::default();
            return None;
        };

        let touched: ControlMask = entry.touched.iter().copied().collect();
        let pressed: ControlMask = entry.pressed.iter().copied().collect();
        let previous = self.levels[slot];
        self.levels[slot] = Levels { touched, pressed };

        let sample = ControllerSample::new(hand, entry.device)
            .with_pose(entry.pose())
            .with_trigger(entry.trigger)
            .with_touchpad(entry.touchpad)
            .with_touch(ButtonEdges::from_levels(previous.touched, touched))
            .with_press(ButtonEdges::from_levels(previous.pressed, pressed));
        Some(sample)
    }
}
