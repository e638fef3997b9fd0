use glam::DVec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_MAGNITUDE: f64 = 6.0;
/// Brightest magnitude ever shown. Not adjustable.
pub const MAX_MAGNITUDE: f64 = -2.0;
pub const DEFAULT_SCALE_FACTOR: f64 = 0.2;
pub const DEFAULT_ROTATION_SPEED: f64 = 0.0025;

/// View parameters for one frame.
///
/// Input handlers mutate the chart's copy between frames; the frame itself
/// works on a snapshot, so nothing a handler does can change a frame halfway.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub zoom: u32,
    /// Faintest magnitude shown (numerically largest).
    pub min_magnitude: f64,
    #[serde(skip)]
    pub max_magnitude: f64,
    pub scale_factor: f64,
    pub color_enabled: bool,
    pub rotation_enabled: bool,
    /// Hours of right ascension per frame, before the per-frame divisor.
    pub rotation_speed: f64,
    #[serde(skip)]
    pub pan_offset: DVec2,
    #[serde(skip)]
    pub pointer: DVec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            max_magnitude: MAX_MAGNITUDE,
            scale_factor: DEFAULT_SCALE_FACTOR,
            color_enabled: false,
            rotation_enabled: false,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            pan_offset: DVec2::ZERO,
            pointer: DVec2::ZERO,
        }
    }
}

impl ViewState {
    /// Amount each star rotates during one frame.
    pub fn rotation_step(&self) -> f64 {
        self.rotation_speed / 10.0
    }

    /// One wheel notch. Positive deltas zoom in, anything else zooms out.
    pub fn apply_wheel(&mut self, delta: f64) {
        self.zoom = if delta > 0.0 {
            zoom_in(self.zoom)
        } else {
            zoom_out(self.zoom)
        };
    }
}

fn zoom_step(zoom: u32) -> u32 {
    (1.0 + f64::from(zoom) / 10.0).round() as u32
}

pub fn zoom_in(zoom: u32) -> u32 {
    zoom.saturating_add(zoom_step(zoom))
}

pub fn zoom_out(zoom: u32) -> u32 {
    if zoom > 1 {
        zoom.saturating_sub(zoom_step(zoom)).max(1)
    } else {
        zoom
    }
}

/// What a rotating star does with the pan offset of the current drag.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RotationPanPolicy {
    /// Rotated positions leave the pan out. The offset is kept and shows up
    /// again once rotation stops.
    #[default]
    DropPan,
    KeepPan,
}
