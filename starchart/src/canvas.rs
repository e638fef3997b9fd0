//! Drawing surface abstraction.
//!
//! The engine only ever clears, sets a fill, draws circles and draws text.
//! Hosts implement [`Canvas`] on top of whatever they render with.

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bounds are inclusive on all four edges.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    /// Gray level 0-255 with alpha 0-255.
    Gray { level: f64, alpha: f64 },
    /// Hue in degrees, saturation and brightness 0-100.
    Hsb {
        hue: f64,
        saturation: f64,
        brightness: f64,
    },
}

impl Fill {
    pub fn gray(level: f64) -> Self {
        Fill::Gray { level, alpha: 255.0 }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        match *self {
            Fill::Gray { level, alpha } => {
                let level = to_channel(level);
                [level, level, level, to_channel(alpha)]
            }
            Fill::Hsb {
                hue,
                saturation,
                brightness,
            } => {
                let [r, g, b] = hsb_to_rgb(hue, saturation, brightness);
                [r, g, b, 255]
            }
        }
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> [u8; 3] {
    let hue = hue.rem_euclid(360.0) / 60.0;
    let saturation = (saturation / 100.0).clamp(0.0, 1.0);
    let value = (brightness / 100.0).clamp(0.0, 1.0);

    let chroma = value * saturation;
    let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
    let (r, g, b) = match hue as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;

    [
        to_channel((r + m) * 255.0),
        to_channel((g + m) * 255.0),
        to_channel((b + m) * 255.0),
    ]
}

pub trait Canvas {
    fn clear(&mut self);
    fn set_fill(&mut self, fill: Fill);
    fn draw_circle(&mut self, center: DVec2, diameter: f64);
    fn draw_text(&mut self, text: &str, position: DVec2);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: DVec2,
        diameter: f64,
        fill: Fill,
    },
    Text {
        text: String,
        position: DVec2,
        fill: Fill,
    },
}

/// Canvas that keeps the draw calls of the current frame.
///
/// `clear` drops everything recorded so far, so after a frame the command list
/// holds exactly what that frame drew.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: CanvasSize,
    fill: Fill,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            fill: Fill::gray(255.0),
            commands: Vec::new(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64, Fill)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle {
                center,
                diameter,
                fill,
            } => Some((*center, *diameter, *fill)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    fn draw_circle(&mut self, center: DVec2, diameter: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            diameter,
            fill: self.fill,
        });
    }

    fn draw_text(&mut self, text: &str, position: DVec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            fill: self.fill,
        });
    }
}
