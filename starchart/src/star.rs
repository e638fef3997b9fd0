//! Per-star state: the catalog record plus its current on-screen placement.

use glam::DVec2;

use crate::canvas::{Canvas, CanvasSize, Fill};
use crate::catalog::{CatalogRecord, StarId};
use crate::projection::{
    brightness_scale, gray_level, hsb_brightness, in_magnitude_window, magnitude_norm,
    radial_distance, screen_position, star_size, zoom_log,
};
use crate::spectral::SpectralColor;
use crate::view::{RotationPanPolicy, ViewState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: DVec2,
    pub size: f64,
}

#[derive(Clone, Debug)]
pub struct StarEntity {
    record: CatalogRecord,
    canvas: CanvasSize,
    color: Option<SpectralColor>,

    // fixed at construction
    radial: f64,
    magnitude_norm: f64,
    brightness: f64,
    max_magnitude: f64,

    // live
    hour_angle: f64,
    pan_offset: DVec2,
    placement: Placement,
    zoom: u32,
    min_magnitude: f64,
    color_enabled: bool,
}

impl StarEntity {
    pub fn new(record: CatalogRecord, view: &ViewState, canvas: CanvasSize) -> Self {
        let radial = radial_distance(record.distance.unwrap_or_default(), canvas.height);
        let magnitude = record.apparent_magnitude;
        let color = record
            .spectral_class
            .as_deref()
            .and_then(SpectralColor::from_class);

        let mut star = Self {
            canvas,
            color,
            radial,
            magnitude_norm: magnitude_norm(
                magnitude,
                view.max_magnitude,
                view.min_magnitude,
                canvas.width,
            ),
            brightness: brightness_scale(magnitude, view.max_magnitude, view.min_magnitude),
            max_magnitude: view.max_magnitude,
            hour_angle: record.right_ascension,
            pan_offset: DVec2::ZERO,
            placement: Placement {
                position: canvas.center(),
                size: 1.0,
            },
            zoom: view.zoom,
            min_magnitude: view.min_magnitude,
            color_enabled: view.color_enabled,
            record,
        };
        star.placement = star.project(view.zoom, view.scale_factor);
        star
    }

    /// Placement for the given zoom and scale at the current angle and pan.
    pub fn project(&self, zoom: u32, scale_factor: f64) -> Placement {
        Placement {
            position: screen_position(self.canvas, self.hour_angle, self.radial, zoom, self.pan_offset),
            size: star_size(self.magnitude_norm, zoom, scale_factor),
        }
    }

    /// Re-projects for a new frame. Leaves the rotation angle alone.
    pub fn update(&mut self, view: &ViewState) {
        self.zoom = view.zoom;
        self.min_magnitude = view.min_magnitude;
        self.color_enabled = view.color_enabled;
        self.placement = self.project(view.zoom, view.scale_factor);
    }

    pub fn rotate(&mut self, delta: f64, policy: RotationPanPolicy) {
        self.hour_angle -= delta;

        let pan = match policy {
            RotationPanPolicy::DropPan => DVec2::ZERO,
            RotationPanPolicy::KeepPan => self.pan_offset,
        };
        self.placement.position =
            screen_position(self.canvas, self.hour_angle, self.radial, self.zoom, pan);
    }

    /// Replaces the pan offset and shifts the current position by it.
    ///
    /// Offsets are not accumulated: callers pass the total drag delta of the
    /// gesture, measured from the press position.
    pub fn pan(&mut self, offset: DVec2) {
        self.pan_offset = offset;
        self.placement.position += offset;
    }

    pub fn is_visible(&self) -> bool {
        self.canvas.contains(self.placement.position)
            && in_magnitude_window(
                self.record.apparent_magnitude,
                self.max_magnitude,
                self.min_magnitude,
            )
    }

    pub fn hit_test(&self, point: DVec2) -> Option<StarId> {
        let tolerance = zoom_log(self.zoom);
        let distance = (point - self.placement.position).abs();

        (distance.x <= tolerance && distance.y <= tolerance).then_some(self.record.id)
    }

    pub fn resolve_name(&self, point: DVec2) -> Option<&str> {
        self.hit_test(point)
            .and_then(|_| self.record.name.as_deref())
    }

    /// Spectral color when enabled and known, grayscale otherwise.
    pub fn fill(&self) -> Fill {
        match self.color.filter(|_| self.color_enabled) {
            Some(color) => Fill::Hsb {
                hue: color.hue,
                saturation: color.saturation,
                brightness: hsb_brightness(self.brightness),
            },
            None => Fill::gray(gray_level(self.brightness)),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }

        canvas.set_fill(self.fill());
        canvas.draw_circle(self.placement.position, self.placement.size);
    }

    pub fn id(&self) -> StarId {
        self.record.id
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    pub fn record(&self) -> &CatalogRecord {
        &self.record
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn position(&self) -> DVec2 {
        self.placement.position
    }

    pub fn size(&self) -> f64 {
        self.placement.size
    }

    pub fn hour_angle(&self) -> f64 {
        self.hour_angle
    }

    pub fn pan_offset(&self) -> DVec2 {
        self.pan_offset
    }

    pub fn radial(&self) -> f64 {
        self.radial
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }
}
