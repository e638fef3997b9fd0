//! Interactive chart session.
//!
//! [`StarChart`] is what a host talks to. It turns pointer, wheel and widget
//! events into view changes, runs one [`StarField`] pass per frame and draws
//! the information overlay on top.

use glam::DVec2;
use log::{debug, info};

use common::toggle::Toggle;

use crate::canvas::{Canvas, CanvasSize, Fill};
use crate::catalog::{Catalog, CatalogRecord};
use crate::config::ChartConfig;
use crate::star_field::{FrameOutcome, HoveredStar, StarField};
use crate::view::ViewState;

const OVERLAY_GRAY: f64 = 128.0;
const OVERLAY_RIGHT_INSET: f64 = 100.0;
const OVERLAY_LEFT_INSET: f64 = 3.0;
const OVERLAY_LINE_HEIGHT: f64 = 10.0;
const OVERLAY_BOTTOM_INSET: f64 = 5.0;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// Open the hovered star's reference page in a new browser context.
    OpenReference(String),
}

#[derive(Debug)]
pub struct StarChart {
    config: ChartConfig,
    records: Vec<CatalogRecord>,
    view: ViewState,
    field: StarField,
    press_position: DVec2,
    hovered: Option<HoveredStar>,
}

impl StarChart {
    pub fn new(config: ChartConfig, catalog: Catalog) -> Self {
        let records = catalog.into_records();
        let view = ViewState {
            max_magnitude: crate::view::MAX_MAGNITUDE,
            ..config.view
        };
        let field = StarField::populate(&records, &view, config.canvas, config.rotation_pan_policy);

        Self {
            config,
            records,
            view,
            field,
            press_position: DVec2::ZERO,
            hovered: None,
        }
    }

    /// Runs one frame: star pass on a snapshot of the view, then the overlay.
    pub fn frame(&mut self, canvas: &mut dyn Canvas) -> FrameOutcome {
        let snapshot = self.view;
        let outcome = self.field.frame_update(&snapshot, canvas);
        self.hovered = outcome.hovered.clone();

        self.draw_overlay(&snapshot, canvas);

        outcome
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.view.pointer = DVec2::new(x, y);
    }

    /// Starts a drag gesture and clears its pan offset. A secondary press
    /// over a named star asks the host to open its reference page.
    pub fn pointer_pressed(&mut self, button: PointerButton, x: f64, y: f64) -> Option<PointerAction> {
        self.view.pointer = DVec2::new(x, y);
        self.press_position = self.view.pointer;
        self.view.pan_offset = DVec2::ZERO;

        if button != PointerButton::Secondary {
            return None;
        }

        let name = self.hovered.as_ref()?.name.as_deref()?;
        let url = self.reference_url(name);
        info!("Opening reference page {}", url);

        Some(PointerAction::OpenReference(url))
    }

    /// Pans by the distance from the press position, only while the pointer
    /// is over the canvas. Stars move immediately, before the next frame.
    pub fn pointer_dragged(&mut self, x: f64, y: f64) {
        self.view.pointer = DVec2::new(x, y);
        if !self.config.canvas.contains(self.view.pointer) {
            return;
        }

        // whole pixels, halves round up
        let offset = (self.view.pointer - self.press_position + 0.5).floor();
        self.view.pan_offset = offset;
        self.field.pan(offset);
    }

    pub fn wheel(&mut self, delta: f64) {
        self.view.apply_wheel(delta);
        debug!("Zoom is now {}", self.view.zoom);
    }

    pub fn set_min_magnitude(&mut self, min_magnitude: f64) {
        if min_magnitude == self.view.min_magnitude {
            return;
        }

        self.view.min_magnitude = min_magnitude.max(self.view.max_magnitude);
        debug!("Minimum magnitude is now {}", self.view.min_magnitude);

        if self.config.repopulate_on_filter_change {
            self.field.repopulate(&self.records, &self.view);
        }
    }

    /// Scale slider; the slider value is ten times the scale factor.
    pub fn set_scale_slider(&mut self, value: f64) {
        self.view.scale_factor = value / 10.0;
    }

    /// Rotation slider; the slider value is a thousand times the speed.
    pub fn set_rotation_slider(&mut self, value: f64) {
        self.view.rotation_speed = value / 1000.0;
    }

    pub fn set_color_enabled(&mut self, enabled: bool) {
        self.view.color_enabled = enabled;
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.view.rotation_enabled = enabled;
    }

    pub fn toggle_color(&mut self) -> bool {
        self.view.color_enabled.toggle()
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.view.rotation_enabled.toggle()
    }

    pub fn reference_url(&self, name: &str) -> String {
        format!("{}{}", self.config.reference_base_url, name)
    }

    /// Overlay lines for the given view, bottom-up on each side.
    pub fn overlay_lines(&self, view: &ViewState) -> Vec<(String, DVec2)> {
        let CanvasSize { width, height } = self.config.canvas;
        let right = width - OVERLAY_RIGHT_INSET;
        let left = OVERLAY_LEFT_INSET;
        let line = |index: usize| height - OVERLAY_BOTTOM_INSET - OVERLAY_LINE_HEIGHT * index as f64;

        let id = self
            .hovered
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |star| star.id.to_string());
        let name = self.hovered.as_ref().and_then(|star| star.name.as_deref());

        let mut lines = vec![
            (format!("Minimum Mag: {}", view.min_magnitude), DVec2::new(right, line(0))),
            (format!("Zoom: {}", view.zoom), DVec2::new(right, line(1))),
            (format!("Scale Factor: {}", view.scale_factor), DVec2::new(right, line(2))),
            (format!("ID: {}", id), DVec2::new(left, line(0))),
            (
                format!("Name: {}", name.unwrap_or(NOT_AVAILABLE)),
                DVec2::new(left, line(1)),
            ),
        ];
        if let Some(name) = name {
            lines.push((self.reference_url(name), DVec2::new(left, line(2))));
        }

        lines
    }

    fn draw_overlay(&self, view: &ViewState, canvas: &mut dyn Canvas) {
        canvas.set_fill(Fill::gray(OVERLAY_GRAY));
        for (text, position) in self.overlay_lines(view) {
            canvas.draw_text(&text, position);
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn hovered(&self) -> Option<&HoveredStar> {
        self.hovered.as_ref()
    }
}
