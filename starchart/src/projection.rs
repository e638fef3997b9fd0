//! Pure mapping from catalog values and view parameters to screen space.
//!
//! Stars sit on a polar plot centred on the canvas: the angle comes from right
//! ascension, the radius from distance. Magnitude drives both the drawn size
//! and the fill brightness.
//!
//! `angle_from_ra` maps hours onto 0..360 and that number goes straight into
//! `sin`/`cos`, which read it as radians. The resulting layout is the chart's
//! established look, so the mapping is kept as is.

use glam::DVec2;

use crate::canvas::CanvasSize;

/// Distance (parsecs) that maps onto the full canvas height.
pub const MAX_CATALOG_DISTANCE: f64 = 82083.9594;

/// Upper end of the brightness scale produced by [`brightness_scale`].
pub const BRIGHTNESS_SCALE_MAX: f64 = 400.0;

/// Remaps `value` from `[from_start, from_end]` to `[to_start, to_end]`.
/// Not clamped; values outside the source range extrapolate.
pub fn linear_map(value: f64, from_start: f64, from_end: f64, to_start: f64, to_end: f64) -> f64 {
    to_start + (value - from_start) * (to_end - to_start) / (from_end - from_start)
}

pub fn angle_from_ra(hours: f64) -> f64 {
    linear_map(hours, 0.0, 24.0, 0.0, 360.0)
}

pub fn radial_distance(distance: f64, canvas_height: f64) -> f64 {
    linear_map(distance, 0.0, MAX_CATALOG_DISTANCE, 0.0, canvas_height)
}

pub fn screen_position(
    canvas: CanvasSize,
    hour_angle: f64,
    radial: f64,
    zoom: u32,
    pan: DVec2,
) -> DVec2 {
    let (sin, cos) = angle_from_ra(hour_angle).sin_cos();
    let radius = radial * f64::from(zoom);

    canvas.center() + DVec2::new(radius * cos, radius * sin) + pan
}

/// Zoom-dependent drawing diameter. Every star is 1px at zoom 1.
pub fn star_size(magnitude_norm: f64, zoom: u32, scale_factor: f64) -> f64 {
    1.0 + round_half_up(magnitude_norm * zoom_log(zoom) * scale_factor / 100.0)
}

/// Natural log of the zoom level; also the hit-test tolerance in pixels.
pub fn zoom_log(zoom: u32) -> f64 {
    f64::from(zoom.max(1)).ln()
}

pub fn magnitude_norm(magnitude: f64, max_magnitude: f64, min_magnitude: f64, canvas_width: f64) -> f64 {
    linear_map(magnitude, max_magnitude, min_magnitude, 0.0, canvas_width)
}

/// Places `10^magnitude` on a 0..400 scale between the magnitude bounds.
pub fn brightness_scale(magnitude: f64, max_magnitude: f64, min_magnitude: f64) -> f64 {
    linear_map(
        10f64.powf(magnitude),
        10f64.powf(max_magnitude),
        10f64.powf(min_magnitude),
        0.0,
        BRIGHTNESS_SCALE_MAX,
    )
}

/// Grayscale fill level (0-255) for a brightness-scaled magnitude.
pub fn gray_level(scaled: f64) -> f64 {
    (255.0 - scaled).clamp(0.0, 255.0)
}

/// HSB brightness (0-100) for a brightness-scaled magnitude.
pub fn hsb_brightness(scaled: f64) -> f64 {
    (100.0 - scaled / 255.0 * 100.0).clamp(0.0, 100.0)
}

pub fn in_magnitude_window(magnitude: f64, max_magnitude: f64, min_magnitude: f64) -> bool {
    max_magnitude <= magnitude && magnitude <= min_magnitude
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
