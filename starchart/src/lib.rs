//! Interactive 2D star chart engine.
//!
//! Catalog rows become [`CatalogRecord`]s, records inside the magnitude
//! window become [`StarEntity`]s on a polar plot (angle from right ascension,
//! radius from distance), and a [`StarChart`] session drives pan, zoom,
//! rotation, color and pointer hit-testing frame by frame against any
//! [`Canvas`].
//!
//! ```rust,ignore
//! use starchart::{Catalog, ChartConfig, RecordingCanvas, StarChart};
//!
//! let config = ChartConfig::default();
//! let catalog = Catalog::from_csv_path("hyglike.csv".as_ref(), config.ingest_options())?;
//! let mut chart = StarChart::new(config.clone(), catalog);
//! let mut canvas = RecordingCanvas::new(config.canvas);
//!
//! chart.wheel(1.0);
//! chart.pointer_moved(412.0, 288.0);
//! let outcome = chart.frame(&mut canvas);
//! println!("{} stars drawn, hovering {:?}", outcome.visible, outcome.hovered);
//! ```

pub mod canvas;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod projection;
pub mod spectral;
pub mod star;
pub mod star_field;
pub mod svg;
pub mod view;

#[cfg(test)]
mod tests;

pub use canvas::{Canvas, CanvasSize, DrawCommand, Fill, RecordingCanvas};
pub use catalog::{Catalog, CatalogError, CatalogRecord, IngestOptions, IngestReport, StarId};
pub use chart::{PointerAction, PointerButton, StarChart};
pub use config::ChartConfig;
pub use spectral::SpectralColor;
pub use star::{Placement, StarEntity};
pub use star_field::{FrameOutcome, HoveredStar, StarField};
pub use svg::SvgCanvas;
pub use view::{RotationPanPolicy, ViewState};
