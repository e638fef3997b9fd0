use std::path::Path;

use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSize;
use crate::catalog::IngestOptions;
use crate::view::{RotationPanPolicy, ViewState};

pub const DEFAULT_REFERENCE_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub canvas: CanvasSize,
    /// Prefix for a star's reference page; the star name is appended as is.
    pub reference_base_url: String,
    /// Initial view. Pan, pointer and the brightest magnitude are not read.
    pub view: ViewState,
    pub rotation_pan_policy: RotationPanPolicy,
    /// Rebuild the star field whenever the faint magnitude limit changes,
    /// so stars outside the initial window can appear later.
    pub repopulate_on_filter_change: bool,
    pub warn_on_malformed_rows: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            reference_base_url: DEFAULT_REFERENCE_BASE_URL.to_string(),
            view: ViewState::default(),
            rotation_pan_policy: RotationPanPolicy::default(),
            repopulate_on_filter_change: false,
            warn_on_malformed_rows: false,
        }
    }
}

impl ChartConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: ChartConfig = serde_yml::from_str(yaml)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;

        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.canvas.width.is_finite() && self.canvas.width > 0.0)
            || !(self.canvas.height.is_finite() && self.canvas.height > 0.0)
        {
            bail!(
                "canvas size must be finite and positive, got {}x{}",
                self.canvas.width,
                self.canvas.height
            );
        }
        if self.view.zoom < 1 {
            bail!("zoom must be at least 1");
        }
        if !self.view.min_magnitude.is_finite()
            || self.view.min_magnitude < self.view.max_magnitude
        {
            bail!(
                "min_magnitude must be finite and not brighter than {}, got {}",
                self.view.max_magnitude,
                self.view.min_magnitude
            );
        }
        if !self.view.scale_factor.is_finite() || self.view.scale_factor < 0.0 {
            bail!("scale_factor must be finite and non-negative");
        }
        if !self.view.rotation_speed.is_finite() {
            bail!("rotation_speed must be finite");
        }

        Ok(())
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            warn_on_malformed: self.warn_on_malformed_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_uses_defaults() -> anyhow::Result<()> {
        let config = ChartConfig::from_yaml(
            "
canvas:
  width: 1280
  height: 720
view:
  min_magnitude: 4.5
  color_enabled: true
rotation_pan_policy: keep_pan
",
        )?;

        assert_eq!(config.canvas, CanvasSize::new(1280.0, 720.0));
        assert_eq!(config.view.min_magnitude, 4.5);
        assert!(config.view.color_enabled);
        assert_eq!(config.view.zoom, 1);
        assert_eq!(config.view.max_magnitude, -2.0);
        assert_eq!(config.view.scale_factor, 0.2);
        assert_eq!(config.rotation_pan_policy, RotationPanPolicy::KeepPan);
        assert_eq!(config.reference_base_url, DEFAULT_REFERENCE_BASE_URL);
        assert!(!config.repopulate_on_filter_change);

        Ok(())
    }

    #[test]
    fn yaml_round_trip() -> anyhow::Result<()> {
        let config = ChartConfig {
            repopulate_on_filter_change: true,
            ..ChartConfig::default()
        };

        let yaml = config.to_yaml()?;
        assert_eq!(ChartConfig::from_yaml(&yaml)?, config);

        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ChartConfig::from_yaml("canvas: { width: 0, height: 10 }").is_err());
        assert!(ChartConfig::from_yaml("view: { zoom: 0 }").is_err());
        assert!(ChartConfig::from_yaml("view: { min_magnitude: -5 }").is_err());
        assert!(ChartConfig::from_yaml("view: { scale_factor: -1 }").is_err());
        assert!(ChartConfig::from_yaml("rotation_pan_policy: sideways").is_err());
    }
}
