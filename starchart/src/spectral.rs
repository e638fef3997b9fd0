//! Spectral class to HSB color lookup.
//!
//! Only the first character of the class string matters. O, B, A and F all map
//! to the same hue; the saturation is what tells them apart.

use serde::{Deserialize, Serialize};

/// Hue and saturation for a star, in HSB units (hue degrees, saturation 0-100).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralColor {
    pub hue: f64,
    pub saturation: f64,
}

impl SpectralColor {
    /// Legacy numeric marker for "no color", as reported by [`hue_of`].
    pub const NO_COLOR_HUE: f64 = -1.0;

    pub fn from_class(spectral_class: &str) -> Option<Self> {
        let letter = spectral_class.chars().next()?;
        let (hue, saturation) = match letter {
            'O' | 'W' => (240.0, 80.0),
            'B' => (240.0, 30.0),
            'A' => (240.0, 20.0),
            'F' => (240.0, 0.0),
            'G' => (50.0, 60.0),
            'K' => (350.0, 50.0),
            'M' | 'C' => (0.0, 90.0),
            _ => return None,
        };

        Some(Self { hue, saturation })
    }
}

/// Hue for a spectral class, or [`SpectralColor::NO_COLOR_HUE`].
pub fn hue_of(spectral_class: Option<&str>) -> f64 {
    spectral_class
        .and_then(SpectralColor::from_class)
        .map_or(SpectralColor::NO_COLOR_HUE, |color| color.hue)
}

/// Saturation for a spectral class; unknown classes have none.
pub fn saturation_of(spectral_class: Option<&str>) -> f64 {
    spectral_class
        .and_then(SpectralColor::from_class)
        .map_or(0.0, |color| color.saturation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_classes() {
        assert_eq!(hue_of(Some("G2V")), 50.0);
        assert_eq!(saturation_of(Some("G2V")), 60.0);

        assert_eq!(hue_of(Some("M5")), 0.0);
        assert_eq!(saturation_of(Some("M5")), 90.0);

        assert_eq!(hue_of(Some("K0III")), 350.0);
        assert_eq!(saturation_of(Some("K0III")), 50.0);

        assert_eq!(hue_of(Some("WC8")), 240.0);
        assert_eq!(saturation_of(Some("WC8")), 80.0);
    }

    #[test]
    fn hot_classes_share_hue() {
        for class in ["O5", "B3", "A1V", "F8"] {
            assert_eq!(hue_of(Some(class)), 240.0, "class {class}");
        }
        assert_eq!(saturation_of(Some("B3")), 30.0);
        assert_eq!(saturation_of(Some("A1V")), 20.0);
        assert_eq!(saturation_of(Some("F8")), 0.0);
    }

    #[test]
    fn unknown_or_absent_class_has_no_color() {
        assert_eq!(hue_of(Some("X9")), SpectralColor::NO_COLOR_HUE);
        assert_eq!(hue_of(Some("")), -1.0);
        assert_eq!(hue_of(None), -1.0);
        // lookup is case sensitive
        assert!(SpectralColor::from_class("g2").is_none());
        assert_eq!(saturation_of(Some("X9")), 0.0);
    }
}
