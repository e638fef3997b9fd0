
use crate::catalog::{CatalogRecord, StarId};

pub(crate) fn star_record(id: i64, name: Option<&str>, ra: f64, distance: f64, magnitude: f64) -> CatalogRecord {
    CatalogRecord {
        id: StarId(id),
        name: name.map(str::to_string),
        right_ascension: ra,
        declination: 0.0,
        apparent_magnitude: magnitude,
        absolute_magnitude: None,
        distance: Some(distance),
        spectral_class: None,
    }
}
