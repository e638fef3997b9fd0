//! The set of on-screen stars and the per-frame pass over it.

use glam::DVec2;
use log::{debug, info};

use crate::canvas::{Canvas, CanvasSize};
use crate::catalog::{CatalogRecord, StarId};
use crate::projection::{in_magnitude_window, radial_distance};
use crate::star::StarEntity;
use crate::view::{RotationPanPolicy, ViewState};

/// The star under the pointer at the end of a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoveredStar {
    pub id: StarId,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub hovered: Option<HoveredStar>,
    pub visible: usize,
}

#[derive(Clone, Debug)]
pub struct StarField {
    canvas: CanvasSize,
    rotation_policy: RotationPanPolicy,
    stars: Vec<StarEntity>,
}

impl StarField {
    /// Builds entities for every record inside the magnitude window with a
    /// nonzero plotted distance. Records left out here never come back unless
    /// the field is repopulated.
    pub fn populate(
        records: &[CatalogRecord],
        view: &ViewState,
        canvas: CanvasSize,
        rotation_policy: RotationPanPolicy,
    ) -> Self {
        let mut field = Self {
            canvas,
            rotation_policy,
            stars: Vec::new(),
        };
        field.repopulate(records, view);
        field
    }

    /// Discards every entity and rebuilds from `records` with the current view.
    pub fn repopulate(&mut self, records: &[CatalogRecord], view: &ViewState) {
        let canvas = self.canvas;
        self.stars = records
            .iter()
            .filter(|record| passes_population_gate(record, view, canvas))
            .map(|record| StarEntity::new(record.clone(), view, canvas))
            .collect();

        info!(
            "Populated star field with {} of {} catalog records (magnitude {}..{})",
            self.stars.len(),
            records.len(),
            view.max_magnitude,
            view.min_magnitude
        );
    }

    /// Clears the canvas, advances every star by one frame and draws it.
    ///
    /// When several stars are under the pointer the one visited last wins.
    pub fn frame_update(&mut self, view: &ViewState, canvas: &mut dyn Canvas) -> FrameOutcome {
        canvas.clear();

        let rotation = view.rotation_enabled.then(|| view.rotation_step());
        let mut outcome = FrameOutcome::default();

        for star in self.stars.iter_mut() {
            star.update(view);
            if let Some(delta) = rotation {
                star.rotate(delta, self.rotation_policy);
            }

            if let Some(id) = star.hit_test(view.pointer) {
                outcome.hovered = Some(HoveredStar {
                    id,
                    name: star.resolve_name(view.pointer).map(str::to_string),
                });
            }

            if star.is_visible() {
                outcome.visible += 1;
            }
            star.render(canvas);
        }

        outcome
    }

    /// Applies the current drag delta to every star.
    pub fn pan(&mut self, offset: DVec2) {
        debug!("Panning star field by {:?}", offset);
        for star in self.stars.iter_mut() {
            star.pan(offset);
        }
    }

    /// Draws every visible star at its current placement without advancing it.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for star in self.stars.iter() {
            star.render(canvas);
        }
    }

    pub fn star_by_id(&self, id: StarId) -> Option<&StarEntity> {
        self.stars.iter().find(|star| star.id() == id)
    }

    pub fn stars(&self) -> &[StarEntity] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn rotation_policy(&self) -> RotationPanPolicy {
        self.rotation_policy
    }
}

fn passes_population_gate(record: &CatalogRecord, view: &ViewState, canvas: CanvasSize) -> bool {
    let plotted_distance = record
        .distance
        .map(|distance| radial_distance(distance, canvas.height))
        .unwrap_or_default();

    in_magnitude_window(
        record.apparent_magnitude,
        view.max_magnitude,
        view.min_magnitude,
    ) && plotted_distance != 0.0
}
