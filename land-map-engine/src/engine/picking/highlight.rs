use bevy::prelude::*;
use constants::coordinate_system::{CELL_CENTRE_OFFSET, GROUND_ELEVATION};

use super::ray::CameraState;
use super::resolve::{CellHit, resolve_highlight};
use super::surface::PickSurface;
use crate::engine::input::pointer::PointerPosition;
use crate::engine::scene::model::{Cell, SceneModel};

/// The cell currently under the pointer.
///
/// Written only by `update_highlight`. When the pointer stops resolving to a
/// cell the last cell is kept for display but the state turns inactive, and
/// inactive highlights cannot be placed on.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HighlightState {
    cell: Cell,
    floor: usize,
    elevation: f32,
    active: bool,
}

impl Default for HighlightState {
    fn default() -> Self {
        Self {
            cell: Cell::default(),
            floor: 0,
            elevation: GROUND_ELEVATION,
            active: false,
        }
    }
}

impl HighlightState {
    pub fn active_at(hit: &CellHit) -> Self {
        Self {
            cell: hit.cell,
            floor: hit.floor,
            elevation: hit.elevation,
            active: true,
        }
    }

    /// Fold a resolver result into the state.
    pub fn apply(&mut self, resolved: Option<CellHit>) {
        match resolved {
            Some(hit) => *self = Self::active_at(&hit),
            None => self.active = false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last resolved cell, shown even while inactive.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Cell available for placement, if any.
    pub fn active_cell(&self) -> Option<Cell> {
        self.active.then_some(self.cell)
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// World position of the cell centre on its floor.
    pub fn visual_centre(&self) -> Vec3 {
        let centre = self.cell.corner() + Vec2::splat(CELL_CENTRE_OFFSET);
        Vec3::new(centre.x, self.elevation, centre.y)
    }
}

/// Re-resolve the highlight when the pointer, the camera, or the scene changed.
///
/// Floors and parcels come from `SceneModel` in manifest order. Surfaces on
/// scene entities (grid, highlight quad, markers) follow them and are dropped
/// by the pickable filter.
pub fn update_highlight(
    pointer: Res<PointerPosition>,
    scene: Option<Res<SceneModel>>,
    cameras: Query<(Ref<GlobalTransform>, Ref<Projection>), With<Camera3d>>,
    surfaces: Query<&PickSurface>,
    mut highlight: ResMut<HighlightState>,
) {
    let Some(scene) = scene else {
        return;
    };
    let Ok((transform, projection)) = cameras.single() else {
        return;
    };
    if !pointer.is_changed()
        && !scene.is_changed()
        && !transform.is_changed()
        && !projection.is_changed()
    {
        return;
    }

    let candidates: Vec<PickSurface> = scene
        .pick_surfaces()
        .iter()
        .chain(surfaces.iter())
        .copied()
        .collect();
    let camera_state = CameraState::new(&projection, &transform);
    let resolved = pointer
        .ndc()
        .and_then(|ndc| resolve_highlight(ndc, &camera_state, &candidates));

    let mut next = *highlight;
    next.apply(resolved);
    if highlight.set_if_neq(next) {
        trace!(
            "Highlight -> ({}, {}) floor {} active={}",
            next.cell.x, next.cell.z, next.floor, next.active
        );
    }
}

/// Drop the highlight when the scene is unmounted.
pub fn reset_highlight(mut highlight: ResMut<HighlightState>) {
    *highlight = HighlightState::default();
}
