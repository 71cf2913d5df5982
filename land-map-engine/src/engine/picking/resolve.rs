use bevy::prelude::*;

use super::ray::{CameraState, intersect_surface, pointer_ray};
use super::surface::{PickSurface, SurfaceHit};
use crate::engine::scene::model::Cell;

/// Winning pick: the cell under the pointer and the floor it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    pub cell: Cell,
    pub floor: usize,
    pub elevation: f32,
    pub point: Vec3,
}

impl From<SurfaceHit> for CellHit {
    fn from(hit: SurfaceHit) -> Self {
        Self {
            cell: Cell::containing(hit.point.xz()),
            floor: hit.surface.floor,
            elevation: hit.surface.elevation,
            point: hit.point,
        }
    }
}

/// Resolve the highlighted cell for a pointer at `pointer_ndc`.
///
/// Pure in its inputs: the same pointer, camera, and surfaces always give the
/// same answer.
pub fn resolve_highlight(
    pointer_ndc: Vec2,
    camera: &CameraState,
    candidates: &[PickSurface],
) -> Option<CellHit> {
    let ray = pointer_ray(pointer_ndc, camera)?;
    let hits = candidates
        .iter()
        .filter_map(|surface| intersect_surface(ray, surface))
        .filter(|hit| hit.surface.kind.is_pickable());
    select_topmost(hits).map(CellHit::from)
}

/// Highest elevation wins. On equal elevation the earlier hit is kept.
pub fn select_topmost(hits: impl IntoIterator<Item = SurfaceHit>) -> Option<SurfaceHit> {
    hits.into_iter().fold(None, |best, hit| match best {
        Some(best) if hit.surface.elevation <= best.surface.elevation => Some(best),
        _ => Some(hit),
    })
}
