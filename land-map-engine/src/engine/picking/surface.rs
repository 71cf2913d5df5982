use bevy::prelude::*;

use crate::engine::scene::model::{Cell, Floor};

/// What a surface belongs to. Only floors and parcels can be picked; the rest
/// share the scene but are ignored by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Floor,
    Parcel,
    Highlight,
    Marker,
    Helper,
}

impl SurfaceKind {
    pub fn is_pickable(self) -> bool {
        matches!(self, Self::Floor | Self::Parcel)
    }
}

/// Axis-aligned horizontal rectangle at a fixed elevation.
/// `min`/`max` are planar (x, z) bounds, half-open on the max side.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PickSurface {
    pub kind: SurfaceKind,
    pub floor: usize,
    pub elevation: f32,
    pub min: Vec2,
    pub max: Vec2,
}

impl PickSurface {
    pub fn floor(floor: &Floor) -> Self {
        Self {
            kind: SurfaceKind::Floor,
            floor: floor.index,
            elevation: floor.elevation,
            min: floor.min(),
            max: floor.max(),
        }
    }

    /// Surface covering exactly one cell.
    pub fn cell(kind: SurfaceKind, floor: usize, elevation: f32, cell: Cell) -> Self {
        let min = cell.corner();
        Self {
            kind,
            floor,
            elevation,
            min,
            max: min + Vec2::ONE,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// Ray/surface intersection, tagged with the surface that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: PickSurface,
    pub point: Vec3,
    pub distance: f32,
}
