use std::collections::HashMap;

use bevy::prelude::*;
use constants::coordinate_system::{
    CELL_CENTRE_OFFSET, FLOOR_COUNT, FLOOR_SPACING, GROUND_ELEVATION,
};
use constants::render_settings::{PARCEL_ALPHA, PARCEL_LIGHTNESS, PARCEL_SATURATION};
use serde::{Deserialize, Serialize};

use crate::engine::assets::land_manifest::{LandManifest, PropertyRecord};
use crate::engine::error::{ConfigurationError, is_positive_finite};
use crate::engine::mapping::CoordinateMapper;
use crate::engine::picking::surface::{PickSurface, SurfaceKind};

/// Integer-addressed unit square on the grid, named by its lower corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell whose square contains the planar point (floors both axes).
    pub fn containing(point: Vec2) -> Self {
        Self {
            x: point.x.floor() as i32,
            z: point.y.floor() as i32,
        }
    }

    /// Lower corner in grid units.
    pub fn corner(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.z as f32)
    }

    /// Visual centre in grid units.
    pub fn centre(&self) -> Vec2 {
        self.corner() + Vec2::splat(CELL_CENTRE_OFFSET)
    }
}

/// How floors are stacked. Validated by `SceneModel::new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub count: usize,
    pub spacing: f32,
    pub ground_elevation: f32,
}

impl Default for FloorLayout {
    fn default() -> Self {
        Self {
            count: FLOOR_COUNT,
            spacing: FLOOR_SPACING,
            ground_elevation: GROUND_ELEVATION,
        }
    }
}

impl FloorLayout {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.count == 0 {
            return Err(ConfigurationError::NoFloors);
        }
        if !is_positive_finite(self.spacing) {
            return Err(ConfigurationError::InvalidFloorSpacing(self.spacing));
        }
        if !self.ground_elevation.is_finite() {
            return Err(ConfigurationError::InvalidGroundElevation(
                self.ground_elevation,
            ));
        }
        Ok(())
    }
}

/// Finite horizontal plane at a fixed elevation, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub index: usize,
    pub elevation: f32,
    pub size: Vec2,
}

impl Floor {
    pub fn min(&self) -> Vec2 {
        -self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Cell that owns `point` on this floor, or `None` off the floor.
    ///
    /// The far edges are closed here: a point exactly on `max` belongs to the
    /// last row or column, so every mapped coordinate inside the real extent
    /// lands on a pickable cell.
    pub fn cell_at(&self, point: Vec2) -> Option<Cell> {
        let (min, max) = (self.min(), self.max());
        if !(point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y) {
            return None;
        }
        let cell = Cell::containing(point);
        let last = Cell::containing(max - Vec2::ONE);
        Some(Cell::new(cell.x.min(last.x), cell.z.min(last.z)))
    }
}

/// An owner and the display settings shared by its parcels.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub owner: String,
    pub colour: Color,
    pub texture: Option<String>,
    pub parcel_count: usize,
}

/// A single owned cell on a floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    pub property: usize,
    pub owner: String,
    pub floor: usize,
    pub cell: Cell,
    /// Exact mapped centre in grid units; not snapped to the cell.
    pub centre: Vec2,
}

/// Floors and parcels of the mounted scene. Read-only once built.
#[derive(Resource, Debug, Clone)]
pub struct SceneModel {
    mapper: CoordinateMapper,
    floors: Vec<Floor>,
    properties: Vec<Property>,
    parcels: Vec<Parcel>,
    parcel_index: HashMap<(usize, Cell), usize>,
    surfaces: Vec<PickSurface>,
}

impl SceneModel {
    /// Build floors from `layout`, then place every land of every record.
    ///
    /// A second parcel claiming an already owned cell on the same floor is
    /// skipped; the first record wins.
    pub fn new(
        mapper: CoordinateMapper,
        layout: FloorLayout,
        records: &[PropertyRecord],
    ) -> Result<Self, ConfigurationError> {
        layout.validate()?;

        let size = Vec2::splat(mapper.grid_length());
        let floors: Vec<Floor> = (0..layout.count)
            .map(|index| Floor {
                index,
                elevation: layout.ground_elevation + index as f32 * layout.spacing,
                size,
            })
            .collect();

        let mut properties = Vec::with_capacity(records.len());
        let mut parcels = Vec::new();
        let mut parcel_index = HashMap::new();

        for (property_index, record) in records.iter().enumerate() {
            let mut parcel_count = 0;

            for (land_index, land) in record.lands.iter().enumerate() {
                if !land.x.is_finite() || !land.z.is_finite() {
                    return Err(ConfigurationError::InvalidLandCoordinate {
                        owner: record.owner.clone(),
                        land: land_index,
                    });
                }
                if land.floor >= floors.len() {
                    return Err(ConfigurationError::UnknownFloor {
                        owner: record.owner.clone(),
                        land: land_index,
                        floor: land.floor,
                        floor_count: floors.len(),
                    });
                }

                let centre = mapper.to_grid(Vec2::new(land.x, land.z));
                let Some(cell) = floors[land.floor].cell_at(centre) else {
                    warn!(
                        "Land {} of '{}' maps to {} outside floor {}, skipping",
                        land_index, record.owner, centre, land.floor
                    );
                    continue;
                };

                if let Some(&existing) = parcel_index.get(&(land.floor, cell)) {
                    let existing: &Parcel = &parcels[existing];
                    warn!(
                        "Land {} of '{}' overlaps '{}' at cell ({}, {}) on floor {}, skipping",
                        land_index, record.owner, existing.owner, cell.x, cell.z, land.floor
                    );
                    continue;
                }
                parcel_index.insert((land.floor, cell), parcels.len());
                parcels.push(Parcel {
                    property: property_index,
                    owner: record.owner.clone(),
                    floor: land.floor,
                    cell,
                    centre,
                });
                parcel_count += 1;
            }

            properties.push(Property {
                owner: record.owner.clone(),
                colour: record
                    .colour
                    .map(|[r, g, b]| Color::srgba(r, g, b, PARCEL_ALPHA))
                    .unwrap_or_else(|| owner_colour(&record.owner)),
                texture: record.texture.clone(),
                parcel_count,
            });
        }

        let surfaces = floors
            .iter()
            .map(PickSurface::floor)
            .chain(parcels.iter().map(|parcel| {
                let elevation = floors[parcel.floor].elevation;
                PickSurface::cell(SurfaceKind::Parcel, parcel.floor, elevation, parcel.cell)
            }))
            .collect();

        Ok(Self {
            mapper,
            floors,
            properties,
            parcels,
            parcel_index,
            surfaces,
        })
    }

    /// Validate the manifest's map settings and build the scene from its records.
    pub fn from_manifest(manifest: &LandManifest) -> Result<Self, ConfigurationError> {
        let mapper = CoordinateMapper::new(manifest.map.map_parameters())?;
        Self::new(mapper, manifest.map.floor_layout(), &manifest.properties)
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Floors ordered by index; elevation strictly increases with index.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn parcel_at(&self, floor: usize, cell: Cell) -> Option<&Parcel> {
        self.parcel_index
            .get(&(floor, cell))
            .map(|&index| &self.parcels[index])
    }

    pub fn owner_at(&self, floor: usize, cell: Cell) -> Option<&str> {
        self.parcel_at(floor, cell).map(|parcel| parcel.owner.as_str())
    }

    /// Pickable surfaces in traversal order: floors bottom-up, then parcels.
    ///
    /// This is the only source of floor and parcel surfaces for picking, so
    /// the equal-elevation tie order is fixed by the manifest, not by entity
    /// spawn order.
    pub fn pick_surfaces(&self) -> &[PickSurface] {
        &self.surfaces
    }
}

/// Deterministic per-owner colour (FNV-1a hash of the owner mapped to a hue).
pub fn owner_colour(owner: &str) -> Color {
    let hash = owner
        .bytes()
        .fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ byte as u32).wrapping_mul(0x0100_0193)
        });
    let hue = (hash % 360) as f32;
    Color::hsla(hue, PARCEL_SATURATION, PARCEL_LIGHTNESS, PARCEL_ALPHA)
}
