use bevy::prelude::*;
use constants::coordinate_system::{GRID_LENGTH, REAL_MAP_EXTENT_X, REAL_MAP_EXTENT_Z};
use serde::{Deserialize, Serialize};

use crate::engine::error::{ConfigurationError, is_positive_finite};

/// Raw mapping parameters as configured. Validated by `CoordinateMapper::new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapParameters {
    pub real_extent_x: f32,
    pub real_extent_z: f32,
    pub grid_length: f32,
}

impl Default for MapParameters {
    fn default() -> Self {
        Self {
            real_extent_x: REAL_MAP_EXTENT_X,
            real_extent_z: REAL_MAP_EXTENT_Z,
            grid_length: GRID_LENGTH,
        }
    }
}

/// Converts real map coordinates into centred grid coordinates and back.
///
/// Per axis: `grid = (real - extent / 2) * grid_length / extent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    parameters: MapParameters,
    half_extent: Vec2,
    scale: Vec2,
}

impl CoordinateMapper {
    /// Validate parameters and precompute per-axis offsets and scales.
    pub fn new(parameters: MapParameters) -> Result<Self, ConfigurationError> {
        if !is_positive_finite(parameters.real_extent_x) {
            return Err(ConfigurationError::InvalidRealExtent {
                axis: 'x',
                value: parameters.real_extent_x,
            });
        }
        if !is_positive_finite(parameters.real_extent_z) {
            return Err(ConfigurationError::InvalidRealExtent {
                axis: 'z',
                value: parameters.real_extent_z,
            });
        }
        if !is_positive_finite(parameters.grid_length) {
            return Err(ConfigurationError::InvalidGridLength(parameters.grid_length));
        }
        if parameters.grid_length % 2.0 != 0.0 {
            return Err(ConfigurationError::GridLengthNotEven(parameters.grid_length));
        }

        let extent = Vec2::new(parameters.real_extent_x, parameters.real_extent_z);
        Ok(Self {
            parameters,
            half_extent: extent * 0.5,
            scale: Vec2::splat(parameters.grid_length) / extent,
        })
    }

    pub fn parameters(&self) -> MapParameters {
        self.parameters
    }

    /// Edge length of the mapped area in grid units.
    pub fn grid_length(&self) -> f32 {
        self.parameters.grid_length
    }

    /// Real map (x, z) to grid (x, z), centred on the origin.
    pub fn to_grid(&self, real: Vec2) -> Vec2 {
        (real - self.half_extent) * self.scale
    }

    /// Grid (x, z) back to real map (x, z).
    pub fn to_real(&self, grid: Vec2) -> Vec2 {
        grid / self.scale + self.half_extent
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        let parameters = MapParameters::default();
        let extent = Vec2::new(parameters.real_extent_x, parameters.real_extent_z);
        Self {
            parameters,
            half_extent: extent * 0.5,
            scale: Vec2::splat(parameters.grid_length) / extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-3;

    fn mapper(real_extent_x: f32, real_extent_z: f32, grid_length: f32) -> CoordinateMapper {
        CoordinateMapper::new(MapParameters {
            real_extent_x,
            real_extent_z,
            grid_length,
        })
        .unwrap()
    }

    #[test]
    fn test_map_centre_lands_on_origin() {
        let mapper = mapper(2000.0, 2000.0, 20.0);
        assert_eq!(mapper.to_grid(Vec2::new(1000.0, 1000.0)), Vec2::ZERO);
    }

    #[test]
    fn test_map_corners_land_on_floor_edges() {
        let mapper = mapper(2000.0, 2000.0, 20.0);
        assert_eq!(mapper.to_grid(Vec2::ZERO), Vec2::new(-10.0, -10.0));
        assert_eq!(mapper.to_grid(Vec2::new(2000.0, 2000.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_worked_values() {
        let mapper = mapper(2000.0, 2000.0, 20.0);
        let a = mapper.to_grid(Vec2::new(50.0, 50.0));
        let b = mapper.to_grid(Vec2::new(1050.0, 1050.0));
        assert!((a - Vec2::new(-9.5, -9.5)).abs().max_element() < TOLERANCE);
        assert!((b - Vec2::new(0.5, 0.5)).abs().max_element() < TOLERANCE);
    }

    #[test]
    fn test_axes_scale_independently() {
        let mapper = mapper(1000.0, 4000.0, 20.0);
        let grid = mapper.to_grid(Vec2::new(750.0, 3000.0));
        assert!((grid - Vec2::new(5.0, 5.0)).abs().max_element() < TOLERANCE);
    }

    #[test]
    fn test_round_trip_recovers_input() {
        let mapper = mapper(2000.0, 1500.0, 20.0);
        for x in (0..=2000).step_by(125) {
            for z in (0..=1500).step_by(125) {
                let real = Vec2::new(x as f32, z as f32);
                let back = mapper.to_real(mapper.to_grid(real));
                assert!(
                    (back - real).abs().max_element() < TOLERANCE,
                    "{real} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_invalid_parameters_fail_at_construction() {
        assert!(matches!(
            CoordinateMapper::new(MapParameters {
                real_extent_x: 0.0,
                real_extent_z: 2000.0,
                grid_length: 20.0,
            }),
            Err(ConfigurationError::InvalidRealExtent { axis: 'x', .. })
        ));
        assert!(matches!(
            CoordinateMapper::new(MapParameters {
                real_extent_x: 2000.0,
                real_extent_z: -5.0,
                grid_length: 20.0,
            }),
            Err(ConfigurationError::InvalidRealExtent { axis: 'z', .. })
        ));
        assert!(matches!(
            CoordinateMapper::new(MapParameters {
                real_extent_x: 2000.0,
                real_extent_z: 2000.0,
                grid_length: f32::NAN,
            }),
            Err(ConfigurationError::InvalidGridLength(_))
        ));
    }

    #[test]
    fn test_grid_length_must_be_even_whole_number() {
        let with_length = |grid_length| {
            CoordinateMapper::new(MapParameters {
                grid_length,
                ..MapParameters::default()
            })
        };
        assert_eq!(
            with_length(21.0).unwrap_err(),
            ConfigurationError::GridLengthNotEven(21.0)
        );
        assert_eq!(
            with_length(20.5).unwrap_err(),
            ConfigurationError::GridLengthNotEven(20.5)
        );
        assert!(with_length(40.0).is_ok());
        assert!(with_length(2.0).is_ok());
    }

    #[test]
    fn test_default_matches_validated_defaults() {
        assert_eq!(
            CoordinateMapper::default(),
            CoordinateMapper::new(MapParameters::default()).unwrap()
        );
    }
}
