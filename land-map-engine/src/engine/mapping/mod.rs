//! Real map to grid coordinate conversion.
//!
//! External land records arrive in real map units with the origin at a map
//! corner. The engine works in grid units centred on the world origin, where
//! one unit is one cell edge. The conversion is a per-axis affine transform
//! with an exact inverse; no rounding happens here.

/// Validated affine mapping between real map units and grid units.
pub mod coordinate_mapper;

pub use coordinate_mapper::{CoordinateMapper, MapParameters};
