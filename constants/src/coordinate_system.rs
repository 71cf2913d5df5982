/// Real map extent along X, in real map units. Real map origin sits at a corner.
pub const REAL_MAP_EXTENT_X: f32 = 2000.0;

/// Real map extent along Z, in real map units.
pub const REAL_MAP_EXTENT_Z: f32 = 2000.0;

/// Edge length of every floor in grid units (one grid unit = one cell edge)
pub const GRID_LENGTH: f32 = 20.0;

/// Number of stacked floors in a default scene
pub const FLOOR_COUNT: usize = 3;

/// Vertical distance between consecutive floors
pub const FLOOR_SPACING: f32 = 4.0;

/// Elevation of floor 0
pub const GROUND_ELEVATION: f32 = 0.0;

/// Offset from a cell's integer corner to its visual centre, per axis
pub const CELL_CENTRE_OFFSET: f32 = 0.5;
