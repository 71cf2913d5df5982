use thiserror::Error;

/// Invalid scene configuration. Raised once while the scene is constructed,
/// never while picking or placing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("real map extent along {axis} must be positive and finite, got {value}")]
    InvalidRealExtent { axis: char, value: f32 },

    #[error("grid length must be positive and finite, got {0}")]
    InvalidGridLength(f32),

    #[error("grid length must be an even whole number so cell edges meet the origin, got {0}")]
    GridLengthNotEven(f32),

    #[error("floor spacing must be positive and finite, got {0}")]
    InvalidFloorSpacing(f32),

    #[error("ground elevation must be finite, got {0}")]
    InvalidGroundElevation(f32),

    #[error("scene needs at least one floor")]
    NoFloors,

    #[error("land {land} of '{owner}' is on floor {floor}, but the scene has {floor_count} floors")]
    UnknownFloor {
        owner: String,
        land: usize,
        floor: usize,
        floor_count: usize,
    },

    #[error("land {land} of '{owner}' has a non-finite coordinate")]
    InvalidLandCoordinate { owner: String, land: usize },
}

/// Returns true when `value` can be used as a length or extent.
pub(crate) fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
