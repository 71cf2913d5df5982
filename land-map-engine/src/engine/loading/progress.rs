use bevy::prelude::*;

/// Where the manifest load currently stands.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingProgress {
    pub manifest_requested: bool,
    pub manifest_loaded: bool,
    pub scene_built: bool,
    pub load_failed: bool,
}

impl LoadingProgress {
    /// Nothing left to poll for.
    pub fn is_settled(&self) -> bool {
        self.scene_built || self.load_failed
    }
}
