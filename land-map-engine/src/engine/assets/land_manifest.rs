use bevy::prelude::*;
use constants::coordinate_system::{
    FLOOR_COUNT, FLOOR_SPACING, GRID_LENGTH, GROUND_ELEVATION, REAL_MAP_EXTENT_X,
    REAL_MAP_EXTENT_Z,
};
use serde::{Deserialize, Serialize};

use crate::engine::mapping::MapParameters;
use crate::engine::scene::model::FloorLayout;

/// One owned land, in real map units measured from the map corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
    pub x: f32,
    pub z: f32,
    /// Floor index; lands without one sit on the ground floor.
    #[serde(default)]
    pub floor: usize,
}

/// An owner and every land it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub owner: String,
    #[serde(default)]
    pub lands: Vec<LandRecord>,
    /// sRGB override for the owner colour, each channel in 0..=1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<[f32; 3]>,
    /// Texture path relative to the asset root, drawn on every parcel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

/// Map geometry overrides. Every missing field falls back to the compiled default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub real_extent_x: f32,
    pub real_extent_z: f32,
    pub grid_length: f32,
    pub floor_count: usize,
    pub floor_spacing: f32,
    pub ground_elevation: f32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            real_extent_x: REAL_MAP_EXTENT_X,
            real_extent_z: REAL_MAP_EXTENT_Z,
            grid_length: GRID_LENGTH,
            floor_count: FLOOR_COUNT,
            floor_spacing: FLOOR_SPACING,
            ground_elevation: GROUND_ELEVATION,
        }
    }
}

impl MapSettings {
    pub fn map_parameters(&self) -> MapParameters {
        MapParameters {
            real_extent_x: self.real_extent_x,
            real_extent_z: self.real_extent_z,
            grid_length: self.grid_length,
        }
    }

    pub fn floor_layout(&self) -> FloorLayout {
        FloorLayout {
            count: self.floor_count,
            spacing: self.floor_spacing,
            ground_elevation: self.ground_elevation,
        }
    }
}

/// Scene-load payload as a Bevy asset. Mirrors the JSON file exactly.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandManifest {
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

impl LandManifest {
    pub fn land_count(&self) -> usize {
        self.properties.iter().map(|p| p.lands.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_manifest_uses_defaults() {
        let manifest: LandManifest = serde_json::from_str(
            r#"{ "properties": [ { "owner": "alice", "lands": [ { "x": 50, "z": 1050 } ] } ] }"#,
        )
        .unwrap();

        assert_eq!(manifest.map, MapSettings::default());
        assert_eq!(manifest.properties[0].lands[0].floor, 0);
        assert_eq!(manifest.properties[0].colour, None);
        assert_eq!(manifest.land_count(), 1);
    }

    #[test]
    fn test_partial_map_override_keeps_other_defaults() {
        let manifest: LandManifest = serde_json::from_str(
            r#"{
                "map": { "grid_length": 40, "floor_count": 1 },
                "properties": [
                    { "owner": "bob", "colour": [1.0, 0.5, 0.0], "texture": "land_map/bob.png",
                      "lands": [ { "x": 10, "z": 20, "floor": 0 } ] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.map.grid_length, 40.0);
        assert_eq!(manifest.map.real_extent_x, REAL_MAP_EXTENT_X);
        assert_eq!(manifest.map.floor_layout().count, 1);
        assert_eq!(manifest.map.floor_layout().spacing, FLOOR_SPACING);
        assert_eq!(manifest.properties[0].colour, Some([1.0, 0.5, 0.0]));
        assert_eq!(
            manifest.properties[0].texture.as_deref(),
            Some("land_map/bob.png")
        );
    }

    #[test]
    fn test_empty_document_is_an_empty_scene() {
        let manifest: LandManifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.properties.is_empty());
        assert_eq!(manifest.map.map_parameters(), MapParameters::default());
    }

    #[test]
    fn test_owner_is_required() {
        let parsed = serde_json::from_str::<LandManifest>(
            r#"{ "properties": [ { "lands": [] } ] }"#,
        );
        assert!(parsed.is_err());
    }
}
