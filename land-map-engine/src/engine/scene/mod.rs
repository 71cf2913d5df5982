//! The mounted land map: model and presentation.
//!
//! `SceneModel` owns floors and parcels and is read-only once built. The
//! other modules spawn the visible scene from it when the app enters
//! `Running` and keep the highlight quad and marker spheres in step with
//! model state. Presentation systems only read that state.
//!
//! Every spawned entity is scoped to `AppState::Running`.

/// Floors, parcels, properties and the cell type.
pub mod model;

/// Transparent floor planes carrying the floor pick surfaces.
pub mod floors;

/// Grid lines drawn on each floor.
pub mod grid;

/// Highlight quad following `HighlightState`.
pub mod highlight_mesh;

/// Marker spheres for placed markers.
pub mod markers;

/// Owner-coloured parcel tiles and their screen-space labels.
pub mod parcels;

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, LandMapSet};

pub struct LandScenePlugin;

impl Plugin for LandScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, markers::create_marker_assets)
            .add_systems(
                OnEnter(AppState::Running),
                (
                    floors::spawn_floor_planes,
                    grid::create_floor_grids,
                    parcels::spawn_parcels,
                    highlight_mesh::spawn_highlight_quad,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    highlight_mesh::sync_highlight_quad,
                    markers::spawn_new_marker_meshes,
                    parcels::update_parcel_labels,
                )
                    .in_set(LandMapSet::Presentation)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
