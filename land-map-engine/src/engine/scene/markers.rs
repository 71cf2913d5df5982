use bevy::prelude::*;
use constants::render_settings::{MARKER_COLOUR, MARKER_RADIUS};

use crate::engine::core::app_state::AppState;
use crate::engine::picking::surface::{PickSurface, SurfaceKind};
use crate::tools::placement::PlacementController;

#[derive(Component)]
pub struct MarkerMesh {
    pub id: u32,
}

/// Shared mesh and material for every marker sphere.
#[derive(Resource)]
pub struct MarkerAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

pub fn create_marker_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(MarkerAssets {
        mesh: meshes.add(Sphere::new(MARKER_RADIUS)),
        material: materials.add(StandardMaterial {
            base_color: MARKER_COLOUR,
            ..default()
        }),
    });
}

/// Spawn spheres for markers appended since the last run.
///
/// Markers are append-only, so the count of already drawn markers is enough
/// to find the new ones.
pub fn spawn_new_marker_meshes(
    mut commands: Commands,
    controller: Res<PlacementController>,
    marker_assets: Option<Res<MarkerAssets>>,
    mut drawn: Local<usize>,
) {
    if !controller.is_changed() {
        return;
    }
    // The controller was reset; the scoped meshes are already gone.
    if controller.len() < *drawn {
        *drawn = 0;
    }
    let Some(marker_assets) = marker_assets else {
        return;
    };

    for marker in &controller.markers()[*drawn..] {
        commands.spawn((
            Mesh3d(marker_assets.mesh.clone()),
            MeshMaterial3d(marker_assets.material.clone()),
            Transform::from_translation(marker.position + Vec3::Y * MARKER_RADIUS),
            MarkerMesh { id: marker.id },
            PickSurface::cell(SurfaceKind::Marker, marker.floor, marker.position.y, marker.cell),
            StateScoped(AppState::Running),
        ));
    }
    *drawn = controller.len();
}
