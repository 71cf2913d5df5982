use bevy::prelude::*;
use constants::render_settings::FLOOR_PLANE_COLOUR;

use super::model::SceneModel;
use crate::engine::core::app_state::AppState;

#[derive(Component)]
pub struct FloorPlane {
    pub floor: usize,
}

/// Transparent planes for each floor. Picking reads the floors from `SceneModel`.
pub fn spawn_floor_planes(
    mut commands: Commands,
    scene: Res<SceneModel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: FLOOR_PLANE_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    for floor in scene.floors() {
        let plane = Plane3d::new(Vec3::Y, floor.size * 0.5);
        commands.spawn((
            Mesh3d(meshes.add(plane)),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(0.0, floor.elevation, 0.0),
            FloorPlane { floor: floor.index },
            StateScoped(AppState::Running),
        ));
    }

    info!("Spawned {} floor planes", scene.floors().len());
}
