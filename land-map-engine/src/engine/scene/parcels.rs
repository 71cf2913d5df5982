use bevy::prelude::*;
use constants::render_settings::{LABEL_FONT_SIZE, PARCEL_SURFACE_OFFSET};

use super::model::SceneModel;
use crate::engine::core::app_state::AppState;

#[derive(Component)]
pub struct ParcelTile {
    pub parcel: usize,
}

/// Screen-space owner label following a parcel's world position.
#[derive(Component)]
pub struct ParcelLabel {
    pub anchor: Vec3,
}

/// One coloured tile per parcel, sharing a material per property.
///
/// Textures load in the background; tiles show their colour until then.
pub fn spawn_parcels(
    mut commands: Commands,
    scene: Res<SceneModel>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let tile = meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(0.5)));

    let property_materials: Vec<Handle<StandardMaterial>> = scene
        .properties()
        .iter()
        .map(|property| {
            materials.add(StandardMaterial {
                base_color: property.colour,
                base_color_texture: property
                    .texture
                    .as_ref()
                    .map(|path| asset_server.load(path.clone())),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })
        })
        .collect();

    for (index, parcel) in scene.parcels().iter().enumerate() {
        let Some(floor) = scene.floor(parcel.floor) else {
            continue;
        };
        let centre = parcel.cell.centre();
        let position = Vec3::new(centre.x, floor.elevation + PARCEL_SURFACE_OFFSET, centre.y);

        commands.spawn((
            Mesh3d(tile.clone()),
            MeshMaterial3d(property_materials[parcel.property].clone()),
            Transform::from_translation(position),
            ParcelTile { parcel: index },
            StateScoped(AppState::Running),
        ));

        commands.spawn((
            Text::new(parcel.owner.clone()),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            ParcelLabel { anchor: position },
            StateScoped(AppState::Running),
        ));
    }

    info!(
        "Spawned {} parcels for {} properties",
        scene.parcels().len(),
        scene.properties().len()
    );
}

/// Project every label anchor to the viewport; hide labels behind the camera.
pub fn update_parcel_labels(
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut labels: Query<(&ParcelLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (label, mut node, mut visibility) in &mut labels {
        match camera.world_to_viewport(camera_transform, label.anchor) {
            Ok(screen) => {
                node.left = Val::Px(screen.x);
                node.top = Val::Px(screen.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            Err(_) => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
