/// Flat grid lines drawn on every floor
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::view::NoFrustumCulling;
use constants::render_settings::GRID_LINE_COLOUR;

use super::model::{Floor, SceneModel};
use crate::engine::core::app_state::AppState;
use crate::engine::picking::surface::{PickSurface, SurfaceKind};

#[derive(Component)]
pub struct FloorGrid {
    pub floor: usize,
}

/// Spawn one line mesh per floor.
pub fn create_floor_grids(
    mut commands: Commands,
    scene: Res<SceneModel>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let grid_material = materials.add(StandardMaterial {
        base_color: GRID_LINE_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for floor in scene.floors() {
        commands.spawn((
            Mesh3d(meshes.add(create_grid_mesh(floor))),
            MeshMaterial3d(grid_material.clone()),
            Visibility::Visible,
            NoFrustumCulling,
            Transform::IDENTITY,
            FloorGrid { floor: floor.index },
            // Helpers are never picked; the floor plane below carries the hit.
            PickSurface {
                kind: SurfaceKind::Helper,
                ..PickSurface::floor(floor)
            },
            StateScoped(AppState::Running),
        ));
    }
}

/// Line list covering the floor, one line per cell edge on each axis.
pub fn create_grid_mesh(floor: &Floor) -> Mesh {
    let (vertices, indices) = grid_line_geometry(floor);

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

fn grid_line_geometry(floor: &Floor) -> (Vec<[f32; 3]>, Vec<u32>) {
    let (min, max) = (floor.min(), floor.max());
    let lines_x = floor.size.x.ceil() as u32;
    let lines_z = floor.size.y.ceil() as u32;
    let y = floor.elevation;

    let mut vertices = Vec::with_capacity(((lines_x + 1) + (lines_z + 1)) as usize * 2);

    // Lines running along Z at fixed X positions
    for i in 0..=lines_x {
        let x = (min.x + i as f32).min(max.x);
        vertices.push([x, y, min.y]);
        vertices.push([x, y, max.y]);
    }

    // Lines running along X at fixed Z positions
    for i in 0..=lines_z {
        let z = (min.y + i as f32).min(max.y);
        vertices.push([min.x, y, z]);
        vertices.push([max.x, y, z]);
    }

    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lines_cover_every_cell_edge() {
        let floor = Floor {
            index: 1,
            elevation: 4.0,
            size: Vec2::splat(20.0),
        };
        let (vertices, indices) = grid_line_geometry(&floor);

        assert_eq!(vertices.len(), 2 * 21 * 2);
        assert_eq!(indices.len(), vertices.len());
        assert!(vertices.iter().all(|v| v[1] == 4.0));
        assert_eq!(vertices[0], [-10.0, 4.0, -10.0]);
        assert_eq!(vertices[41], [10.0, 4.0, 10.0]);
        assert_eq!(vertices.last(), Some(&[10.0, 4.0, 10.0]));
    }
}
