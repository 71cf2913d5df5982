use bevy::prelude::*;
use constants::render_settings::{
    HIGHLIGHT_ACTIVE_COLOUR, HIGHLIGHT_INACTIVE_COLOUR, HIGHLIGHT_SURFACE_OFFSET,
};

use crate::engine::core::app_state::AppState;
use crate::engine::picking::highlight::HighlightState;
use crate::engine::picking::surface::{PickSurface, SurfaceKind};

#[derive(Component)]
pub struct HighlightQuad {
    active_material: Handle<StandardMaterial>,
    inactive_material: Handle<StandardMaterial>,
}

fn unlit(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn spawn_highlight_quad(
    mut commands: Commands,
    highlight: Res<HighlightState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let active_material = materials.add(unlit(HIGHLIGHT_ACTIVE_COLOUR));
    let inactive_material = materials.add(unlit(HIGHLIGHT_INACTIVE_COLOUR));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(0.5)))),
        MeshMaterial3d(inactive_material.clone()),
        Transform::from_translation(quad_position(&highlight)),
        PickSurface::cell(
            SurfaceKind::Highlight,
            highlight.floor(),
            highlight.elevation(),
            highlight.cell(),
        ),
        HighlightQuad {
            active_material,
            inactive_material,
        },
        StateScoped(AppState::Running),
    ));
}

/// Move the quad to the highlighted cell and dim it when inactive.
pub fn sync_highlight_quad(
    highlight: Res<HighlightState>,
    mut quads: Query<(
        &HighlightQuad,
        &mut Transform,
        &mut MeshMaterial3d<StandardMaterial>,
        &mut PickSurface,
    )>,
) {
    if !highlight.is_changed() {
        return;
    }

    for (quad, mut transform, mut material, mut surface) in &mut quads {
        transform.translation = quad_position(&highlight);
        *surface = PickSurface::cell(
            SurfaceKind::Highlight,
            highlight.floor(),
            highlight.elevation(),
            highlight.cell(),
        );

        let wanted = if highlight.is_active() {
            &quad.active_material
        } else {
            &quad.inactive_material
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

fn quad_position(highlight: &HighlightState) -> Vec3 {
    highlight.visual_centre() + Vec3::Y * HIGHLIGHT_SURFACE_OFFSET
}
