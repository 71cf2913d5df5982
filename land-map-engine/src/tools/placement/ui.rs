use bevy::prelude::*;
use constants::render_settings::OVERLAY_FONT_SIZE;

use super::state::{PlacementOutcome, PlacementRejection, PlacementResult};
use crate::engine::core::app_state::AppState;

#[derive(Component)]
pub struct PlacementStatusText;

/// Native status line for the last placement attempt.
pub fn spawn_placement_status(mut commands: Commands) {
    commands.spawn((
        Text::new("Click a cell to place a marker"),
        TextFont {
            font_size: OVERLAY_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        PlacementStatusText,
        StateScoped(AppState::Running),
    ));
}

pub fn reflect_placement_outcome(
    mut outcomes: EventReader<PlacementOutcome>,
    mut status: Query<&mut Text, With<PlacementStatusText>>,
) {
    let Some(outcome) = outcomes.read().last() else {
        return;
    };
    let Ok(mut text) = status.single_mut() else {
        return;
    };
    text.0 = status_message(&outcome.result);
}

pub fn status_message(result: &PlacementResult) -> String {
    match result {
        PlacementResult::Placed { marker, owner: Some(owner) } => format!(
            "Marker placed at ({}, {}). This land belongs to {}",
            marker.cell.x, marker.cell.z, owner
        ),
        PlacementResult::Placed { marker, owner: None } => {
            format!("Marker placed at ({}, {})", marker.cell.x, marker.cell.z)
        }
        PlacementResult::Rejected(PlacementRejection::CellAlreadyOccupied) => {
            "A marker already stands on this cell".to_string()
        }
        PlacementResult::Rejected(PlacementRejection::NoActiveHighlight) => {
            "Point at a floor cell first".to_string()
        }
    }
}
