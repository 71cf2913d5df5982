use bevy::prelude::*;

use super::controller::PlacementController;
use super::state::{PlacementOutcome, PlacementResult};
use crate::engine::input::pointer::PlacementTrigger;
use crate::engine::picking::highlight::HighlightState;
use crate::engine::scene::model::SceneModel;

/// Run the placement controller once per trigger and publish each outcome.
pub fn handle_placement_triggers(
    mut triggers: EventReader<PlacementTrigger>,
    highlight: Res<HighlightState>,
    scene: Res<SceneModel>,
    mut controller: ResMut<PlacementController>,
    mut outcomes: EventWriter<PlacementOutcome>,
) {
    for trigger in triggers.read() {
        // Rejections must not flag the marker collection as changed.
        let result = controller
            .bypass_change_detection()
            .place_marker_at_highlight(&highlight, &scene);

        match &result {
            PlacementResult::Placed { marker, owner } => {
                controller.set_changed();
                info!(
                    "Marker {} placed at ({}, {}) on floor {}{}",
                    marker.id,
                    marker.cell.x,
                    marker.cell.z,
                    marker.floor,
                    owner
                        .as_ref()
                        .map(|owner| format!(", land owned by {owner}"))
                        .unwrap_or_default()
                );
            }
            PlacementResult::Rejected(reason) => {
                debug!("Placement via {:?} rejected: {:?}", trigger.source, reason);
            }
        }

        outcomes.write(PlacementOutcome {
            result,
            source: trigger.source,
        });
    }
}

/// Forget markers when the scene is unmounted.
pub fn reset_placements(mut controller: ResMut<PlacementController>) {
    *controller = PlacementController::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::pointer::TriggerSource;
    use crate::engine::mapping::CoordinateMapper;
    use crate::engine::picking::resolve::CellHit;
    use crate::engine::scene::model::{Cell, FloorLayout};
    use crate::tools::placement::state::PlacementRejection;

    fn app_with_highlight(highlight: HighlightState) -> App {
        let scene =
            SceneModel::new(CoordinateMapper::default(), FloorLayout::default(), &[]).unwrap();
        let mut app = App::new();
        app.insert_resource(scene)
            .insert_resource(highlight)
            .init_resource::<PlacementController>()
            .add_event::<PlacementTrigger>()
            .add_event::<PlacementOutcome>()
            .add_systems(Update, handle_placement_triggers);
        app
    }

    fn outcomes(app: &mut App) -> Vec<PlacementOutcome> {
        app.world_mut()
            .resource_mut::<Events<PlacementOutcome>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_each_trigger_yields_one_outcome() {
        let highlight = HighlightState::active_at(&CellHit {
            cell: Cell::new(2, 2),
            floor: 0,
            elevation: 0.0,
            point: Vec3::new(2.5, 0.0, 2.5),
        });
        let mut app = app_with_highlight(highlight);

        for source in [TriggerSource::Mouse, TriggerSource::Rpc] {
            app.world_mut().send_event(PlacementTrigger { source });
        }
        app.update();

        let outcomes = outcomes(&mut app);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_placed());
        assert_eq!(outcomes[0].source, TriggerSource::Mouse);
        assert_eq!(
            outcomes[1].result,
            PlacementResult::Rejected(PlacementRejection::CellAlreadyOccupied)
        );
        assert_eq!(app.world().resource::<PlacementController>().len(), 1);
    }

    #[test]
    fn test_trigger_without_highlight_is_rejected() {
        let mut app = app_with_highlight(HighlightState::default());
        app.world_mut().send_event(PlacementTrigger {
            source: TriggerSource::Keyboard,
        });
        app.update();

        let outcomes = outcomes(&mut app);
        assert_eq!(
            outcomes[0].result,
            PlacementResult::Rejected(PlacementRejection::NoActiveHighlight)
        );
        assert!(app.world().resource::<PlacementController>().is_empty());
    }
}
