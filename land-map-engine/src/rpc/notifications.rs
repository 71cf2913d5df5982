use bevy::prelude::*;
use serde_json::{Value, json};

use crate::engine::picking::highlight::HighlightState;
use crate::engine::scene::model::SceneModel;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::placement::{Marker, PlacementController, PlacementOutcome, PlacementResult};

pub fn marker_payload(marker: &Marker) -> Value {
    json!({
        "id": marker.id,
        "x": marker.cell.x,
        "z": marker.cell.z,
        "floor": marker.floor,
        "position": marker.position.to_array(),
    })
}

pub fn markers_payload(controller: &PlacementController) -> Value {
    json!({
        "markers": controller.markers().iter().map(marker_payload).collect::<Vec<_>>(),
    })
}

pub fn highlight_payload(highlight: &HighlightState) -> Value {
    json!({
        "x": highlight.cell().x,
        "z": highlight.cell().z,
        "floor": highlight.floor(),
        "elevation": highlight.elevation(),
        "active": highlight.is_active(),
    })
}

pub fn properties_payload(scene: &SceneModel) -> Value {
    let properties: Vec<Value> = scene
        .properties()
        .iter()
        .enumerate()
        .map(|(index, property)| {
            let lands: Vec<Value> = scene
                .parcels()
                .iter()
                .filter(|parcel| parcel.property == index)
                .map(|parcel| {
                    json!({
                        "x": parcel.cell.x,
                        "z": parcel.cell.z,
                        "floor": parcel.floor,
                        "centre": parcel.centre.to_array(),
                    })
                })
                .collect();
            json!({
                "owner": property.owner,
                "colour": property.colour.to_srgba().to_hex(),
                "texture": property.texture,
                "lands": lands,
            })
        })
        .collect();

    json!({ "properties": properties })
}

pub fn scene_summary(scene: &SceneModel) -> Value {
    let parameters = scene.mapper().parameters();
    json!({
        "floors": scene.floors().len(),
        "properties": scene.properties().len(),
        "parcels": scene.parcels().len(),
        "grid_length": parameters.grid_length,
        "real_extent": [parameters.real_extent_x, parameters.real_extent_z],
    })
}

/// Forward placement outcomes. Rejections carry the reason code.
pub fn publish_placement_outcomes(
    mut outcomes: EventReader<PlacementOutcome>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for outcome in outcomes.read() {
        let source = format!("{:?}", outcome.source).to_lowercase();
        match &outcome.result {
            PlacementResult::Placed { marker, owner } => {
                let mut params = marker_payload(marker);
                params["owner"] = json!(owner);
                params["source"] = json!(source);
                rpc_interface.send_notification("marker_placed", params);
            }
            PlacementResult::Rejected(reason) => {
                rpc_interface.send_notification(
                    "placement_rejected",
                    json!({ "reason": reason.as_str(), "source": source }),
                );
            }
        }
    }
}

pub fn publish_highlight_changes(
    highlight: Res<HighlightState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if highlight.is_changed() && !highlight.is_added() {
        rpc_interface.send_notification("highlight_changed", highlight_payload(&highlight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::land_manifest::{LandRecord, PropertyRecord};
    use crate::engine::input::pointer::TriggerSource;
    use crate::engine::mapping::CoordinateMapper;
    use crate::engine::scene::model::{Cell, FloorLayout};
    use crate::tools::placement::PlacementRejection;

    #[test]
    fn test_properties_payload_groups_lands_by_owner() {
        let records = [PropertyRecord {
            owner: "alice".to_string(),
            lands: vec![
                LandRecord { x: 1050.0, z: 1050.0, floor: 0 },
                LandRecord { x: 50.0, z: 50.0, floor: 1 },
            ],
            colour: Some([1.0, 0.0, 0.0]),
            texture: None,
        }];
        let scene =
            SceneModel::new(CoordinateMapper::default(), FloorLayout::default(), &records)
                .unwrap();

        let payload = properties_payload(&scene);
        let alice = &payload["properties"][0];
        assert_eq!(alice["owner"], "alice");
        assert!(
            alice["colour"]
                .as_str()
                .unwrap()
                .to_uppercase()
                .starts_with("#FF0000")
        );
        assert_eq!(alice["lands"].as_array().unwrap().len(), 2);
        assert_eq!(alice["lands"][1]["x"], -10);
        assert_eq!(alice["lands"][1]["floor"], 1);
    }

    #[test]
    fn test_outcomes_become_notifications() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .add_event::<PlacementOutcome>()
            .add_systems(Update, publish_placement_outcomes);

        let marker = Marker {
            id: 0,
            cell: Cell::new(1, 2),
            floor: 0,
            position: Vec3::new(1.5, 0.0, 2.5),
        };
        app.world_mut().send_event(PlacementOutcome {
            result: PlacementResult::Placed {
                marker,
                owner: Some("alice".to_string()),
            },
            source: TriggerSource::Mouse,
        });
        app.world_mut().send_event(PlacementOutcome {
            result: PlacementResult::Rejected(PlacementRejection::CellAlreadyOccupied),
            source: TriggerSource::Rpc,
        });
        app.update();

        let sent = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, "marker_placed");
        assert_eq!(sent[0].params["owner"], "alice");
        assert_eq!(sent[0].params["x"], 1);
        assert_eq!(sent[0].params["source"], "mouse");
        assert_eq!(sent[1].method, "placement_rejected");
        assert_eq!(sent[1].params["reason"], "cell_already_occupied");
    }
}
