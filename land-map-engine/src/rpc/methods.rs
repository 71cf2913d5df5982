use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::engine::input::pointer::{PlacementTrigger, TriggerSource};
use crate::engine::picking::highlight::HighlightState;
use crate::engine::scene::model::{Cell, SceneModel};
use crate::rpc::notifications::{highlight_payload, markers_payload, properties_payload};
use crate::rpc::web_rpc::{RpcError, RpcRequest, RpcResponse, create_error_response};
use crate::tools::placement::PlacementController;

/// Read-only view of the world an RPC request is answered from.
pub struct RpcContext<'a> {
    /// `None` until the manifest has been loaded.
    pub scene: Option<&'a SceneModel>,
    pub controller: &'a PlacementController,
    pub highlight: &'a HighlightState,
    pub fps: f32,
}

/// Dispatch one request. Placement requests are pushed to `triggers` and run
/// through the regular placement system; their outcome arrives as a
/// notification.
///
/// Requests without an ID are notifications: they run but get no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    triggers: &mut Vec<PlacementTrigger>,
) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        let id = request.id.clone()?;
        return Some(create_error_response(
            id,
            -32600,
            "Invalid request",
            Some(json!({ "jsonrpc": request.jsonrpc })),
        ));
    }

    let result = match request.method.as_str() {
        "get_properties" => handle_get_properties(context),
        "get_markers" => Ok(markers_payload(context.controller)),
        "get_highlight" => Ok(highlight_payload(context.highlight)),
        "place_marker" => handle_place_marker(context, triggers),
        "map_to_grid" => handle_map_to_grid(&request.params, context),
        "get_fps" => Ok(json!({ "fps": context.fps })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(json!({ "method": request.method })),
            ));
        }
    };

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn loaded_scene<'a>(context: &RpcContext<'a>) -> Result<&'a SceneModel, RpcError> {
    context
        .scene
        .ok_or_else(|| RpcError::internal_error("Scene not loaded"))
}

fn handle_get_properties(context: &RpcContext) -> Result<Value, RpcError> {
    Ok(properties_payload(loaded_scene(context)?))
}

fn handle_place_marker(
    context: &RpcContext,
    triggers: &mut Vec<PlacementTrigger>,
) -> Result<Value, RpcError> {
    loaded_scene(context)?;
    triggers.push(PlacementTrigger {
        source: TriggerSource::Rpc,
    });
    info!("Placement trigger queued from RPC");

    Ok(json!({
        "queued": true,
        "highlight": highlight_payload(context.highlight),
    }))
}

/// Convert real map coordinates to grid units and the containing cell.
fn handle_map_to_grid(params: &Value, context: &RpcContext) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct MapToGridParams {
        x: f32,
        z: f32,
    }

    let parsed = serde_json::from_value::<MapToGridParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'x' and 'z' parameters"))?;
    let grid = loaded_scene(context)?
        .mapper()
        .to_grid(Vec2::new(parsed.x, parsed.z));
    let cell = Cell::containing(grid);

    Ok(json!({
        "x": grid.x,
        "z": grid.y,
        "cell": { "x": cell.x, "z": cell.z },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mapping::CoordinateMapper;
    use crate::engine::scene::model::FloorLayout;

    fn request(method: &str, params: Value, id: Option<i64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(Value::from),
        }
    }

    fn scene() -> SceneModel {
        SceneModel::new(CoordinateMapper::default(), FloorLayout::default(), &[]).unwrap()
    }

    #[test]
    fn test_place_marker_queues_rpc_trigger() {
        let scene = scene();
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: Some(&scene),
            controller: &controller,
            highlight: &highlight,
            fps: 60.0,
        };
        let mut triggers = Vec::new();

        let response =
            handle_rpc_request(&request("place_marker", Value::Null, Some(7)), &context, &mut triggers)
                .unwrap();

        assert_eq!(response.id, Some(Value::from(7)));
        assert_eq!(response.result.unwrap()["queued"], true);
        assert_eq!(
            triggers,
            vec![PlacementTrigger {
                source: TriggerSource::Rpc
            }]
        );
    }

    #[test]
    fn test_notification_runs_without_response() {
        let scene = scene();
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: Some(&scene),
            controller: &controller,
            highlight: &highlight,
            fps: 0.0,
        };
        let mut triggers = Vec::new();

        let response =
            handle_rpc_request(&request("place_marker", Value::Null, None), &context, &mut triggers);

        assert!(response.is_none());
        assert_eq!(triggers.len(), 1);
    }

    #[test]
    fn test_requests_before_load_report_internal_error() {
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: None,
            controller: &controller,
            highlight: &highlight,
            fps: 0.0,
        };
        let mut triggers = Vec::new();

        let response =
            handle_rpc_request(&request("place_marker", Value::Null, Some(1)), &context, &mut triggers)
                .unwrap();

        assert_eq!(response.error.unwrap().code, -32603);
        assert!(triggers.is_empty());
    }

    #[test]
    fn test_map_to_grid_returns_cell() {
        let scene = scene();
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: Some(&scene),
            controller: &controller,
            highlight: &highlight,
            fps: 0.0,
        };
        let mut triggers = Vec::new();

        let ok = handle_rpc_request(
            &request("map_to_grid", json!({ "x": 50, "z": 1050 }), Some(2)),
            &context,
            &mut triggers,
        )
        .unwrap();
        let result = ok.result.unwrap();
        assert_eq!(result["x"], -9.5);
        assert_eq!(result["z"], 0.5);
        assert_eq!(result["cell"]["x"], -10);
        assert_eq!(result["cell"]["z"], 0);

        let bad = handle_rpc_request(
            &request("map_to_grid", json!({ "x": "west" }), Some(3)),
            &context,
            &mut triggers,
        )
        .unwrap();
        assert_eq!(bad.error.unwrap().code, -32602);
    }

    #[test]
    fn test_unknown_method_and_bad_version() {
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: None,
            controller: &controller,
            highlight: &highlight,
            fps: 0.0,
        };
        let mut triggers = Vec::new();

        let unknown =
            handle_rpc_request(&request("teleport", Value::Null, Some(4)), &context, &mut triggers)
                .unwrap();
        assert_eq!(unknown.error.unwrap().code, -32601);

        let mut old = request("get_fps", Value::Null, Some(5));
        old.jsonrpc = "1.0".to_string();
        let invalid = handle_rpc_request(&old, &context, &mut triggers).unwrap();
        assert_eq!(invalid.error.unwrap().code, -32600);
    }

    #[test]
    fn test_get_markers_and_highlight_work_before_load() {
        let controller = PlacementController::default();
        let highlight = HighlightState::default();
        let context = RpcContext {
            scene: None,
            controller: &controller,
            highlight: &highlight,
            fps: 0.0,
        };
        let mut triggers = Vec::new();

        let markers =
            handle_rpc_request(&request("get_markers", Value::Null, Some(6)), &context, &mut triggers)
                .unwrap();
        assert_eq!(markers.result.unwrap()["markers"], json!([]));

        let highlight = handle_rpc_request(
            &request("get_highlight", Value::Null, Some(8)),
            &context,
            &mut triggers,
        )
        .unwrap();
        assert_eq!(highlight.result.unwrap()["active"], false);
    }
}
