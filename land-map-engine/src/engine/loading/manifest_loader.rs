use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::{MANIFEST_FILE_NAME, RELATIVE_MANIFEST_PATH};

use crate::engine::assets::land_manifest::LandManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::model::SceneModel;
use crate::rpc::web_rpc::{WebRpcInterface, scene_summary};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<LandManifest>>,
}

pub fn manifest_path() -> String {
    format!("{}/{}", RELATIVE_MANIFEST_PATH, MANIFEST_FILE_NAME)
}

// Start the loading process
pub fn start_loading(
    mut manifest_loader: ResMut<ManifestLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    let path = manifest_path();
    info!("Loading land manifest from {}", path);
    manifest_loader.handle = Some(asset_server.load(path));
    loading_progress.manifest_requested = true;
}

/// Build the scene model once the manifest is parsed, then mount the scene.
///
/// Invalid map settings are fatal and exit the app. A manifest that fails to
/// load or parse is reported once and leaves the app in `Loading`.
pub fn build_scene_when_ready(
    manifest_loader: Res<ManifestLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<LandManifest>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
    mut commands: Commands,
) {
    if loading_progress.is_settled() {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let Some(manifest) = manifests.get(handle) else {
        if let Some(LoadState::Failed(load_error)) = asset_server.get_load_state(handle.id()) {
            error!("Failed to load land manifest {}: {}", manifest_path(), load_error);
            rpc_interface.send_notification(
                "scene_load_failed",
                serde_json::json!({ "error": load_error.to_string() }),
            );
            loading_progress.load_failed = true;
        }
        return;
    };
    loading_progress.manifest_loaded = true;

    match SceneModel::from_manifest(manifest) {
        Ok(scene) => {
            println!(
                "✓ Land manifest loaded: {} properties, {} of {} lands placed on {} floors",
                scene.properties().len(),
                scene.parcels().len(),
                manifest.land_count(),
                scene.floors().len()
            );
            rpc_interface.send_notification("scene_loaded", scene_summary(&scene));
            commands.insert_resource(scene);
            loading_progress.scene_built = true;
            next_state.set(AppState::Running);
        }
        Err(configuration_error) => {
            error!("Invalid land map configuration: {}", configuration_error);
            loading_progress.load_failed = true;
            exit.write(AppExit::error());
        }
    }
}
