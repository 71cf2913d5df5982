use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOCUS_POINT, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION,
};

// Crate engine modules
use crate::engine::assets::land_manifest::LandManifest;
use crate::engine::camera::{ViewportCamera, camera_controller};
use crate::engine::core::app_state::{
    AppState, FpsText, announce_running, announce_unmounted, configure_land_map_sets,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::PointerInputPlugin;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, build_scene_when_ready, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::picking::PickingPlugin;
use crate::engine::scene::LandScenePlugin;
use crate::engine::systems::fps_tracking::fps_notification_system;
// Crate tools modules
use crate::tools::placement::PlacementPlugin;
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .enable_state_scoped_entities::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers LandManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<LandManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(PointerInputPlugin)
        .add_plugins(PickingPlugin)
        .add_plugins(PlacementPlugin)
        .add_plugins(LandScenePlugin);

    configure_land_map_sets(&mut app);

    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            build_scene_when_ready.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), announce_running)
        .add_systems(OnExit(AppState::Running), announce_unmounted);

    app.add_systems(
        Update,
        (camera_controller, fps_notification_system).run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn create_viewport_camera(commands: &mut Commands) {
    let viewport = ViewportCamera::from_position(CAMERA_START_POSITION, CAMERA_FOCUS_POINT);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(viewport.eye()).with_rotation(viewport.rotation()),
    ));
    commands.insert_resource(viewport);
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    create_viewport_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: constants::render_settings::OVERLAY_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
