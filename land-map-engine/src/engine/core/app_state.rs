use bevy::prelude::*;

/// Scene lifecycle. Everything interactive lives in `Running`; entities spawned
/// for the scene are scoped to it and despawn when it exits.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Per-frame ordering of the land map pipeline.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandMapSet {
    /// Window and RPC input become pointer state and placement triggers.
    Input,
    /// Pointer state becomes the highlighted cell.
    Picking,
    /// Triggers are resolved against the highlight.
    Placement,
    /// Read-only reflection of model state into meshes, labels and notifications.
    Presentation,
}

#[derive(Component)]
pub struct FpsText;

pub fn configure_land_map_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            LandMapSet::Input,
            LandMapSet::Picking,
            LandMapSet::Placement,
            LandMapSet::Presentation,
        )
            .chain(),
    );
}

pub fn announce_running() {
    println!("→ Land map mounted, listening for pointer input");
}

pub fn announce_unmounted() {
    println!("→ Land map unmounted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn test_scoped_entities_despawn_when_running_exits() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .enable_state_scoped_entities::<AppState>();

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();

        let scoped = app
            .world_mut()
            .spawn(StateScoped(AppState::Running))
            .id();
        let persistent = app.world_mut().spawn_empty().id();

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Loading);
        app.update();

        assert!(app.world().get_entity(scoped).is_err());
        assert!(app.world().get_entity(persistent).is_ok());
    }
}
