use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};

use crate::engine::core::app_state::{AppState, LandMapSet};
use crate::engine::picking::ray::pointer_to_ndc;

/// Pointer activity on the display surface, in logical pixels.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { position: Vec2, surface_size: Vec2 },
    Left,
}

/// Request to place a marker at the current highlight. Carries no position.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTrigger {
    pub source: TriggerSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Mouse,
    Keyboard,
    Rpc,
}

/// Most recent pointer sample. Older samples in the same frame are dropped.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    sample: Option<(Vec2, Vec2)>,
}

impl PointerPosition {
    pub fn ndc(&self) -> Option<Vec2> {
        let (position, surface_size) = self.sample?;
        pointer_to_ndc(position, surface_size)
    }

    /// Apply an event; returns the updated position.
    pub fn with_event(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Moved {
                position,
                surface_size,
            } => Self {
                sample: Some((position, surface_size)),
            },
            PointerEvent::Left => Self { sample: None },
        }
    }
}

/// Registers pointer/trigger events and the listeners feeding them.
///
/// Listeners run only in `AppState::Running`; leaving that state clears the
/// pointer so nothing stale survives a remount.
pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerPosition>()
            .add_event::<PointerEvent>()
            .add_event::<PlacementTrigger>()
            .add_systems(
                Update,
                (
                    forward_window_pointer_events,
                    track_pointer,
                    forward_click_triggers,
                )
                    .chain()
                    .in_set(LandMapSet::Input)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), clear_pointer);
    }
}

/// Translate window cursor events into `PointerEvent`s.
pub fn forward_window_pointer_events(
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer_events: EventWriter<PointerEvent>,
) {
    let primary = windows.single().ok();

    for event in cursor_moved.read() {
        let Some(window) = primary.filter(|_| windows.contains(event.window)) else {
            continue;
        };
        pointer_events.write(PointerEvent::Moved {
            position: event.position,
            surface_size: window.size(),
        });
    }

    if cursor_left.read().last().is_some() {
        pointer_events.write(PointerEvent::Left);
    }
}

/// Keep only the latest pointer sample.
pub fn track_pointer(
    mut pointer_events: EventReader<PointerEvent>,
    mut pointer: ResMut<PointerPosition>,
) {
    let next = pointer_events
        .read()
        .fold(*pointer, |position, event| position.with_event(*event));
    pointer.set_if_neq(next);
}

/// Left click places a marker. Native builds also accept Enter.
pub fn forward_click_triggers(
    mouse: Res<ButtonInput<MouseButton>>,
    #[cfg(not(target_arch = "wasm32"))] keyboard: Res<ButtonInput<KeyCode>>,
    mut triggers: EventWriter<PlacementTrigger>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        triggers.write(PlacementTrigger {
            source: TriggerSource::Mouse,
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if keyboard.just_pressed(KeyCode::Enter) {
            triggers.write(PlacementTrigger {
                source: TriggerSource::Keyboard,
            });
        }
    }
}

fn clear_pointer(mut pointer: ResMut<PointerPosition>) {
    *pointer = PointerPosition::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_move_wins() {
        let size = Vec2::new(800.0, 600.0);
        let position = [
            PointerEvent::Moved {
                position: Vec2::new(10.0, 10.0),
                surface_size: size,
            },
            PointerEvent::Moved {
                position: Vec2::new(400.0, 300.0),
                surface_size: size,
            },
        ]
        .into_iter()
        .fold(PointerPosition::default(), PointerPosition::with_event);

        assert_eq!(position.ndc(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_leaving_clears_pointer() {
        let position = PointerPosition::default()
            .with_event(PointerEvent::Moved {
                position: Vec2::new(1.0, 1.0),
                surface_size: Vec2::splat(2.0),
            })
            .with_event(PointerEvent::Left);
        assert_eq!(position.ndc(), None);
    }

    #[test]
    fn test_track_pointer_system_applies_events_in_order() {
        let mut app = App::new();
        app.init_resource::<PointerPosition>()
            .add_event::<PointerEvent>()
            .add_systems(Update, track_pointer);

        app.world_mut().send_event(PointerEvent::Moved {
            position: Vec2::new(0.0, 0.0),
            surface_size: Vec2::splat(100.0),
        });
        app.world_mut().send_event(PointerEvent::Moved {
            position: Vec2::new(100.0, 100.0),
            surface_size: Vec2::splat(100.0),
        });
        app.update();

        let pointer = app.world().resource::<PointerPosition>();
        assert_eq!(pointer.ndc(), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn test_click_and_enter_each_queue_one_trigger() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<PlacementTrigger>()
            .add_systems(Update, forward_click_triggers);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Enter);
        app.update();

        let sources: Vec<TriggerSource> = app
            .world_mut()
            .resource_mut::<Events<PlacementTrigger>>()
            .drain()
            .map(|trigger| trigger.source)
            .collect();
        assert_eq!(sources, vec![TriggerSource::Mouse, TriggerSource::Keyboard]);
    }
}
