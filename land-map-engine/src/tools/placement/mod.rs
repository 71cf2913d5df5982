//! Marker placement on the highlighted cell.
//!
//! ## Flow
//!
//! ```text
//! PlacementTrigger (mouse, keyboard, RPC)
//!   └─> handle_placement_triggers()
//!       └─> PlacementController::place_marker_at_highlight()
//!           ├─> Rejected(NoActiveHighlight)    highlight inactive
//!           ├─> Rejected(CellAlreadyOccupied)  (x, z) already marked, any floor
//!           └─> Placed { marker, owner }       owner from parcel lookup
//!       └─> PlacementOutcome event
//!           ├─> native status text
//!           └─> RPC notification
//! ```
//!
//! The controller returns results only. Feedback (status text, owner alerts in
//! the frontend) hangs off `PlacementOutcome`.

/// Marker collection and the uniqueness gate.
pub mod controller;

/// Marker, result and outcome types.
pub mod state;

/// Trigger handling systems.
pub mod systems;

/// Native status overlay for placement feedback.
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, LandMapSet};

pub use controller::PlacementController;
pub use state::{Marker, PlacementOutcome, PlacementRejection, PlacementResult};

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementController>()
            .add_event::<PlacementOutcome>()
            .add_systems(
                Update,
                systems::handle_placement_triggers
                    .in_set(LandMapSet::Placement)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), systems::reset_placements);

        // Status overlay only for native builds; the web frontend renders its own.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(OnEnter(AppState::Running), ui::spawn_placement_status)
                .add_systems(
                    Update,
                    ui::reflect_placement_outcome
                        .in_set(LandMapSet::Presentation)
                        .run_if(in_state(AppState::Running)),
                );
        }
    }
}
