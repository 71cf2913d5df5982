//! Pointer-to-cell picking.
//!
//! Turns a pointer position into a single highlighted grid cell, even when
//! several transparent floors overlap on screen.
//!
//! ## Pipeline
//!
//! ```text
//! pixel position + surface size
//!   └─> pointer_to_ndc()              [-1, 1], y up
//!       └─> pointer_ray()             perspective unprojection to a Ray3d
//!           └─> intersect_surface()   per PickSurface
//!               └─> filter SurfaceKind::is_pickable()
//!                   └─> select_topmost()  highest elevation wins
//!                       └─> Cell::containing()
//! ```
//!
//! ## Ordering
//!
//! Stacked floors are transparent, so depth order alone would let a lower
//! floor win whenever the camera sees it first. The resolver instead prefers
//! the hit with the highest elevation. Surfaces at equal elevation keep the
//! first hit in traversal order.
//!
//! A ray parallel to every surface, a camera whose matrices are not yet
//! initialised, or a pointer outside the display surface all resolve to no
//! hit. Picking never fails louder than that.

/// `HighlightState` resource and the system that keeps it current.
pub mod highlight;

/// Pointer ray construction from normalised device coordinates.
pub mod ray;

/// Hit collection, filtering, and topmost-floor selection.
pub mod resolve;

/// Horizontal pick surfaces attached to scene entities.
pub mod surface;

pub use highlight::HighlightState;
pub use ray::{CameraState, intersect_surface, pointer_ray, pointer_to_ndc};
pub use resolve::{CellHit, resolve_highlight, select_topmost};
pub use surface::{PickSurface, SurfaceHit, SurfaceKind};

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, LandMapSet};

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HighlightState>()
            .add_systems(
                Update,
                highlight::update_highlight
                    .in_set(LandMapSet::Picking)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), highlight::reset_highlight);
    }
}
