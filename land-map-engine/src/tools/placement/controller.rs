use std::collections::HashSet;

use bevy::prelude::*;

use super::state::{Marker, PlacementRejection, PlacementResult};
use crate::engine::picking::highlight::HighlightState;
use crate::engine::scene::model::{Cell, SceneModel};

/// Owns the marker collection. Append-only; the occupied-cell check is the
/// only gate.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlacementController {
    markers: Vec<Marker>,
    occupied: HashSet<Cell>,
    next_id: u32,
}

impl PlacementController {
    /// Place a marker at the highlighted cell.
    ///
    /// Occupancy is keyed on (x, z) only, so a marker on any floor blocks the
    /// same column on every other floor. The parcel owner lookup only enriches
    /// a successful result.
    pub fn place_marker_at_highlight(
        &mut self,
        highlight: &HighlightState,
        scene: &SceneModel,
    ) -> PlacementResult {
        let Some(cell) = highlight.active_cell() else {
            return PlacementResult::Rejected(PlacementRejection::NoActiveHighlight);
        };
        if self.is_occupied(cell) {
            return PlacementResult::Rejected(PlacementRejection::CellAlreadyOccupied);
        }

        let marker = Marker {
            id: self.next_id,
            cell,
            floor: highlight.floor(),
            position: highlight.visual_centre(),
        };
        self.next_id += 1;
        self.occupied.insert(cell);
        self.markers.push(marker.clone());

        let owner = scene
            .owner_at(highlight.floor(), cell)
            .map(str::to_string);
        PlacementResult::Placed { marker, owner }
    }

    /// Markers in placement order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }
}
