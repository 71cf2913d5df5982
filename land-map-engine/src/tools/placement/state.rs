use bevy::prelude::*;

use crate::engine::input::pointer::TriggerSource;
use crate::engine::scene::model::Cell;

/// A placed marker. Never moves once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: u32,
    pub cell: Cell,
    pub floor: usize,
    /// Cell centre on the floor's elevation.
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRejection {
    NoActiveHighlight,
    CellAlreadyOccupied,
}

impl PlacementRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoActiveHighlight => "no_active_highlight",
            Self::CellAlreadyOccupied => "cell_already_occupied",
        }
    }
}

/// Outcome of a placement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementResult {
    /// `owner` is set when the cell belongs to a parcel on the same floor.
    Placed { marker: Marker, owner: Option<String> },
    Rejected(PlacementRejection),
}

impl PlacementResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Placed { owner, .. } => owner.as_deref(),
            Self::Rejected(_) => None,
        }
    }
}

/// Emitted after every trigger so presentation can react (status text, RPC).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub result: PlacementResult,
    pub source: TriggerSource,
}
