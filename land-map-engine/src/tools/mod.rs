//! Interactive tools operating on the mounted land map.
//!
//! Only marker placement exists today. Tools receive triggers as events and
//! publish results as events; they never draw anything themselves.

/// Marker placement at the highlighted cell, with parcel ownership lookup.
pub mod placement;
