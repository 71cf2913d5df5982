//! Scene-load data.
//!
//! The land manifest is a JSON document loaded through Bevy's asset server,
//! so native and wasm builds read it the same way.

/// Map settings plus the property records to place on the grid.
pub mod land_manifest;
