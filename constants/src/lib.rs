//! Shared compile-time defaults for the land map engine.
//!
//! Runtime manifests may override the map layout; everything else here is
//! fixed presentation and camera configuration.

pub mod coordinate_system;
pub mod path;
pub mod render_settings;
