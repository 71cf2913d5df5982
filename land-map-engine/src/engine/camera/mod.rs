//! Viewport camera for navigating the land map.
//!
//! Orbit around a focus point with right-drag, zoom with the wheel and pan
//! with WASD. Picking reads the camera entity's transform, so any motion here
//! also refreshes the highlight.

/// Orbit camera resource and controller system.
pub mod viewport_camera;

pub use viewport_camera::{ViewportCamera, camera_controller};
