//! Diagnostics systems shared by native and web builds.

/// Frame rate overlay (native) and `fps_update` notifications (web).
pub mod fps_tracking;
