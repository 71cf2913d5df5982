//! Manifest loading and scene construction.
//!
//! The manifest is requested at startup. Once parsed it is validated into a
//! `SceneModel` and the app moves from `Loading` to `Running`.

/// Manifest request and scene model construction.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
