//! Window input translated into the engine's pointer and trigger events.
//!
//! The picking and placement systems only ever see `PointerEvent` and
//! `PlacementTrigger`; where those come from (window cursor, mouse button,
//! keyboard, RPC) stays here and in `rpc`. All listeners are registered by
//! `PointerInputPlugin` and only run while the scene is mounted.

/// Pointer and trigger events, latest pointer position, and window adapters.
pub mod pointer;

pub use pointer::{PlacementTrigger, PointerEvent, PointerInputPlugin, PointerPosition, TriggerSource};
