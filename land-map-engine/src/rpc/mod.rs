//! JSON-RPC 2.0 communication layer for the web frontend.
//!
//! Implements bidirectional messaging between the Bevy engine and its host page
//! via iframe postMessage, supporting both request-response and notification
//! patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Frontend (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error (also used while the scene is not loaded)
//!
//! ## Methods
//!
//! - `get_properties`: owners with their colour, texture and lands
//! - `get_markers`: placed markers in placement order
//! - `get_highlight`: current highlighted cell and whether it is active
//! - `place_marker`: queue a placement at the current highlight
//! - `map_to_grid`: convert real map `{ x, z }` to grid units and cell
//! - `get_fps`: current frame rate
//!
//! ## Notifications
//!
//! - `scene_loaded` / `scene_load_failed`
//! - `highlight_changed`
//! - `marker_placed` (with the parcel owner, if any) / `placement_rejected`
//! - `fps_update`

/// Request handlers for the land map methods.
pub mod methods;

/// Payload builders and the systems pushing state changes to the frontend.
pub mod notifications;

/// JSON-RPC 2.0 transport, message types and WASM message listener.
pub mod web_rpc;
