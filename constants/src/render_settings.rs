use bevy::color::Color;
use bevy::math::Vec3;

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(10.0, 15.0, -22.0);
pub const CAMERA_FOCUS_POINT: Vec3 = Vec3::ZERO;
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Orbit distance limits for the viewport camera
pub const CAMERA_MIN_DISTANCE: f32 = 3.0;
pub const CAMERA_MAX_DISTANCE: f32 = 150.0;

pub const GRID_LINE_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
pub const FLOOR_PLANE_COLOUR: Color = Color::srgba(0.35, 0.55, 0.85, 0.08);

pub const HIGHLIGHT_ACTIVE_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);
pub const HIGHLIGHT_INACTIVE_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);

pub const MARKER_RADIUS: f32 = 0.4;
pub const MARKER_COLOUR: Color = Color::srgb(1.0, 0.78, 0.1);

/// Lifts parcel quads above their floor to avoid z-fighting with the floor plane
pub const PARCEL_SURFACE_OFFSET: f32 = 0.01;

/// Lifts the highlight quad above parcels
pub const HIGHLIGHT_SURFACE_OFFSET: f32 = 0.02;

pub const PARCEL_SATURATION: f32 = 0.65;
pub const PARCEL_LIGHTNESS: f32 = 0.5;
pub const PARCEL_ALPHA: f32 = 0.85;

pub const LABEL_FONT_SIZE: f32 = 12.0;
pub const OVERLAY_FONT_SIZE: f32 = 16.0;
