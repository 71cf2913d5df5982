use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use constants::render_settings::{CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE};

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;

/// Orbit camera target. The camera entity eases towards `eye()` every frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: 30.0,
            yaw: 0.0,
            pitch: -0.6,
        }
    }
}

impl ViewportCamera {
    /// Orbit that places the eye at `position` looking at `focus`.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let length = offset.length();
        if length <= f32::EPSILON {
            return Self {
                focus_point: focus,
                ..default()
            };
        }

        let direction = offset / length;
        Self {
            focus_point: focus,
            distance: length.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE),
            yaw: direction.x.atan2(direction.z),
            pitch: (-direction.y.asin()).clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.rotation() * Vec3::Z * self.distance
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `amount` moves towards the focus point.
    pub fn zoom(&mut self, amount: f32) {
        let factor = (1.0 - amount * 0.1).max(0.1);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Pan the focus point on the horizontal plane, relative to the view heading.
    pub fn pan(&mut self, input: Vec2, amount: f32) {
        let heading = Quat::from_rotation_y(self.yaw);
        let right = heading * Vec3::X;
        let forward = heading * Vec3::NEG_Z;
        let delta = right * input.x + forward * input.y;
        if delta != Vec3::ZERO {
            self.focus_point += delta.normalize() * amount;
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        viewport.orbit(mouse_delta);
    }

    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll.abs() > f32::EPSILON {
        viewport.zoom(scroll);
    }

    let mut move_input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }

    if move_input != Vec2::ZERO {
        // Shift = faster, ctrl = slower
        let mut speed = (viewport.distance * 0.5).clamp(2.0, 50.0);
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.5;
        }
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }
        viewport.pan(move_input, speed * time.delta_secs());
    }

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(viewport.eye(), lerp_speed);
    camera_transform.rotation = camera_transform
        .rotation
        .slerp(viewport.rotation(), lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_reproduces_eye() {
        let start = Vec3::new(10.0, 15.0, -22.0);
        let viewport = ViewportCamera::from_position(start, Vec3::ZERO);
        assert!((viewport.eye() - start).length() < 1e-3);
    }

    #[test]
    fn test_orbit_rotation_looks_at_focus() {
        let viewport = ViewportCamera::from_position(Vec3::new(10.0, 15.0, -22.0), Vec3::ZERO);
        let forward = viewport.rotation() * Vec3::NEG_Z;
        let to_focus = (viewport.focus_point - viewport.eye()).normalize();
        assert!(forward.dot(to_focus) > 0.9999);
    }

    #[test]
    fn test_zoom_and_pitch_are_clamped() {
        let mut viewport = ViewportCamera::default();
        for _ in 0..100 {
            viewport.zoom(5.0);
        }
        assert_eq!(viewport.distance, CAMERA_MIN_DISTANCE);

        viewport.orbit(Vec2::new(0.0, 10_000.0));
        assert_eq!(viewport.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_pan_stays_horizontal() {
        let mut viewport = ViewportCamera::default();
        viewport.pan(Vec2::new(1.0, 1.0), 2.0);
        assert_eq!(viewport.focus_point.y, 0.0);
        assert!((viewport.focus_point.length() - 2.0).abs() < 1e-5);
    }
}
