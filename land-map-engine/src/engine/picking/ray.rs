use bevy::prelude::*;
use bevy::render::camera::CameraProjection;

use super::surface::{PickSurface, SurfaceHit};

/// Normalise a pixel position on the display surface to NDC.
///
/// Screen y grows downward, NDC y grows upward. Returns `None` for an empty
/// surface or a pointer outside it.
pub fn pointer_to_ndc(pixel: Vec2, surface_size: Vec2) -> Option<Vec2> {
    if !(surface_size.x > 0.0 && surface_size.y > 0.0) {
        return None;
    }
    if pixel.x < 0.0 || pixel.y < 0.0 || pixel.x > surface_size.x || pixel.y > surface_size.y {
        return None;
    }
    let normalised = pixel / surface_size;
    Some(Vec2::new(normalised.x * 2.0 - 1.0, 1.0 - normalised.y * 2.0))
}

/// Camera matrices needed to unproject a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub world_from_view: Mat4,
    pub clip_from_view: Mat4,
}

impl CameraState {
    /// Built from the projection component rather than the render camera, so
    /// the matrices are available before the first frame is extracted.
    pub fn new(projection: &Projection, transform: &GlobalTransform) -> Self {
        Self {
            world_from_view: transform.compute_matrix(),
            clip_from_view: projection.get_clip_from_view(),
        }
    }
}

/// Perspective unprojection of an NDC pointer position into a world ray.
///
/// The near-plane point is taken at clip depth 1.0, which lies in front of
/// the eye for both reversed and conventional depth ranges. Returns `None`
/// while the camera matrices are degenerate.
pub fn pointer_ray(ndc: Vec2, camera: &CameraState) -> Option<Ray3d> {
    let determinant = camera.clip_from_view.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return None;
    }

    let view_from_clip = camera.clip_from_view.inverse();
    let through_view = view_from_clip.project_point3(ndc.extend(1.0));

    let origin = camera.world_from_view.transform_point3(Vec3::ZERO);
    let through = camera.world_from_view.transform_point3(through_view);
    if !origin.is_finite() || !through.is_finite() {
        return None;
    }
    let direction = Dir3::new(through - origin).ok()?;

    Some(Ray3d::new(origin, direction))
}

/// Intersect a ray with a bounded horizontal surface. Parallel rays and hits
/// behind the origin are misses.
pub fn intersect_surface(ray: Ray3d, surface: &PickSurface) -> Option<SurfaceHit> {
    let distance =
        ray.intersect_plane(Vec3::Y * surface.elevation, InfinitePlane3d::new(Vec3::Y))?;

    let point = ray.get_point(distance);
    surface.contains(point.xz()).then_some(SurfaceHit {
        surface: *surface,
        point,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::picking::surface::SurfaceKind;

    fn camera(transform: Transform) -> CameraState {
        CameraState {
            world_from_view: transform.compute_matrix(),
            clip_from_view: Mat4::perspective_infinite_reverse_rh(45f32.to_radians(), 1.0, 0.1),
        }
    }

    fn ground(elevation: f32) -> PickSurface {
        PickSurface {
            kind: SurfaceKind::Floor,
            floor: 0,
            elevation,
            min: Vec2::splat(-10.0),
            max: Vec2::splat(10.0),
        }
    }

    #[test]
    fn test_pointer_to_ndc_inverts_y() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(Vec2::new(400.0, 300.0), size), Some(Vec2::ZERO));
        assert_eq!(pointer_to_ndc(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(
            pointer_to_ndc(Vec2::new(600.0, 150.0), size),
            Some(Vec2::new(0.5, 0.5))
        );
    }

    #[test]
    fn test_pointer_to_ndc_rejects_empty_surface_and_outside_pointer() {
        assert_eq!(pointer_to_ndc(Vec2::ZERO, Vec2::ZERO), None);
        assert_eq!(pointer_to_ndc(Vec2::new(-1.0, 5.0), Vec2::splat(100.0)), None);
        assert_eq!(pointer_to_ndc(Vec2::new(5.0, 101.0), Vec2::splat(100.0)), None);
    }

    #[test]
    fn test_centre_ray_points_along_view_direction() {
        let transform = Transform::from_xyz(0.5, 10.0, 0.5)
            .looking_at(Vec3::new(0.5, 0.0, 0.5), Vec3::NEG_Z);
        let ray = pointer_ray(Vec2::ZERO, &camera(transform)).unwrap();

        assert!((ray.origin - Vec3::new(0.5, 10.0, 0.5)).length() < 1e-4);
        assert!((*ray.direction - Vec3::NEG_Y).length() < 1e-4);
    }

    #[test]
    fn test_conventional_depth_range_gives_same_ray() {
        let transform = Transform::from_xyz(3.0, 8.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y);
        let reversed = pointer_ray(Vec2::new(0.3, -0.2), &camera(transform)).unwrap();
        let conventional = pointer_ray(
            Vec2::new(0.3, -0.2),
            &CameraState {
                world_from_view: transform.compute_matrix(),
                clip_from_view: Mat4::perspective_rh_gl(45f32.to_radians(), 1.0, 0.1, 1000.0),
            },
        )
        .unwrap();

        assert!((*reversed.direction - *conventional.direction).length() < 1e-4);
    }

    #[test]
    fn test_ray_hits_plane_below() {
        let transform = Transform::from_xyz(0.5, 10.0, 0.5)
            .looking_at(Vec3::new(0.5, 0.0, 0.5), Vec3::NEG_Z);
        let ray = pointer_ray(Vec2::ZERO, &camera(transform)).unwrap();
        let hit = intersect_surface(ray, &ground(0.0)).unwrap();

        assert!((hit.point - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-4);
        assert!((hit.distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray3d::new(Vec3::new(0.0, 2.0, 0.0), Dir3::X);
        assert_eq!(intersect_surface(ray, &ground(0.0)), None);
    }

    #[test]
    fn test_surface_behind_origin_misses() {
        let ray = Ray3d::new(Vec3::new(0.0, 2.0, 0.0), Dir3::Y);
        assert_eq!(intersect_surface(ray, &ground(0.0)), None);
    }

    #[test]
    fn test_hit_outside_extent_misses() {
        let ray = Ray3d::new(Vec3::new(25.0, 5.0, 0.0), Dir3::NEG_Y);
        assert_eq!(intersect_surface(ray, &ground(0.0)), None);
    }

    #[test]
    fn test_uninitialised_camera_gives_no_ray() {
        let state = CameraState {
            world_from_view: Mat4::IDENTITY,
            clip_from_view: Mat4::ZERO,
        };
        assert_eq!(pointer_ray(Vec2::ZERO, &state), None);

        let state = CameraState {
            world_from_view: Mat4::ZERO,
            clip_from_view: Mat4::perspective_infinite_reverse_rh(1.0, 1.0, 0.1),
        };
        assert_eq!(pointer_ray(Vec2::ZERO, &state), None);
    }

    #[test]
    fn test_camera_state_reads_projection_component() {
        let projection = Projection::Perspective(PerspectiveProjection {
            fov: 45f32.to_radians(),
            aspect_ratio: 1.0,
            near: 0.1,
            ..default()
        });
        let transform = Transform::from_xyz(0.5, 10.0, 0.5)
            .looking_at(Vec3::new(0.5, 0.0, 0.5), Vec3::NEG_Z);
        let state = CameraState::new(&projection, &GlobalTransform::from(transform));

        let ray = pointer_ray(Vec2::ZERO, &state).unwrap();
        assert!((*ray.direction - Vec3::NEG_Y).length() < 1e-4);
        assert!((ray.origin - Vec3::new(0.5, 10.0, 0.5)).length() < 1e-4);
    }
}
