//! Look-at camera for the map view.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Move both position and look-at a fraction `t` of the way toward `target`.
    pub fn lerp(&self, target: &CameraPose, t: f32) -> Self {
        Self {
            position: self.position.lerp(target.position, t),
            look_at: self.look_at.lerp(target.look_at, t),
        }
    }

    /// Distance between the two camera positions (look-at ignored).
    pub fn distance_to(&self, other: &CameraPose) -> f32 {
        self.position.distance(other.position)
    }
}

/// Perspective camera described by a look-at pose.
#[derive(Debug, Clone)]
pub struct Camera {
    pub pose: CameraPose,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: CameraPose::new(Vec3::new(0.0, 12.0, 18.0), Vec3::ZERO),
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given pose.
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on viewport resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.pose.position;
        let mut target = self.pose.look_at;
        if eye.distance_squared(target) < 1e-8 {
            target = eye - Vec3::Z;
        }
        let forward = (target - eye).normalize();
        // Looking straight up or down: Y is degenerate as an up vector.
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(eye, target, up)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Unit direction the camera is facing.
    pub fn forward(&self) -> Vec3 {
        (self.pose.look_at - self.pose.position).normalize_or(-Vec3::Z)
    }

    /// World-space ray through a point given in normalized device coordinates
    /// (x right, y up, both in -1..1).
    pub fn screen_ray(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection_matrix().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Project a world point into normalized device coordinates. `None` if behind the camera.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(-Vec3::Z),
        }
    }

    /// Distance along the ray to the first hit on a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere.
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_look_target() {
        let cam = Camera::new(CameraPose::new(Vec3::new(0.0, 12.0, 18.0), Vec3::ZERO));
        let ray = cam.screen_ray(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position()).normalize();
        assert!(ray.direction.dot(expected) > 0.9999);
        assert!(ray.intersect_sphere(Vec3::ZERO, 0.2).is_some());
    }

    #[test]
    fn ray_sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let d = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((d - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
        // Sphere behind the origin.
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn world_to_ndc_round_trips_center() {
        let cam = Camera::default();
        let ndc = cam.world_to_ndc(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        let behind = cam.pose.position + (cam.pose.position - cam.pose.look_at);
        assert!(cam.world_to_ndc(behind).is_none());
    }

    #[test]
    fn degenerate_pose_still_builds_finite_view() {
        let cam = Camera::new(CameraPose::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO));
        assert!(cam.view_matrix().is_finite());
        let same = Camera::new(CameraPose::new(Vec3::ONE, Vec3::ONE));
        assert!(same.view_matrix().is_finite());
    }

    #[test]
    fn pose_lerp_moves_fraction_of_gap() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
        let b = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 0.0));
        let c = a.lerp(&b, 0.1);
        assert!((c.position.x - 1.0).abs() < 1e-6);
        assert!((c.look_at.y - 1.0).abs() < 1e-6);
        assert!((c.distance_to(&b) - 9.0).abs() < 1e-5);
    }
}
