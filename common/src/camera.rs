//! Orbital camera for 3D scenes

use glam::{Mat4, Vec3};

const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;

/// 3D perspective camera orbiting a target point
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            fov: 45.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            distance: 10.0,
            yaw: 0.0,
            pitch: 0.3,
            min_distance: 1.0,
            max_distance: 200.0,
        }
    }

    /// Eye position derived from the orbital parameters
    pub fn position(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            )
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Zoom by a scroll amount; positive values move closer
    pub fn zoom(&mut self, delta: f32) {
        let factor = 1.0 - delta * 0.1;
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Pull back far enough that a sphere of `radius` fits the vertical field of view
    pub fn frame(&mut self, radius: f32) {
        let fit = radius.max(0.1) / (self.fov * 0.5).sin();
        self.distance = (fit * 1.1).clamp(self.min_distance, self.max_distance);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Screen-aligned right and up vectors in world space, for billboards
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        let eye = camera.position();
        let (right, up) = camera.billboard_axes();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [eye.x, eye.y, eye.z, 1.0],
            right: [right.x, right.y, right.z, 0.0],
            up: [up.x, up.y, up.z, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn eye_sits_at_orbit_distance() {
        let mut camera = OrbitCamera::new(1.0);
        camera.orbit(0.7, -0.2);
        assert_relative_eq!(camera.position().distance(camera.target), camera.distance, epsilon = 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert_relative_eq!(camera.pitch, MAX_PITCH);
        camera.orbit(0.0, -20.0);
        assert_relative_eq!(camera.pitch, MIN_PITCH);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut camera = OrbitCamera::new(1.0);
        for _ in 0..200 {
            camera.zoom(5.0);
        }
        assert_relative_eq!(camera.distance, camera.min_distance);
    }

    #[test]
    fn billboard_axes_are_orthonormal() {
        let mut camera = OrbitCamera::new(1.5);
        camera.orbit(1.1, 0.4);
        let (right, up) = camera.billboard_axes();
        assert_relative_eq!(right.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(up.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(right.dot(up), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn frame_moves_out_for_larger_scenes() {
        let mut camera = OrbitCamera::new(1.0);
        camera.frame(2.0);
        let near = camera.distance;
        camera.frame(8.0);
        assert!(camera.distance > near);
    }
}
