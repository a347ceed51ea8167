//! Free-fly view camera
//!
//! The camera is a single world→view matrix mutated incrementally: forward/
//! backward translation and yaw compose in view space, so every movement is
//! relative to where the camera currently points. The matrix is never reset
//! after construction.

use cgmath::{Matrix4, Rad, Vector3, Vector4};

/// Remaps the GL [-1, 1] clip depth produced by `cgmath::perspective` to
/// wgpu's [0, 1] range. Matrix4::new takes column-major values.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Vertical field of view, radians.
pub const FIELD_OF_VIEW: Rad<f32> = Rad(1.0);
/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.5;
/// Far clip plane distance.
pub const FAR_PLANE: f32 = 25.0;

/// Initial view transform: the world shifted down so the camera stands
/// above the ground plane.
const INITIAL_VIEW_HEIGHT: f32 = -3.5;

#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl ViewCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            view: Matrix4::from_translation(Vector3::new(0.0, INITIAL_VIEW_HEIGHT, 0.0)),
            projection: Self::build_projection(width, height),
        }
    }

    fn build_projection(width: u32, height: u32) -> Matrix4<f32> {
        let aspect = width as f32 / height as f32;
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(FIELD_OF_VIEW, aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Moves the camera by `delta` expressed in view space.
    ///
    /// The translation composes on top of the existing view transform, so a
    /// positive z component moves the camera forward along its current
    /// facing.
    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.view = Matrix4::from_translation(delta) * self.view;
    }

    /// Turns the camera about the view-space vertical axis.
    pub fn yaw(&mut self, angle: Rad<f32>) {
        self.view = Matrix4::from_angle_y(angle) * self.view;
    }

    /// Rebuilds the projection for a new surface size.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection = Self::build_projection(width, height);
        log::debug!("projection rebuilt for {}x{}", width, height);
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// The eye position pushed to the shader: the world origin transformed
    /// through the view matrix. Always a position vector, recomputed from
    /// the current view on every call.
    pub fn eye_position(&self) -> [f32; 4] {
        (self.view * Vector4::new(0.0, 0.0, 0.0, 1.0)).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    fn matrices_close(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn translate_then_inverse_translate_restores_the_view() {
        let mut camera = ViewCamera::new(800, 600);
        let before = *camera.view_matrix();
        camera.translate(Vector3::new(0.0, 0.0, 0.05));
        camera.translate(Vector3::new(0.0, 0.0, -0.05));
        assert!(matrices_close(camera.view_matrix(), &before));
    }

    #[test]
    fn yaw_left_then_right_restores_the_view() {
        let mut camera = ViewCamera::new(800, 600);
        let before = *camera.view_matrix();
        camera.yaw(Rad(-0.025));
        camera.yaw(Rad(0.025));
        assert!(matrices_close(camera.view_matrix(), &before));
    }

    #[test]
    fn eye_position_is_the_transformed_origin() {
        let camera = ViewCamera::new(800, 600);
        // Initial view is a pure translation, so the transformed origin is
        // exactly that translation.
        assert_eq!(camera.eye_position(), [0.0, -3.5, 0.0, 1.0]);

        let mut camera = ViewCamera::new(800, 600);
        camera.yaw(Rad(0.4));
        camera.translate(Vector3::new(0.2, 0.0, 1.0));
        let expected = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let expected: [f32; 4] = expected.into();
        assert_eq!(camera.eye_position(), expected);
    }

    #[test]
    fn movement_is_relative_to_current_facing() {
        // After a yaw, a forward step must no longer be a pure world-z
        // translation of the view.
        let mut camera = ViewCamera::new(800, 600);
        camera.yaw(Rad(std::f32::consts::FRAC_PI_2));
        let before = *camera.view_matrix();
        camera.translate(Vector3::new(0.0, 0.0, 0.05));
        let moved = camera.view_matrix() * before.invert().unwrap();
        // The composed delta is the view-space translation itself.
        let delta: [f32; 16] = *moved.as_ref();
        assert!((delta[14] - 0.05).abs() < 1e-5);
    }

    #[test]
    fn resize_embeds_fov_aspect_and_clip_planes() {
        let mut camera = ViewCamera::new(100, 100);
        camera.resize_projection(800, 600);
        let p = camera.projection_matrix();

        let half_fov_cot = 1.0 / (0.5f32).tan();
        let aspect = 800.0 / 600.0;
        assert!((p[0][0] - half_fov_cot / aspect).abs() < 1e-5);
        assert!((p[1][1] - half_fov_cot).abs() < 1e-5);

        // Depth row carries near/far through the wgpu clip-range remap.
        let (n, f) = (NEAR_PLANE, FAR_PLANE);
        let gl_z = -(f + n) / (f - n);
        let gl_w = -(2.0 * f * n) / (f - n);
        assert!((p[2][2] - (0.5 * gl_z - 0.5)).abs() < 1e-5);
        assert!((p[3][2] - 0.5 * gl_w).abs() < 1e-5);
    }
}
