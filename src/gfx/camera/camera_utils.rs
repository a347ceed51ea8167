use super::{camera_controller::CameraController, view_camera::ViewCamera};

/// Pairs the view camera with its input controller.
pub struct CameraManager {
    pub camera: ViewCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: ViewCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }
}
