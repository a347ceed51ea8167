//! Keyboard input mapping
//!
//! Stateless controller: each key press maps independently to one scene
//! mutation. There is no modifier tracking and no key-repeat suppression
//! beyond what the windowing layer provides. Unrecognized keys are no-ops.

use cgmath::{Rad, Vector3};

/// One scene mutation produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Move the camera by a view-space delta
    TranslateCamera(Vector3<f32>),
    /// Turn the camera about the vertical axis
    YawCamera(Rad<f32>),
    /// Spin the primary model about its own origin
    RotatePrimaryModel(Rad<f32>),
}

pub struct CameraController {
    /// View-space distance moved per key press
    pub move_step: f32,
    /// Radians turned per key press
    pub turn_step: f32,
}

impl CameraController {
    pub fn new(move_step: f32, turn_step: f32) -> Self {
        Self {
            move_step,
            turn_step,
        }
    }

    /// Maps a typed character to its scene mutation, if any.
    pub fn map_key(&self, key: char) -> Option<InputAction> {
        match key {
            'w' => Some(InputAction::TranslateCamera(Vector3::new(
                0.0,
                0.0,
                self.move_step,
            ))),
            's' => Some(InputAction::TranslateCamera(Vector3::new(
                0.0,
                0.0,
                -self.move_step,
            ))),
            'a' => Some(InputAction::YawCamera(Rad(-self.turn_step))),
            'd' => Some(InputAction::YawCamera(Rad(self.turn_step))),
            'c' => Some(InputAction::RotatePrimaryModel(Rad(-self.turn_step))),
            'v' => Some(InputAction::RotatePrimaryModel(Rad(self.turn_step))),
            _ => None,
        }
    }
}

impl Default for CameraController {
    /// The scene's step sizes: 0.05 units per move, 0.025 rad per turn.
    fn default() -> Self {
        Self::new(0.05, 0.025)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_backward_are_symmetric() {
        let controller = CameraController::default();
        let w = controller.map_key('w').unwrap();
        let s = controller.map_key('s').unwrap();
        match (w, s) {
            (InputAction::TranslateCamera(fwd), InputAction::TranslateCamera(back)) => {
                assert_eq!(fwd, -back);
                assert_eq!(fwd.z, 0.05);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn yaw_keys_turn_opposite_ways() {
        let controller = CameraController::default();
        assert_eq!(
            controller.map_key('a').unwrap(),
            InputAction::YawCamera(Rad(-0.025))
        );
        assert_eq!(
            controller.map_key('d').unwrap(),
            InputAction::YawCamera(Rad(0.025))
        );
    }

    #[test]
    fn model_rotation_keys_map_to_the_primary_model() {
        let controller = CameraController::default();
        assert_eq!(
            controller.map_key('c').unwrap(),
            InputAction::RotatePrimaryModel(Rad(-0.025))
        );
        assert_eq!(
            controller.map_key('v').unwrap(),
            InputAction::RotatePrimaryModel(Rad(0.025))
        );
    }

    #[test]
    fn unrecognized_keys_are_no_ops() {
        let controller = CameraController::default();
        for key in ['x', 'q', ' ', '1', 'W'] {
            assert_eq!(controller.map_key(key), None);
        }
    }
}
