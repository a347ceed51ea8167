//! Scene assembly and per-frame draw planning
//!
//! The scene is fixed: a textured room shell (ground and three walls), two
//! meshes loaded from files, a cube and a pyramid, lit by the three-light
//! rig and viewed through the free-fly camera. Objects live in a Vec in
//! draw order; every frame the renderer walks [`Scene::draw_plan`] and
//! issues exactly one draw per object.

use cgmath::{Matrix4, Vector3};

use crate::{
    error::Result,
    gfx::camera::{camera_utils::CameraManager, InputAction},
    gfx::geometry::{self, Topology},
    gfx::registry::{GeometryRegistry, MeshHandle},
    gfx::rendering::pipelines::Pipelines,
    gfx::resources::{
        lights::LightRig,
        material::{Material, MaterialUniform},
        model,
        texture_resource::TextureResource,
    },
    gfx::scene::object::{ObjectHandle, SceneObject},
    gfx::scene::vertex::{LAYOUT_POS_NORMAL, LAYOUT_POS_NORMAL_UV},
};

/// Surface texture shared by the room panels.
pub const STONE_TEXTURE_PATH: &str = "assets/textures/stone.png";
/// The rotatable primary model.
pub const STATUE_MODEL_PATH: &str = "assets/models/statue.obj";
/// The second loaded model.
pub const COLUMN_MODEL_PATH: &str = "assets/models/column.obj";

/// Placement of the room shell relative to the world.
const ROOM_PLACEMENT: Vector3<f32> = Vector3::new(0.0, 0.0, -5.0);
/// Statue placement, relative to the ground panel.
const STATUE_PLACEMENT: Vector3<f32> = Vector3::new(0.0, 2.5, -5.0);
/// Column placement, relative to the ground panel.
const COLUMN_PLACEMENT: Vector3<f32> = Vector3::new(0.0, 0.5, -5.0);
const CUBE_PLACEMENT: Vector3<f32> = Vector3::new(-5.0, 1.0, -10.5);
const PYRAMID_PLACEMENT: Vector3<f32> = Vector3::new(5.0, 1.0, -10.5);

/// Everything one draw call needs, captured in draw order.
#[derive(Clone, Debug)]
pub struct DrawCommand {
    pub object: ObjectHandle,
    pub mesh: MeshHandle,
    /// Fully composed model matrix (anchor placement included)
    pub model: Matrix4<f32>,
    pub material: MaterialUniform,
    pub texture: Option<usize>,
}

/// The fixed scene: camera, geometry registry, objects, lights, textures.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub registry: GeometryRegistry,
    pub objects: Vec<SceneObject>,
    pub lights: LightRig,
    primary_model: ObjectHandle,
    textures: Vec<TextureResource>,
    texture_bind_groups: Vec<wgpu::BindGroup>,
}

impl Scene {
    /// Assembles the fixed scene host-side.
    ///
    /// Registers all hand-authored geometry, loads the two model files, and
    /// stages the initial view-space light positions. GPU resources are
    /// created later by [`Scene::init_gpu_resources`]. Any missing asset is
    /// a fatal error.
    pub fn new(camera_manager: CameraManager) -> Result<Self> {
        let mut registry = GeometryRegistry::new();
        let mut objects = Vec::new();

        let room = Matrix4::from_translation(ROOM_PLACEMENT);

        // Draw order is fixed: ground, back wall, left wall, right wall,
        // statue, column, cube, pyramid.
        let ground_mesh = registry.register_static_mesh(
            "ground",
            geometry::ground(),
            LAYOUT_POS_NORMAL_UV,
            Topology::TriangleFan,
        );
        let ground: ObjectHandle = objects.len();
        objects.push(
            SceneObject::new("ground", ground_mesh, room, Material::stone()).with_texture(0),
        );

        for (name, data) in [
            ("back wall", geometry::back_wall()),
            ("left wall", geometry::left_wall()),
            ("right wall", geometry::right_wall()),
        ] {
            let mesh = registry.register_static_mesh(
                name,
                data,
                LAYOUT_POS_NORMAL_UV,
                Topology::TriangleFan,
            );
            objects.push(SceneObject::new(name, mesh, room, Material::stone()).with_texture(1));
        }

        let statue = model::load_model(STATUE_MODEL_PATH)?;
        let statue_mesh = registry.register_indexed_mesh(
            "statue",
            statue.vertices,
            statue.indices,
            LAYOUT_POS_NORMAL,
        );
        let primary_model = objects.len();
        objects.push(
            SceneObject::new(
                "statue",
                statue_mesh,
                Matrix4::from_translation(STATUE_PLACEMENT),
                Material::bronze(),
            )
            .with_anchor(ground),
        );

        let column = model::load_model(COLUMN_MODEL_PATH)?;
        let column_mesh = registry.register_indexed_mesh(
            "column",
            column.vertices,
            column.indices,
            LAYOUT_POS_NORMAL,
        );
        objects.push(
            SceneObject::new(
                "column",
                column_mesh,
                Matrix4::from_translation(COLUMN_PLACEMENT),
                Material::obsidian(),
            )
            .with_anchor(ground),
        );

        let cube_mesh = registry.register_static_mesh(
            "cube",
            geometry::cube(),
            LAYOUT_POS_NORMAL,
            Topology::QuadList,
        );
        objects.push(SceneObject::new(
            "cube",
            cube_mesh,
            Matrix4::from_translation(CUBE_PLACEMENT),
            Material::ruby(),
        ));

        let pyramid_mesh = registry.register_static_mesh(
            "pyramid",
            geometry::pyramid(),
            LAYOUT_POS_NORMAL,
            Topology::TriangleList,
        );
        objects.push(SceneObject::new(
            "pyramid",
            pyramid_mesh,
            Matrix4::from_translation(PYRAMID_PLACEMENT),
            Material::stone(),
        ));

        let mut lights = LightRig::new();
        lights.recompute_view_space(camera_manager.camera.view_matrix());

        log::info!("scene assembled: {} objects", objects.len());

        Ok(Self {
            camera_manager,
            registry,
            objects,
            lights,
            primary_model,
            textures: Vec::new(),
            texture_bind_groups: Vec::new(),
        })
    }

    /// Handle of the object the `c`/`v` keys rotate.
    pub fn primary_model(&self) -> ObjectHandle {
        self.primary_model
    }

    /// Applies one key press. Returns whether the key was recognized.
    ///
    /// Every recognized key ends by restaging the view-space light
    /// positions from the current view transform.
    pub fn process_key(&mut self, key: char) -> bool {
        let Some(action) = self.camera_manager.controller.map_key(key) else {
            return false;
        };
        match action {
            InputAction::TranslateCamera(delta) => self.camera_manager.camera.translate(delta),
            InputAction::YawCamera(angle) => self.camera_manager.camera.yaw(angle),
            InputAction::RotatePrimaryModel(angle) => {
                self.objects[self.primary_model].rotate_yaw_in_place(angle)
            }
        }
        self.lights
            .recompute_view_space(self.camera_manager.camera.view_matrix());
        true
    }

    /// Rebuilds the projection for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_manager.camera.resize_projection(width, height);
    }

    /// The composed model matrix an object's next draw will use.
    pub fn effective_transform(&self, handle: ObjectHandle) -> Matrix4<f32> {
        let object = &self.objects[handle];
        match object.anchor {
            Some(anchor) => self.objects[anchor].transform * object.transform,
            None => object.transform,
        }
    }

    /// The frame's draw sequence in fixed scene order: one command per
    /// object, each carrying its full material and composed transform.
    pub fn draw_plan(&self) -> Vec<DrawCommand> {
        self.objects
            .iter()
            .enumerate()
            .map(|(handle, object)| DrawCommand {
                object: handle,
                mesh: object.mesh,
                model: self.effective_transform(handle),
                material: object.material.to_uniform(),
                texture: object.texture,
            })
            .collect()
    }

    /// Uploads geometry, loads textures and creates per-object resources.
    ///
    /// Every buffer upload is size-verified by the registry; a missing
    /// texture file aborts startup.
    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipelines: &Pipelines,
    ) -> Result<()> {
        self.registry.upload_all(device)?;

        // The ground samples texture slot 0 and the walls slot 1; both
        // load the same stone image, one upload per slot. Textures live
        // until shutdown.
        for slot in 0..2 {
            let texture = TextureResource::from_file(device, queue, STONE_TEXTURE_PATH)?;
            self.texture_bind_groups
                .push(pipelines.texture_bind_group(device, &texture, slot));
            self.textures.push(texture);
        }

        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, &pipelines.object_layout);
        }
        Ok(())
    }

    /// Bind group for a texture slot referenced by a draw command.
    pub fn texture_bind_group(&self, slot: usize) -> &wgpu::BindGroup {
        &self.texture_bind_groups[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, ViewCamera};

    fn test_scene() -> Scene {
        let manager = CameraManager::new(
            ViewCamera::new(800, 600),
            CameraController::default(),
        );
        Scene::new(manager).expect("scene assets present")
    }

    #[test]
    fn one_frame_is_exactly_eight_draws_in_fixed_order() {
        let scene = test_scene();
        let plan = scene.draw_plan();
        let names: Vec<&str> = plan
            .iter()
            .map(|cmd| scene.objects[cmd.object].name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "ground",
                "back wall",
                "left wall",
                "right wall",
                "statue",
                "column",
                "cube",
                "pyramid"
            ]
        );
    }

    #[test]
    fn every_draw_carries_material_and_transform() {
        let scene = test_scene();
        for cmd in scene.draw_plan() {
            // A zeroed material row would mean the push was skipped; every
            // scene material has a non-zero diffuse.
            assert!(cmd.material.diffuse.iter().any(|&c| c > 0.0));
            let _ = cmd.model; // composed transform present per command
        }
    }

    #[test]
    fn loaded_models_compose_with_the_room_placement() {
        let scene = test_scene();
        let statue = scene.effective_transform(scene.primary_model());
        let translation = statue.w.truncate();
        // Ground placement (0, 0, -5) plus statue local (0, 2.5, -5).
        assert_eq!(translation, Vector3::new(0.0, 2.5, -10.0));
    }

    #[test]
    fn room_panels_are_textured_and_solids_are_not() {
        let scene = test_scene();
        let plan = scene.draw_plan();
        assert_eq!(plan[0].texture, Some(0));
        for cmd in &plan[1..4] {
            assert_eq!(cmd.texture, Some(1));
        }
        for cmd in &plan[4..] {
            assert_eq!(cmd.texture, None);
        }
    }

    #[test]
    fn rotating_the_primary_model_leaves_its_position_unchanged() {
        let mut scene = test_scene();
        let before = scene.objects[scene.primary_model()].translation();
        for _ in 0..50 {
            assert!(scene.process_key('c'));
        }
        let after = scene.objects[scene.primary_model()].translation();
        assert!((before.x - after.x).abs() < 1e-4);
        assert!((before.y - after.y).abs() < 1e-4);
        assert!((before.z - after.z).abs() < 1e-4);
    }

    #[test]
    fn opposite_moves_restore_the_camera() {
        let mut scene = test_scene();
        let before = *scene.camera_manager.camera.view_matrix();
        assert!(scene.process_key('w'));
        assert!(scene.process_key('s'));
        let after = *scene.camera_manager.camera.view_matrix();
        let a: &[f32; 16] = before.as_ref();
        let b: &[f32; 16] = after.as_ref();
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn lights_track_every_camera_mutation() {
        let mut scene = test_scene();
        for key in ['w', 'a', 'd', 's', 'v'] {
            assert!(scene.process_key(key));
            let view = *scene.camera_manager.camera.view_matrix();
            for (i, light) in scene.lights.lights().iter().enumerate() {
                let expected = view * light.position;
                assert_eq!(scene.lights.view_position(i), expected);
            }
        }
    }

    #[test]
    fn unknown_keys_change_nothing() {
        let mut scene = test_scene();
        let view_before = *scene.camera_manager.camera.view_matrix();
        assert!(!scene.process_key('z'));
        assert_eq!(
            *scene.camera_manager.camera.view_matrix(),
            view_before
        );
    }
}
