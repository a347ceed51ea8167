//! Render pipeline construction
//!
//! The scene needs exactly two pipelines, one per vertex layout: the
//! textured room pipeline (position + normal + texture coordinate) and the
//! solid pipeline (position + normal). Each pipeline declares exactly the
//! attributes and bind groups its layout uses — binding slots are resolved
//! here once at load, never looked up again.
//!
//! Bind group slots: 0 = frame globals, 1 = per-object uniforms,
//! 2 = surface texture (textured pipeline only).

use crate::{
    error::{RenderError, Result},
    gfx::resources::texture_resource::TextureResource,
    gfx::scene::vertex::{VertexN, VertexNT},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
    },
};

pub struct Pipelines {
    pub textured: wgpu::RenderPipeline,
    pub solid: wgpu::RenderPipeline,
    pub object_layout: BindGroupLayoutWithDesc,
    pub texture_layout: BindGroupLayoutWithDesc,
}

impl Pipelines {
    /// Builds the shading program and both pipelines.
    ///
    /// Shader validation failures surface as
    /// [`RenderError::ShaderLinkFailure`] and abort startup.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("phong.wgsl").into()),
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderLinkFailure(error.to_string()));
        }

        let object_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Object Bind Group Layout");

        let texture_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Texture Bind Group Layout");

        let textured_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Textured Pipeline Layout"),
                bind_group_layouts: &[frame_layout, &object_layout.layout, &texture_layout.layout],
                push_constant_ranges: &[],
            });

        let solid_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Solid Pipeline Layout"),
                bind_group_layouts: &[frame_layout, &object_layout.layout],
                push_constant_ranges: &[],
            });

        let textured = Self::build_pipeline(
            device,
            "Textured Pipeline",
            &shader,
            &textured_pipeline_layout,
            "vs_room",
            "fs_room",
            VertexNT::desc(),
            surface_format,
        );

        let solid = Self::build_pipeline(
            device,
            "Solid Pipeline",
            &shader,
            &solid_pipeline_layout,
            "vs_solid",
            "fs_solid",
            VertexN::desc(),
            surface_format,
        );

        Ok(Self {
            textured,
            solid,
            object_layout,
            texture_layout,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_pipeline(
        device: &wgpu::Device,
        label: &str,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        vertex_entry: &str,
        fragment_entry: &str,
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vertex_entry),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Bind group pairing a loaded texture with the textured pipeline's
    /// texture slot.
    pub fn texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &TextureResource,
        slot: usize,
    ) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.texture_layout)
            .resource(wgpu::BindingResource::TextureView(&texture.view))
            .resource(wgpu::BindingResource::Sampler(&texture.sampler))
            .create(device, &format!("Texture Bind Group {slot}"))
    }
}
