use std::collections::BTreeMap;
use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::mesh::{MeshData, COLOR_OFFSET, VERTEX_STRIDE};
use crate::shader::{LinkedProgram, ProgramLocations, UniformSlot};
use crate::transform::FrameState;

use super::{RenderCtx, RenderTarget};

/// Size of one `mat4x4<f32>` uniform block.
const MATRIX_SIZE: u64 = 64;

/// Draws a static colored mesh with a linked program.
///
/// The vertex buffer is uploaded once, on first use. Each frame the three
/// matrices are written into the uniform slots the program resolved, and the
/// whole buffer is drawn as a triangle list (`vertex_count` vertices).
///
/// Attributes and uniforms the program does not declare are simply not bound.
pub struct MeshRenderer {
    mesh: MeshData,
    program: LinkedProgram,

    pipeline_formats: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniforms: Option<UniformBindings>,

    vertex_buffer: Option<wgpu::Buffer>,
    warned_empty: bool,
}

impl MeshRenderer {
    pub fn new(mesh: MeshData, program: LinkedProgram) -> Self {
        Self {
            mesh,
            program,
            pipeline_formats: None,
            pipeline: None,
            uniforms: None,
            vertex_buffer: None,
            warned_empty: false,
        }
    }

    /// Number of vertices issued per draw.
    #[inline]
    pub fn draw_count(&self) -> u32 {
        self.mesh.vertex_count() as u32
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameState) {
        // wgpu rejects zero-sized vertex buffers, and there is nothing to draw.
        if self.mesh.is_empty() {
            if !self.warned_empty {
                log::warn!("mesh has no vertices; only clearing");
                self.warned_empty = true;
            }
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_vertex_buffer(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(uniforms) = self.uniforms.as_ref() else { return };
        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return };

        uniforms.write(ctx.queue, frame);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("turntable mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: target.depth_view.map(|view| {
                wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        for (group, bind_group) in uniforms.bind_groups.iter().enumerate() {
            rpass.set_bind_group(group as u32, bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
        rpass.draw(0..self.draw_count(), 0..1);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_buffer.is_some() {
            return;
        }

        let buffer = self.mesh.buffer();
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("turntable mesh vbo"),
            contents: buffer.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "uploaded {} vertices ({} bytes)",
            buffer.vertex_count(),
            buffer.byte_len()
        );
        self.vertex_buffer = Some(vbo);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let vertex = self.program.vertex();
        let fragment = self.program.fragment();

        let vs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("turntable vertex shader"),
            source: wgpu::ShaderSource::Wgsl(vertex.source.as_str().into()),
        });
        let fs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("turntable fragment shader"),
            source: wgpu::ShaderSource::Wgsl(fragment.source.as_str().into()),
        });

        let uniforms = UniformBindings::new(ctx.device, self.program.locations());
        let layout_refs: Vec<&wgpu::BindGroupLayout> = uniforms.layouts.iter().collect();

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("turntable mesh pipeline layout"),
                bind_group_layouts: &layout_refs,
                immediate_size: 0,
            });

        let attributes = vertex_attributes(self.program.locations());

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("turntable mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some(vertex.entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VERTEX_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some(fragment.entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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

            depth_stencil: ctx.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "mesh pipeline created ({} attribute(s), {} bind group(s))",
            attributes.len(),
            uniforms.bind_groups.len()
        );

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.uniforms = Some(uniforms);
    }
}

/// Which per-frame matrix a uniform buffer carries.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum FrameMatrix {
    Model,
    View,
    Projection,
}

impl FrameMatrix {
    fn bytes(self, frame: &FrameState) -> &[u8] {
        match self {
            FrameMatrix::Model => frame.model_bytes(),
            FrameMatrix::View => frame.view_bytes(),
            FrameMatrix::Projection => frame.projection_bytes(),
        }
    }
}

struct UniformBuffer {
    matrix: FrameMatrix,
    buffer: wgpu::Buffer,
}

/// One bind group per group index from 0 to the highest resolved one; groups
/// with no resolved uniform get an empty layout.
struct UniformBindings {
    layouts: Vec<wgpu::BindGroupLayout>,
    bind_groups: Vec<wgpu::BindGroup>,
    buffers: Vec<UniformBuffer>,
}

impl UniformBindings {
    fn new(device: &wgpu::Device, locations: &ProgramLocations) -> Self {
        let groups = group_slots(locations);
        let group_count = groups.keys().next_back().map_or(0, |g| g + 1);

        let mut layouts = Vec::with_capacity(group_count as usize);
        let mut bind_groups = Vec::with_capacity(group_count as usize);
        let mut buffers = Vec::new();

        for group in 0..group_count {
            let members = groups.get(&group).map(Vec::as_slice).unwrap_or_default();

            let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = members
                .iter()
                .map(|(_, binding)| wgpu::BindGroupLayoutEntry {
                    binding: *binding,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(MATRIX_SIZE),
                    },
                    count: None,
                })
                .collect();

            let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("turntable uniform bgl"),
                entries: &layout_entries,
            });

            let group_buffers: Vec<(u32, wgpu::Buffer, FrameMatrix)> = members
                .iter()
                .map(|(matrix, binding)| {
                    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                        label: Some("turntable matrix ubo"),
                        size: MATRIX_SIZE,
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                        mapped_at_creation: false,
                    });
                    (*binding, buffer, *matrix)
                })
                .collect();

            let entries: Vec<wgpu::BindGroupEntry<'_>> = group_buffers
                .iter()
                .map(|(binding, buffer, _)| wgpu::BindGroupEntry {
                    binding: *binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("turntable uniform bind group"),
                layout: &layout,
                entries: &entries,
            });

            buffers.extend(
                group_buffers
                    .into_iter()
                    .map(|(_, buffer, matrix)| UniformBuffer { matrix, buffer }),
            );
            layouts.push(layout);
            bind_groups.push(bind_group);
        }

        Self {
            layouts,
            bind_groups,
            buffers,
        }
    }

    fn write(&self, queue: &wgpu::Queue, frame: &FrameState) {
        for ubo in &self.buffers {
            queue.write_buffer(&ubo.buffer, 0, ubo.matrix.bytes(frame));
        }
    }
}

/// Resolved matrix uniforms, bucketed by group. Within a group, bindings are
/// unique; a second name on an already used binding is dropped.
fn group_slots(locations: &ProgramLocations) -> BTreeMap<u32, Vec<(FrameMatrix, u32)>> {
    let resolved = [
        (FrameMatrix::Model, locations.model),
        (FrameMatrix::View, locations.view),
        (FrameMatrix::Projection, locations.projection),
    ];

    let mut groups: BTreeMap<u32, Vec<(FrameMatrix, u32)>> = BTreeMap::new();
    for (matrix, slot) in resolved {
        let Some(UniformSlot { group, binding }) = slot else { continue };
        let members = groups.entry(group).or_default();
        if members.iter().any(|(_, b)| *b == binding) {
            log::warn!("{matrix:?} shares @group({group}) @binding({binding}) with another matrix; skipped");
            continue;
        }
        members.push((matrix, binding));
    }
    groups
}

/// Attribute layout for the resolved inputs of the interleaved buffer.
fn vertex_attributes(locations: &ProgramLocations) -> Vec<wgpu::VertexAttribute> {
    [(locations.position, 0), (locations.color, COLOR_OFFSET)]
        .into_iter()
        .filter_map(|(location, offset)| {
            location.map(|shader_location| wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset,
                shader_location,
            })
        })
        .collect()
}
