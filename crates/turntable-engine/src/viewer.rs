//! The turntable viewer: one mesh, one program, spinning about Y.

use std::path::Path;

use anyhow::{Context, Result};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::core::{App, AppControl, FrameCtx};
use crate::mesh::{self, MeshData};
use crate::render::MeshRenderer;
use crate::shader::{self, LinkedProgram};
use crate::time::FrameStats;
use crate::transform::{aspect_ratio, CameraConfig, FrameTransform};

/// Static viewer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    /// Viewport size used for the projection's aspect ratio.
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    pub camera: CameraConfig,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            clear_color: wgpu::Color::BLACK,
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerOptions {
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.width, self.height)
    }
}

/// Renders a loaded mesh rotating in front of a fixed camera.
///
/// Per frame: clear, compute matrices from the elapsed time, upload them,
/// draw, present. Escape or closing the window ends the loop.
pub struct ModelViewer {
    options: ViewerOptions,
    transform: FrameTransform,
    renderer: MeshRenderer,
    stats: FrameStats,
}

impl ModelViewer {
    pub fn new(mesh: MeshData, program: LinkedProgram, options: ViewerOptions) -> Self {
        Self {
            transform: FrameTransform::new(options.camera),
            renderer: MeshRenderer::new(mesh, program),
            stats: FrameStats::default(),
            options,
        }
    }

    /// Loads the mesh and both shader stages from disk.
    pub fn load(
        mesh_path: impl AsRef<Path>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
        options: ViewerOptions,
    ) -> Result<Self> {
        let mesh_path = mesh_path.as_ref();
        let mesh = mesh::load(mesh_path)
            .with_context(|| format!("failed to load mesh {}", mesh_path.display()))?;
        let program = shader::load_program(vertex_path, fragment_path)
            .context("failed to build shader program")?;

        Ok(Self::new(mesh, program, options))
    }

    #[inline]
    pub fn renderer(&self) -> &MeshRenderer {
        &self.renderer
    }
}

impl App for ModelViewer {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if is_escape_press(event) {
            log::info!("escape pressed; exiting");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let frame = self
            .transform
            .compute_frame(ctx.time.elapsed_f32(), self.options.aspect_ratio());

        let renderer = &mut self.renderer;
        let control = ctx.render(self.options.clear_color, |rctx, target| {
            renderer.render(rctx, target, &frame);
        });

        self.stats.record(ctx.time.now);
        control
    }
}

fn is_escape_press(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_window() {
        let options = ViewerOptions::default();
        assert_eq!((options.width, options.height), (800, 600));
        assert_eq!(options.aspect_ratio(), 800.0 / 600.0);
        assert_eq!(options.camera, CameraConfig::default());
    }

    #[test]
    fn load_reports_missing_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelViewer::load(
            dir.path().join("missing.obj"),
            dir.path().join("vertex.wgsl"),
            dir.path().join("fragment.wgsl"),
            ViewerOptions::default(),
        )
        .err()
        .unwrap();

        assert!(err.to_string().contains("failed to load mesh"));
        assert!(err.downcast_ref::<mesh::MeshError>().is_some());
    }

    #[test]
    fn load_reports_shader_failure() {
        let dir = tempfile::tempdir().unwrap();
        let obj = dir.path().join("tri.obj");
        std::fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();

        let err = ModelViewer::load(
            &obj,
            dir.path().join("vertex.wgsl"),
            dir.path().join("fragment.wgsl"),
            ViewerOptions::default(),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err.downcast_ref::<shader::ProgramError>(),
            Some(shader::ProgramError::Io { .. })
        ));
    }
}
