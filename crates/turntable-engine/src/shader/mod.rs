//! Shader program building.
//!
//! Programs are written in WGSL. [`compile_shader`] parses and validates one
//! stage on the CPU; [`link_program`] checks that a vertex and a fragment
//! stage fit together and resolves the names the renderer feeds:
//!
//! - attributes `vert` and `vertColor` (vertex entry point inputs),
//! - uniforms `model`, `view` and `projection` (`var<uniform>` globals).
//!
//! A name the shaders do not declare resolves to `None` and is skipped when
//! rendering.

mod compile;
mod error;
mod link;
mod reflect;
mod stage;

#[cfg(test)]
mod fixtures;

use std::fs;
use std::path::Path;

pub use compile::{compile_shader, CompiledShader};
pub use error::{CompileError, LinkError, ProgramError};
pub use link::{link_program, LinkedProgram, StageSource};
pub use reflect::{
    ProgramLocations, UniformSlot, COLOR_ATTRIBUTE, MODEL_UNIFORM, POSITION_ATTRIBUTE,
    PROJECTION_UNIFORM, VIEW_UNIFORM,
};
pub use stage::ShaderStage;

/// Compiles both stages and links them.
pub fn build_program(vertex_src: &str, fragment_src: &str) -> Result<LinkedProgram, ProgramError> {
    let vertex = compile_shader(vertex_src, ShaderStage::Vertex)?;
    let fragment = compile_shader(fragment_src, ShaderStage::Fragment)?;
    Ok(link_program(vertex, fragment)?)
}

/// Reads both stage sources from disk and builds the program.
pub fn load_program(
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<LinkedProgram, ProgramError> {
    let vertex_src = read_stage(vertex_path.as_ref(), ShaderStage::Vertex)?;
    let fragment_src = read_stage(fragment_path.as_ref(), ShaderStage::Fragment)?;
    build_program(&vertex_src, &fragment_src)
}

fn read_stage(path: &Path, stage: ShaderStage) -> Result<String, ProgramError> {
    log::debug!("reading {stage} shader from {}", path.display());
    fs::read_to_string(path).map_err(|source| ProgramError::Io {
        stage,
        path: path.to_path_buf(),
        source,
    })
}
