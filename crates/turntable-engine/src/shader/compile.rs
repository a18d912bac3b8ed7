use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{CompileError, ShaderStage};

/// A validated shader stage, ready to be linked.
///
/// Consumed by [`link_program`](super::link_program); the linked program keeps
/// only what it needs to create GPU modules.
#[derive(Debug)]
pub struct CompiledShader {
    stage: ShaderStage,
    source: String,
    module: naga::Module,
    entry_index: usize,
}

impl CompiledShader {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the entry point used for this stage.
    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry().name
    }

    #[inline]
    pub(crate) fn module(&self) -> &naga::Module {
        &self.module
    }

    #[inline]
    pub(crate) fn entry(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }

    pub(crate) fn into_source(self) -> String {
        self.source
    }
}

/// Compiles WGSL source for one pipeline stage.
///
/// Parsing and validation run on the CPU; no device is needed. The module must
/// declare an entry point for `stage`; the first one found is used.
pub fn compile_shader(source: &str, stage: ShaderStage) -> Result<CompiledShader, CompileError> {
    let fail = |log: String| CompileError {
        stage,
        source_text: source.to_owned(),
        log,
    };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .map_err(|e| fail(e.emit_to_string(source)))?;

    let entry_index = module
        .entry_points
        .iter()
        .position(|ep| ep.stage == stage.to_naga())
        .ok_or_else(|| fail(format!("error: no @{stage} entry point declared")))?;

    log::debug!(
        "compiled {stage} shader (entry point `{}`)",
        module.entry_points[entry_index].name
    );

    Ok(CompiledShader {
        stage,
        source: source.to_owned(),
        module,
        entry_index,
    })
}
