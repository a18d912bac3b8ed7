use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::ShaderStage;

/// A shader stage failed to compile.
///
/// `log` holds the full rendered compiler diagnostic, including source
/// excerpts, in the same form the compiler prints it.
#[derive(Debug, Clone, Error)]
#[error("failed to compile {stage} shader:\n{log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    pub source_text: String,
    pub log: String,
}

/// The two stages could not be linked into one program.
#[derive(Debug, Clone, Error)]
#[error("failed to link program:\n{log}")]
pub struct LinkError {
    pub log: String,
}

/// Any failure while building a program from shader files.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read {stage} shader source `{}`", .path.display())]
    Io {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Link(#[from] LinkError),
}
