use std::collections::HashMap;
use std::fmt::Write as _;

use super::reflect::{self, ProgramLocations, UniformSlot};
use super::{CompiledShader, LinkError, ShaderStage};

/// Source and entry point of one stage of a linked program.
#[derive(Debug, Clone)]
pub struct StageSource {
    pub stage: ShaderStage,
    pub source: String,
    pub entry_point: String,
}

impl StageSource {
    fn from_compiled(shader: CompiledShader) -> Self {
        let stage = shader.stage();
        let entry_point = shader.entry_point().to_owned();
        Self {
            stage,
            source: shader.into_source(),
            entry_point,
        }
    }
}

/// A vertex + fragment pair whose interfaces agree.
///
/// Only produced by [`link_program`]; there is no partially linked state.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: StageSource,
    fragment: StageSource,
    locations: ProgramLocations,
}

impl LinkedProgram {
    #[inline]
    pub fn vertex(&self) -> &StageSource {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &StageSource {
        &self.fragment
    }

    #[inline]
    pub fn locations(&self) -> &ProgramLocations {
        &self.locations
    }
}

/// Links two compiled stages into a program.
///
/// Both stages are consumed. Every interface problem found is reported in a
/// single [`LinkError`] log, one line each.
pub fn link_program(
    vertex: CompiledShader,
    fragment: CompiledShader,
) -> Result<LinkedProgram, LinkError> {
    let mut diagnostics = String::new();

    check_stage(&vertex, ShaderStage::Vertex, &mut diagnostics);
    check_stage(&fragment, ShaderStage::Fragment, &mut diagnostics);

    // Interface checks only make sense once the slots hold the right stages.
    if diagnostics.is_empty() {
        check_varyings(&vertex, &fragment, &mut diagnostics);
        check_bindings(&vertex, &fragment, &mut diagnostics);
    }

    if !diagnostics.is_empty() {
        log::debug!("link failed:\n{diagnostics}");
        return Err(LinkError { log: diagnostics });
    }

    let locations = ProgramLocations::resolve(&vertex, &fragment);
    for name in locations.unresolved() {
        log::warn!("program does not declare `{name}`; it will not be bound");
    }

    log::info!(
        "linked program ({} -> {})",
        vertex.entry_point(),
        fragment.entry_point()
    );

    Ok(LinkedProgram {
        vertex: StageSource::from_compiled(vertex),
        fragment: StageSource::from_compiled(fragment),
        locations,
    })
}

fn check_stage(shader: &CompiledShader, expected: ShaderStage, out: &mut String) {
    if shader.stage() != expected {
        let _ = writeln!(
            out,
            "error: {expected} slot was given a {} shader",
            shader.stage()
        );
    }
}

fn check_varyings(vertex: &CompiledShader, fragment: &CompiledShader, out: &mut String) {
    let (vm, fm) = (vertex.module(), fragment.module());

    let produced: HashMap<u32, reflect::InterfaceVar<'_>> =
        reflect::entry_outputs(vm, vertex.entry())
            .into_iter()
            .map(|var| (var.location, var))
            .collect();

    for input in reflect::entry_inputs(fm, fragment.entry()) {
        let name = input.name.unwrap_or("<unnamed>");
        match produced.get(&input.location) {
            None => {
                let _ = writeln!(
                    out,
                    "error: fragment input `{name}` at location {} is not written by the vertex stage",
                    input.location
                );
            }
            Some(output) if !reflect::types_match(vm, output.ty, fm, input.ty) => {
                let _ = writeln!(
                    out,
                    "error: location {} type mismatch: vertex writes {}, fragment reads `{name}` as {}",
                    input.location,
                    reflect::type_label(vm, output.ty),
                    reflect::type_label(fm, input.ty),
                );
            }
            Some(_) => {}
        }
    }
}

fn check_bindings(vertex: &CompiledShader, fragment: &CompiledShader, out: &mut String) {
    let (vm, fm) = (vertex.module(), fragment.module());

    let declared: HashMap<UniformSlot, reflect::BoundResource<'_>> =
        reflect::bound_resources(vm)
            .into_iter()
            .map(|res| (res.slot, res))
            .collect();

    for res in reflect::bound_resources(fm) {
        let Some(other) = declared.get(&res.slot) else {
            continue;
        };
        let UniformSlot { group, binding } = res.slot;

        if other.name != res.name {
            let _ = writeln!(
                out,
                "error: @group({group}) @binding({binding}) is `{}` in the vertex stage but `{}` in the fragment stage",
                other.name.unwrap_or("<unnamed>"),
                res.name.unwrap_or("<unnamed>"),
            );
        } else if !reflect::types_match(vm, other.ty, fm, res.ty) {
            let _ = writeln!(
                out,
                "error: @group({group}) @binding({binding}) `{}` is {} in the vertex stage but {} in the fragment stage",
                res.name.unwrap_or("<unnamed>"),
                reflect::type_label(vm, other.ty),
                reflect::type_label(fm, res.ty),
            );
        }
    }
}
