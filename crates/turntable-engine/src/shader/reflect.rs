//! Name-based lookups against compiled naga modules.

use naga::{AddressSpace, Binding, Handle, Module, ResourceBinding, Type, TypeInner};

use super::CompiledShader;

/// Attribute name the position input must carry.
pub const POSITION_ATTRIBUTE: &str = "vert";
/// Attribute name the color input must carry.
pub const COLOR_ATTRIBUTE: &str = "vertColor";

pub const MODEL_UNIFORM: &str = "model";
pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";

/// Where a uniform lives in the bind group model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
}

impl From<&ResourceBinding> for UniformSlot {
    fn from(rb: &ResourceBinding) -> Self {
        Self {
            group: rb.group,
            binding: rb.binding,
        }
    }
}

/// Locations resolved by exact name after linking.
///
/// `None` is the "not found" value: the shader does not declare that name.
/// Nothing downstream treats it as an error; an unresolved attribute is not
/// fed and an unresolved uniform is not written.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ProgramLocations {
    pub position: Option<u32>,
    pub color: Option<u32>,
    pub model: Option<UniformSlot>,
    pub view: Option<UniformSlot>,
    pub projection: Option<UniformSlot>,
}

impl ProgramLocations {
    pub(crate) fn resolve(vertex: &CompiledShader, fragment: &CompiledShader) -> Self {
        let attribute = |name: &str| {
            entry_inputs(vertex.module(), vertex.entry())
                .into_iter()
                .find(|var| var.name == Some(name))
                .map(|var| var.location)
        };

        let uniform = |name: &str| {
            uniform_slot(vertex.module(), name).or_else(|| uniform_slot(fragment.module(), name))
        };

        Self {
            position: attribute(POSITION_ATTRIBUTE),
            color: attribute(COLOR_ATTRIBUTE),
            model: uniform(MODEL_UNIFORM),
            view: uniform(VIEW_UNIFORM),
            projection: uniform(PROJECTION_UNIFORM),
        }
    }

    pub fn attributes(&self) -> [(&'static str, Option<u32>); 2] {
        [(POSITION_ATTRIBUTE, self.position), (COLOR_ATTRIBUTE, self.color)]
    }

    pub fn uniforms(&self) -> [(&'static str, Option<UniformSlot>); 3] {
        [
            (MODEL_UNIFORM, self.model),
            (VIEW_UNIFORM, self.view),
            (PROJECTION_UNIFORM, self.projection),
        ]
    }

    /// Names that did not resolve, attributes first.
    pub fn unresolved(&self) -> Vec<&'static str> {
        let attributes = self
            .attributes()
            .into_iter()
            .filter(|(_, loc)| loc.is_none())
            .map(|(name, _)| name);
        let uniforms = self
            .uniforms()
            .into_iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| name);
        attributes.chain(uniforms).collect()
    }
}

/// A location-bound value crossing a stage boundary.
#[derive(Debug, Copy, Clone)]
pub(crate) struct InterfaceVar<'m> {
    pub name: Option<&'m str>,
    pub location: u32,
    pub ty: Handle<Type>,
}

/// Location-bound inputs of an entry point, with struct arguments flattened.
pub(crate) fn entry_inputs<'m>(module: &'m Module, ep: &'m naga::EntryPoint) -> Vec<InterfaceVar<'m>> {
    let mut vars = Vec::new();
    for arg in &ep.function.arguments {
        collect_locations(module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut vars);
    }
    vars
}

/// Location-bound outputs of an entry point, with a struct result flattened.
pub(crate) fn entry_outputs<'m>(module: &'m Module, ep: &'m naga::EntryPoint) -> Vec<InterfaceVar<'m>> {
    let mut vars = Vec::new();
    if let Some(result) = &ep.function.result {
        collect_locations(module, None, result.ty, result.binding.as_ref(), &mut vars);
    }
    vars
}

fn collect_locations<'m>(
    module: &'m Module,
    name: Option<&'m str>,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<InterfaceVar<'m>>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(InterfaceVar {
            name,
            location: *location,
            ty,
        }),
        // Built-ins (position, vertex_index, ...) are not part of the user interface.
        Some(_) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(
                        module,
                        member.name.as_deref(),
                        member.ty,
                        member.binding.as_ref(),
                        out,
                    );
                }
            }
        }
    }
}

/// Slot of the uniform-space global named `name`, if declared.
pub(crate) fn uniform_slot(module: &Module, name: &str) -> Option<UniformSlot> {
    module
        .global_variables
        .iter()
        .filter(|(_, var)| matches!(var.space, AddressSpace::Uniform))
        .find(|(_, var)| var.name.as_deref() == Some(name))
        .and_then(|(_, var)| var.binding.as_ref())
        .map(UniformSlot::from)
}

/// A bound global resource (uniform, storage, texture, sampler).
#[derive(Debug, Copy, Clone)]
pub(crate) struct BoundResource<'m> {
    pub name: Option<&'m str>,
    pub slot: UniformSlot,
    pub ty: Handle<Type>,
}

pub(crate) fn bound_resources(module: &Module) -> Vec<BoundResource<'_>> {
    module
        .global_variables
        .iter()
        .filter_map(|(_, var)| {
            var.binding.as_ref().map(|rb| BoundResource {
                name: var.name.as_deref(),
                slot: UniformSlot::from(rb),
                ty: var.ty,
            })
        })
        .collect()
}

/// Compares two types declared in (possibly) different modules.
///
/// Scalars, vectors and matrices are compared exactly. Composite types hold
/// handles that are only meaningful inside their own module, so they are
/// accepted here and left to the GPU backend's pipeline validation.
pub(crate) fn types_match(a: &Module, a_ty: Handle<Type>, b: &Module, b_ty: Handle<Type>) -> bool {
    let (a, b) = (&a.types[a_ty].inner, &b.types[b_ty].inner);
    match a {
        TypeInner::Scalar(_) | TypeInner::Vector { .. } | TypeInner::Matrix { .. } => a == b,
        _ => true,
    }
}

/// Short WGSL-like spelling of a type for diagnostics.
pub(crate) fn type_label(module: &Module, ty: Handle<Type>) -> String {
    let inner = &module.types[ty].inner;
    match inner {
        TypeInner::Scalar(scalar) => scalar_label(*scalar),
        TypeInner::Vector { size, scalar } => {
            format!("vec{}<{}>", vector_len(*size), scalar_label(*scalar))
        }
        TypeInner::Matrix {
            columns,
            rows,
            scalar,
        } => format!(
            "mat{}x{}<{}>",
            vector_len(*columns),
            vector_len(*rows),
            scalar_label(*scalar)
        ),
        _ => module.types[ty]
            .name
            .clone()
            .unwrap_or_else(|| format!("{inner:?}")),
    }
}

fn vector_len(size: naga::VectorSize) -> u8 {
    match size {
        naga::VectorSize::Bi => 2,
        naga::VectorSize::Tri => 3,
        naga::VectorSize::Quad => 4,
    }
}

fn scalar_label(scalar: naga::Scalar) -> String {
    let prefix = match scalar.kind {
        naga::ScalarKind::Float => "f",
        naga::ScalarKind::Sint => "i",
        naga::ScalarKind::Uint => "u",
        naga::ScalarKind::Bool => return "bool".to_owned(),
        _ => return format!("{scalar:?}"),
    };
    format!("{prefix}{}", u32::from(scalar.width) * 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::fixtures::{FRAGMENT, VERTEX};
    use crate::shader::{compile_shader, ShaderStage};

    fn compile_pair(vs: &str, fs: &str) -> (CompiledShader, CompiledShader) {
        (
            compile_shader(vs, ShaderStage::Vertex).unwrap(),
            compile_shader(fs, ShaderStage::Fragment).unwrap(),
        )
    }

    #[test]
    fn resolves_all_names_from_reference_shaders() {
        let (vs, fs) = compile_pair(VERTEX, FRAGMENT);
        let loc = ProgramLocations::resolve(&vs, &fs);

        assert_eq!(loc.position, Some(0));
        assert_eq!(loc.color, Some(1));
        assert_eq!(loc.model, Some(UniformSlot { group: 0, binding: 0 }));
        assert_eq!(loc.view, Some(UniformSlot { group: 0, binding: 1 }));
        assert_eq!(loc.projection, Some(UniformSlot { group: 0, binding: 2 }));
        assert!(loc.unresolved().is_empty());
    }

    #[test]
    fn resolves_attributes_inside_input_struct() {
        let vs = "\
struct VertexInput {
    @location(3) vert: vec3<f32>,
    @location(5) vertColor: vec3<f32>,
};

@vertex
fn main(input: VertexInput) -> @builtin(position) vec4<f32> {
    return vec4<f32>(input.vert + input.vertColor, 1.0);
}
";
        let fs = "@fragment\nfn main() -> @location(0) vec4<f32> {\n    return vec4<f32>(1.0);\n}\n";
        let (vs, fs) = compile_pair(vs, fs);
        let loc = ProgramLocations::resolve(&vs, &fs);

        assert_eq!(loc.position, Some(3));
        assert_eq!(loc.color, Some(5));
    }

    #[test]
    fn uniform_declared_only_in_fragment_stage_resolves() {
        let vs = "@vertex\nfn main(@location(0) vert: vec3<f32>) -> @builtin(position) vec4<f32> {\n    return vec4<f32>(vert, 1.0);\n}\n";
        let fs = "\
@group(1) @binding(4) var<uniform> model: mat4x4<f32>;

@fragment
fn main() -> @location(0) vec4<f32> {
    return model[0];
}
";
        let (vs, fs) = compile_pair(vs, fs);
        let loc = ProgramLocations::resolve(&vs, &fs);

        assert_eq!(loc.model, Some(UniformSlot { group: 1, binding: 4 }));
        assert_eq!(loc.view, None);
    }

    #[test]
    fn names_are_matched_exactly() {
        let vs = "\
@group(0) @binding(0) var<uniform> Model: mat4x4<f32>;

@vertex
fn main(@location(0) pos: vec3<f32>, @location(1) vertcolor: vec3<f32>) -> @builtin(position) vec4<f32> {
    return Model * vec4<f32>(pos + vertcolor, 1.0);
}
";
        let fs = "@fragment\nfn main() -> @location(0) vec4<f32> {\n    return vec4<f32>(1.0);\n}\n";
        let (vs, fs) = compile_pair(vs, fs);
        let loc = ProgramLocations::resolve(&vs, &fs);

        assert_eq!(loc, ProgramLocations::default());
        assert_eq!(
            loc.unresolved(),
            vec!["vert", "vertColor", "model", "view", "projection"]
        );
    }

    #[test]
    fn outputs_skip_builtins() {
        let (vs, _) = compile_pair(VERTEX, FRAGMENT);
        let outputs = entry_outputs(vs.module(), vs.entry());

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].location, 0);
        assert_eq!(outputs[0].name, Some("fragColor"));
        assert_eq!(type_label(vs.module(), outputs[0].ty), "vec3<f32>");
    }

    #[test]
    fn labels_matrix_types() {
        let (vs, _) = compile_pair(VERTEX, FRAGMENT);
        let model = bound_resources(vs.module())
            .into_iter()
            .find(|r| r.name == Some("model"))
            .unwrap();
        assert_eq!(type_label(vs.module(), model.ty), "mat4x4<f32>");
    }
}
