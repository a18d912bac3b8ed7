pub(crate) const VERTEX: &str = "\
@group(0) @binding(0) var<uniform> model: mat4x4<f32>;
@group(0) @binding(1) var<uniform> view: mat4x4<f32>;
@group(0) @binding(2) var<uniform> projection: mat4x4<f32>;

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) fragColor: vec3<f32>,
};

@vertex
fn vs_main(@location(0) vert: vec3<f32>, @location(1) vertColor: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip = projection * view * model * vec4<f32>(vert, 1.0);
    out.fragColor = vertColor;
    return out;
}
";

pub(crate) const FRAGMENT: &str = "\
@fragment
fn fs_main(@location(0) fragColor: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(fragColor, 1.0);
}
";
