/// Instanced circle pipeline: six vertices per circle expand a quad in the
/// vertex stage, the fragment stage cuts out a soft-edged disc.
pub const RENDER_SHADER: &str = r#"
struct CircleInstance {
    center: vec2<f32>,
    radius: f32,
    _pad: f32,
    color: vec4<f32>,
};

struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<storage, read> circles: array<CircleInstance>;
@group(0) @binding(1) var<uniform> viewport: Viewport;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    let instance = circles[vertex_index / 6u];
    let corner = quad[vertex_index % 6u];
    let world = instance.center + corner * instance.radius;

    // Screen coordinates have y down; clip space has y up.
    let ndc = vec2<f32>(
        world.x / viewport.size.x * 2.0 - 1.0,
        1.0 - world.y / viewport.size.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.local = corner;
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.local);
    if (dist > 1.0) {
        discard;
    }
    let edge = 1.0 - smoothstep(0.92, 1.0, dist);
    return vec4<f32>(in.color.rgb, in.color.a * edge);
}
"#;
