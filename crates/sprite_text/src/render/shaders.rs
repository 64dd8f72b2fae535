//! Default shader sources for textured glyph quads
//!
//! GLSL ES 1.00, so the same program works on desktop GL and GLES2 contexts.

/// Vertex and fragment stages of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source
    pub vertex: &'static str,
    /// Fragment stage source
    pub fragment: &'static str,
}

/// Vertex stage: pixel-space quad corner through a single MVP matrix
pub const GLYPH_VERTEX_SHADER: &str = r#"
attribute vec2 a_position;
attribute vec2 a_tex_coord;
uniform mat4 u_mvp;
varying vec2 v_tex_coord;

void main() {
    v_tex_coord = a_tex_coord;
    gl_Position = u_mvp * vec4(a_position, 0.0, 1.0);
}
"#;

/// Fragment stage: straight sprite-sheet sample
pub const GLYPH_FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform sampler2D u_texture;
varying vec2 v_tex_coord;

void main() {
    gl_FragColor = texture2D(u_texture, v_tex_coord);
}
"#;

impl ShaderSource {
    /// Program used for every glyph quad of a font
    pub const fn glyph_quad() -> Self {
        Self {
            vertex: GLYPH_VERTEX_SHADER,
            fragment: GLYPH_FRAGMENT_SHADER,
        }
    }
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self::glyph_quad()
    }
}
