/// WebGL2 program drawing a wireframe as `LINES`
use cube_core::{CoreError, Result};
use nalgebra::Matrix4;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

const VERT_SRC: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_mvp;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
}
"#;

const FRAG_SRC: &str = r#"#version 300 es
precision mediump float;
uniform vec3 u_color;
out vec4 out_color;
void main() {
    out_color = vec4(u_color, 1.0);
}
"#;

fn compile_shader(gl: &GL, src: &str, shader_type: u32) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| CoreError::Host("could not create shader".into()))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(CoreError::Host(format!("shader compile failed: {log}")));
    }
    Ok(shader)
}

fn link_program(gl: &GL, vert_src: &str, frag_src: &str) -> Result<WebGlProgram> {
    let vert = compile_shader(gl, vert_src, GL::VERTEX_SHADER)?;
    let frag = match compile_shader(gl, frag_src, GL::FRAGMENT_SHADER) {
        Ok(frag) => frag,
        Err(err) => {
            gl.delete_shader(Some(&vert));
            return Err(err);
        }
    };

    let prog = gl
        .create_program()
        .ok_or_else(|| CoreError::Host("could not create program".into()));
    let linked = prog.and_then(|prog| {
        gl.attach_shader(&prog, &vert);
        gl.attach_shader(&prog, &frag);
        gl.link_program(&prog);
        if gl
            .get_program_parameter(&prog, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(prog)
        } else {
            let log = gl.get_program_info_log(&prog).unwrap_or_default();
            gl.delete_program(Some(&prog));
            Err(CoreError::Host(format!("program link failed: {log}")))
        }
    });

    // Linked programs keep their own copy of the shaders
    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));
    linked
}

/// Little-endian bytes for `bufferData`
pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// GPU-side resources for one wireframe
pub struct WireProgram {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    mvp: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    vertex_count: i32,
}

impl WireProgram {
    /// Upload `line_list` (xyz pairs) once; frames only change uniforms
    pub fn new(gl: &GL, line_list: &[f32]) -> Result<Self> {
        let program = link_program(gl, VERT_SRC, FRAG_SRC)?;

        let Some(vao) = gl.create_vertex_array() else {
            gl.delete_program(Some(&program));
            return Err(CoreError::Host("could not create vertex array".into()));
        };
        let Some(buffer) = gl.create_buffer() else {
            gl.delete_vertex_array(Some(&vao));
            gl.delete_program(Some(&program));
            return Err(CoreError::Host("could not create buffer".into()));
        };

        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, &f32_bytes(line_list), GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);
        gl.bind_buffer(GL::ARRAY_BUFFER, None);

        Ok(Self {
            mvp: gl.get_uniform_location(&program, "u_mvp"),
            color: gl.get_uniform_location(&program, "u_color"),
            program,
            vao,
            buffer,
            vertex_count: (line_list.len() / 3) as i32,
        })
    }

    pub fn draw(&self, gl: &GL, mvp: &Matrix4<f32>, color: [f32; 3]) {
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        // nalgebra storage is column-major, as GL expects
        gl.uniform_matrix4fv_with_f32_array(self.mvp.as_ref(), false, mvp.as_slice());
        gl.uniform3f(self.color.as_ref(), color[0], color[1], color[2]);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::LINES, 0, self.vertex_count);
        gl.bind_vertex_array(None);
    }

    pub fn delete(self, gl: &GL) {
        gl.delete_buffer(Some(&self.buffer));
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
    }
}
