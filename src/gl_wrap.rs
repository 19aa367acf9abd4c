use glam::Mat4;
use glow::HasContext;

// free resources
pub trait Drop {
    fn drop(&self, gl: &glow::Context);
}

// set gl state
pub trait Bind {
    fn bind(&self, gl: &glow::Context);
}

pub struct Shader {
    pub id: glow::Shader,
}

impl Shader {
    pub fn new(
        gl: &glow::Context,
        version: &str,
        source: &str,
        shader_type: u32,
    ) -> Result<Self, ShaderError> {
        let id;
        unsafe {
            id = gl.create_shader(shader_type)?;
            gl.shader_source(id, &format!("{}\n{}", version, source));
            gl.compile_shader(id);
        }

        // check if shader compiled successfully
        let success;
        unsafe {
            success = gl.get_shader_compile_status(id);
        }
        if success {
            Ok(Self { id })
        } else {
            let log;
            unsafe {
                log = gl.get_shader_info_log(id);
                gl.delete_shader(id);
            }
            Err(ShaderError::Compilation(log))
        }
    }
}

impl Drop for Shader {
    fn drop(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_shader(self.id);
        }
    }
}

pub struct Program {
    pub id: glow::Program,
}

impl Program {
    pub fn new(
        gl: &glow::Context,
        vertex_shader: &Shader,
        fragment_shader: &Shader,
    ) -> Result<Self, ProgramError> {
        // link shaders into program
        let id;
        unsafe {
            id = gl.create_program()?;
            gl.attach_shader(id, vertex_shader.id);
            gl.attach_shader(id, fragment_shader.id);
            gl.link_program(id);
        }

        let success;
        unsafe {
            success = gl.get_program_link_status(id);
        }
        if success {
            Ok(Self { id })
        } else {
            let log;
            unsafe {
                log = gl.get_program_info_log(id);
                gl.delete_program(id);
            }
            Err(ProgramError::Linking(log))
        }
    }

    // sources are compiled into the binary so wasm builds need no file access
    pub fn new_from_sources(
        gl: &glow::Context,
        version: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ProgramError> {
        let vertex_shader = Shader::new(gl, version, vertex_source, glow::VERTEX_SHADER)?;
        let fragment_shader =
            match Shader::new(gl, version, fragment_source, glow::FRAGMENT_SHADER) {
                Ok(shader) => shader,
                Err(e) => {
                    vertex_shader.drop(gl);
                    return Err(e.into());
                }
            };
        let result = Self::new(gl, &vertex_shader, &fragment_shader);

        // free no longer needed shader resources after linking
        vertex_shader.drop(gl);
        fragment_shader.drop(gl);

        result
    }
}

impl Drop for Program {
    fn drop(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.id);
        }
    }
}

impl Bind for Program {
    fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.id));
        }
    }
}

pub struct Buffer {
    pub id: glow::Buffer,
    pub draw_type: u32,
    // number of floats last uploaded
    pub len: usize,
}

impl Buffer {
    pub fn new(gl: &glow::Context, draw_type: u32) -> Result<Self, BufferError> {
        let id;
        unsafe {
            id = gl.create_buffer()?;
        }
        Ok(Self {
            id,
            draw_type,
            len: 0,
        })
    }

    pub fn set_data(&mut self, gl: &glow::Context, data: &[f32]) {
        self.bind(gl);
        unsafe {
            let (_, bytes, _) = data.align_to::<u8>();
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, self.draw_type);
        }
        self.len = data.len();
    }
}

impl Bind for Buffer {
    fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id));
        }
    }
}

impl Drop for Buffer {
    fn drop(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.id);
        }
    }
}

pub struct VertexArray {
    pub id: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &glow::Context) -> Result<Self, VertexArrayError> {
        let id;
        unsafe {
            id = gl.create_vertex_array()?;
        }
        Ok(Self { id })
    }

    // stride and offset are counted in floats
    pub fn set_attrib(
        gl: &glow::Context,
        program: &Program,
        name: &str,
        size: i32,
        stride: i32,
        offset: i32,
    ) -> Result<(), VertexArrayError> {
        let location;
        unsafe {
            location = gl.get_attrib_location(program.id, name);
        }
        match location {
            None => Err(VertexArrayError::Attrib(name.to_string())),
            Some(location) => unsafe {
                let fsize = std::mem::size_of::<f32>() as i32;
                gl.vertex_attrib_pointer_f32(
                    location,
                    size,
                    glow::FLOAT,
                    false,
                    fsize * stride,
                    fsize * offset,
                );
                gl.enable_vertex_attrib_array(location);
                Ok(())
            },
        }
    }
}

impl Bind for VertexArray {
    fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.id));
        }
    }
}

impl Drop for VertexArray {
    fn drop(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.id);
        }
    }
}

pub struct UniformMatrix {
    pub data: Mat4,
    location: glow::UniformLocation,
}

impl UniformMatrix {
    pub fn new(
        gl: &glow::Context,
        program: &Program,
        name: &str,
        data: Mat4,
    ) -> Result<Self, UniformMatrixError> {
        let location;
        unsafe {
            location = gl.get_uniform_location(program.id, name);
        }
        match location {
            Some(location) => Ok(Self { location, data }),
            None => Err(UniformMatrixError::Location(name.to_string())),
        }
    }

    // program must be bound
    pub fn apply(&self, gl: &glow::Context) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(&self.location), false, &self.data.to_cols_array());
        }
    }
}

// glowing sprites: colors add up where particles overlap
pub fn set_additive_blend(gl: &glow::Context) {
    unsafe {
        gl.disable(glow::DEPTH_TEST);
        gl.enable(glow::BLEND);
        gl.blend_func(glow::SRC_ALPHA, glow::ONE);
        // webgl2 always honors gl_PointSize, desktop gl needs it enabled
        #[cfg(not(target_arch = "wasm32"))]
        gl.enable(glow::PROGRAM_POINT_SIZE);
    }
}

pub fn set_viewport(gl: &glow::Context, width: u32, height: u32) {
    unsafe {
        gl.viewport(0, 0, width as i32, height as i32);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("Compilation error: {0}")]
    Compilation(String),
    #[error("{0}")]
    String(String),
}

impl From<String> for ShaderError {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Linking error: {0}")]
    Linking(String),
    #[error("{0}")]
    Shader(#[from] ShaderError),
    #[error("{0}")]
    String(String),
}

impl From<String> for ProgramError {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("{0}")]
    String(String),
}

impl From<String> for BufferError {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Error, Debug)]
pub enum VertexArrayError {
    #[error("Attrib location not found: {0}")]
    Attrib(String),
    #[error("{0}")]
    String(String),
}

impl From<String> for VertexArrayError {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Error, Debug)]
pub enum UniformMatrixError {
    #[error("Uniform location not found: {0}")]
    Location(String),
}
