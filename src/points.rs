use crate::evaluator::RenderedPoint;
use crate::gl_wrap::{set_additive_blend, Bind, Buffer, Drop, Program, VertexArray};
use glow::HasContext;

// gl resources for drawing the particle cloud as point sprites
pub struct Points {
    pub program: Program,
    pub buffer: Buffer,
    pub vao: VertexArray,
}

impl Points {
    pub fn new(gl: &glow::Context, shader_version: &str) -> Result<Self, PointsError> {
        let program = Program::new_from_sources(
            gl,
            shader_version,
            include_str!("../shaders/point-vert.glsl"),
            include_str!("../shaders/point-frag.glsl"),
        )?;
        // contents replaced every frame
        let buffer = Buffer::new(gl, glow::STREAM_DRAW)?;
        let vao = VertexArray::new(gl)?;
        program.bind(gl);
        vao.bind(gl);
        buffer.bind(gl);
        let stride = RenderedPoint::FLOATS as i32;
        VertexArray::set_attrib(gl, &program, "position", 3, stride, 0)?;
        VertexArray::set_attrib(gl, &program, "color", 3, stride, 3)?;
        VertexArray::set_attrib(gl, &program, "size", 1, stride, 6)?;
        set_additive_blend(gl);
        Ok(Self {
            program,
            buffer,
            vao,
        })
    }

    pub fn count(&self) -> usize {
        self.buffer.len / RenderedPoint::FLOATS
    }

    // upload interleaved vertices when given, then draw what the buffer holds
    pub fn draw(&mut self, gl: &glow::Context, data: Option<&[f32]>) {
        self.program.bind(gl);
        self.vao.bind(gl);
        if let Some(d) = data {
            self.buffer.set_data(gl, d);
        }
        let count = self.count();
        if count == 0 {
            return;
        }
        unsafe {
            gl.draw_arrays(glow::POINTS, 0, count as i32);
        }
    }
}

impl Drop for Points {
    fn drop(&self, gl: &glow::Context) {
        self.program.drop(gl);
        self.buffer.drop(gl);
        self.vao.drop(gl);
    }
}

use thiserror::Error;
#[derive(Error, Debug)]
pub enum PointsError {
    #[error("{0}")]
    Program(#[from] crate::gl_wrap::ProgramError),
    #[error("{0}")]
    Buffer(#[from] crate::gl_wrap::BufferError),
    #[error("{0}")]
    VertexArray(#[from] crate::gl_wrap::VertexArrayError),
}
