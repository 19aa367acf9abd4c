use crate::camera::{MouseButton, OrbitCamera};
use crate::config::VisConfig;
use crate::evaluator::{Evaluator, RenderedPoint};
use crate::gl_wrap::{set_viewport, Bind, Drop, Program, UniformMatrix};
use crate::params::FrameParams;
use crate::points::Points;
use crate::signal::{ControlLoop, SignalSource};
use glam::Mat4;
use glow::HasContext;
use instant::Instant;

/// Per-frame pipeline without any gl state.
///
/// Ticks the control loop, evaluates every particle against the resulting
/// snapshot and flattens the points into the vertex layout `Points` draws.
pub struct FrameDriver {
    pub control: ControlLoop,
    pub evaluator: Evaluator,
    points: Vec<RenderedPoint>,
    vertices: Vec<f32>,
}

impl FrameDriver {
    pub fn new(config: &VisConfig) -> Self {
        Self::with_control(config, ControlLoop::new(config))
    }

    pub fn with_source(config: &VisConfig, source: Box<dyn SignalSource>) -> Self {
        Self::with_control(config, ControlLoop::with_source(config, source))
    }

    fn with_control(config: &VisConfig, control: ControlLoop) -> Self {
        let evaluator = Evaluator::new(config);
        let floats = evaluator.particle_count() * RenderedPoint::FLOATS;
        Self {
            control,
            evaluator,
            points: Vec::new(),
            vertices: Vec::with_capacity(floats),
        }
    }

    pub fn advance(&mut self, time: f32, view: &Mat4) -> FrameParams {
        let params = self.control.tick(time);
        self.points = self.evaluator.evaluate_all(params, view);
        Evaluator::write_vertices(&self.points, &mut self.vertices);
        params
    }

    pub fn points(&self) -> &[RenderedPoint] {
        &self.points
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }
}

// contains all vis logic and gl resources
pub struct VisGl {
    pub points: Points,
    pub mvp: MvpMatrices,
    pub camera: OrbitCamera,
    pub driver: FrameDriver,
}

impl VisGl {
    pub fn new(
        gl: &glow::Context,
        shader_version: &str,
        config: &VisConfig,
        width: f64,
        height: f64,
    ) -> Result<Self, VisGlError> {
        let points = Points::new(gl, shader_version)?;
        let camera = OrbitCamera::new(width, height);
        let mvp = MvpMatrices::new(gl, &points.program, &camera)?;
        let driver = FrameDriver::new(config);
        log::info!(
            "{} particles, starting on {}",
            driver.evaluator.particle_count(),
            driver.control.template().name()
        );
        Ok(Self {
            points,
            mvp,
            camera,
            driver,
        })
    }

    pub fn mouse_move(&mut self, gl: &glow::Context, x: f64, y: f64) {
        if self.camera.mouse_move(x, y) {
            self.apply_view(gl);
        }
    }

    pub fn mouse_input(&mut self, _gl: &glow::Context, button: MouseButton, pressed: bool) {
        self.camera.mouse_input(button, pressed);
    }

    pub fn mouse_wheel(&mut self, gl: &glow::Context, delta: f64) {
        self.camera.mouse_wheel(delta);
        self.apply_view(gl);
    }

    // number keys pick a template directly
    pub fn select_template(&mut self, id: u32) {
        self.driver.control.request_template(id);
    }

    pub fn resize(&mut self, gl: &glow::Context, width: u32, height: u32) {
        log::debug!("resize to {}x{}", width, height);
        set_viewport(gl, width, height);
        self.camera.resize(width as f64, height as f64);
        self.points.program.bind(gl);
        self.mvp.proj.data = self.camera.proj;
        self.mvp.proj.apply(gl);
    }

    fn apply_view(&mut self, gl: &glow::Context) {
        self.points.program.bind(gl);
        self.mvp.view.data = self.camera.view;
        self.mvp.view.apply(gl);
    }

    // get main draw loop as closure, time starts at the first call to this
    pub fn get_draw() -> impl FnMut(&glow::Context, &mut VisGl) {
        let start = Instant::now();
        move |gl: &glow::Context, vis: &mut VisGl| {
            let time = start.elapsed().as_secs_f32();
            let frame_start = Instant::now();
            vis.driver.advance(time, &vis.camera.view);
            unsafe {
                gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            }
            vis.points.draw(gl, Some(vis.driver.vertices()));
            log::trace!(
                "frame at {:.3}s: {} points in {:?}",
                time,
                vis.points.count(),
                frame_start.elapsed()
            );
        }
    }

    // bind required resources for start of draw loop
    pub fn setup_gl_resources(&self, gl: &glow::Context) -> Result<(), VisGlError> {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.02, 1.0);
        }
        self.points.program.bind(gl);
        self.mvp.proj.apply(gl);
        self.mvp.view.apply(gl);
        Ok(())
    }
}

impl Drop for VisGl {
    fn drop(&self, gl: &glow::Context) {
        self.points.drop(gl);
    }
}

// matrices shared by the point program
pub struct MvpMatrices {
    pub proj: UniformMatrix,
    pub view: UniformMatrix,
}

impl MvpMatrices {
    pub fn new(
        gl: &glow::Context,
        program: &Program,
        camera: &OrbitCamera,
    ) -> Result<Self, MvpError> {
        let proj = UniformMatrix::new(gl, program, "projMatrix", camera.proj)?;
        let view = UniformMatrix::new(gl, program, "viewMatrix", camera.view)?;
        Ok(Self { proj, view })
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisGlError {
    #[error("{0}")]
    Mvp(#[from] MvpError),
    #[error("{0}")]
    Points(#[from] crate::points::PointsError),
}

#[derive(Error, Debug)]
pub enum MvpError {
    #[error("{0}")]
    UniformMatrix(#[from] crate::gl_wrap::UniformMatrixError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::default_view;
    use crate::params::Template;
    use crate::shapes::heart;
    use crate::signal::GestureSignal;

    struct Still;

    impl SignalSource for Still {
        fn sample(&mut self, _time: f32) -> GestureSignal {
            GestureSignal {
                expansion: 0.0,
                template: None,
            }
        }
    }

    #[test]
    fn driver_fills_interleaved_vertices() {
        let config = VisConfig {
            particle_count: 4,
            ..VisConfig::default()
        };
        let mut driver = FrameDriver::with_source(&config, Box::new(Still));
        let params = driver.advance(0.0, &default_view());
        assert_eq!(params.template(), Template::Heart);
        assert_eq!(driver.points().len(), 4);
        assert_eq!(driver.vertices().len(), 4 * RenderedPoint::FLOATS);
        let second = &driver.vertices()[RenderedPoint::FLOATS..RenderedPoint::FLOATS + 3];
        assert_eq!(second, &heart(0.25).to_array()[..]);
    }

    #[test]
    fn driver_follows_the_template_timer() {
        let config = VisConfig {
            particle_count: 8,
            ..VisConfig::default()
        };
        let mut driver = FrameDriver::new(&config);
        let view = default_view();
        assert_eq!(driver.advance(0.0, &view).template(), Template::Heart);
        assert_eq!(driver.advance(5.5, &view).template(), Template::Flower);
        driver.control.request_template(3);
        assert_eq!(driver.advance(5.6, &view).template(), Template::Firework);
        assert!(driver.points().iter().all(|p| p.position.is_finite()));
    }

    #[test]
    fn empty_cloud_produces_no_vertices() {
        let config = VisConfig {
            particle_count: 0,
            ..VisConfig::default()
        };
        let mut driver = FrameDriver::new(&config);
        driver.advance(1.0, &default_view());
        assert!(driver.vertices().is_empty());
    }
}
