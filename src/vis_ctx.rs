use crate::camera::MouseButton;
use crate::gl_wrap::Drop;
use crate::vis_gl::{VisGl, VisGlError};
use glow::HasContext;
#[cfg(not(target_arch = "wasm32"))]
mod native {
    pub use glutin::{
        dpi::LogicalSize,
        event::MouseButton as MouseButtonEvent,
        event::{ElementState, Event, KeyboardInput, MouseScrollDelta, VirtualKeyCode, WindowEvent},
        event_loop::{ControlFlow, EventLoop},
        window::{Window, WindowBuilder},
        ContextBuilder, ContextWrapper, PossiblyCurrent,
    };
}
#[cfg(not(target_arch = "wasm32"))]
use native::*;

#[cfg(target_arch = "wasm32")]
mod web {
    pub use wasm_bindgen::JsCast;
    pub use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext};
    pub use winit::{
        event::MouseButton as MouseButtonEvent,
        event::{ElementState, Event, KeyboardInput, MouseScrollDelta, VirtualKeyCode, WindowEvent},
        event_loop::{ControlFlow, EventLoop},
        platform::web::WindowExtWebSys,
        window::{Window, WindowBuilder},
    };
}
#[cfg(target_arch = "wasm32")]
use web::*;

const TITLE: &str = "gesture particles";

// contains gl context, window, event loop
#[cfg(not(target_arch = "wasm32"))]
pub struct VisContext {
    pub gl: glow::Context,
    pub window: ContextWrapper<PossiblyCurrent, Window>,
    pub event_loop: EventLoop<()>,
    pub shader_version: String,
}

#[cfg(target_arch = "wasm32")]
pub struct VisContext {
    pub gl: glow::Context,
    pub window: Window,
    pub event_loop: EventLoop<()>,
    pub shader_version: String,
}

// digit keys 1-4 map onto template ids
fn template_key(key: VirtualKeyCode) -> Option<u32> {
    match key {
        VirtualKeyCode::Key1 => Some(0),
        VirtualKeyCode::Key2 => Some(1),
        VirtualKeyCode::Key3 => Some(2),
        VirtualKeyCode::Key4 => Some(3),
        _ => None,
    }
}

fn handle_key(vis: &mut VisGl, input: KeyboardInput) {
    if input.state != ElementState::Pressed {
        return;
    }
    if let Some(id) = input.virtual_keycode.and_then(template_key) {
        vis.select_template(id);
    }
}

// routes input to the vis, returns true when the window asked to close
fn handle_window_event(gl: &glow::Context, vis: &mut VisGl, event: WindowEvent<'_>) -> bool {
    match event {
        WindowEvent::CursorMoved { position, .. } => vis.mouse_move(gl, position.x, position.y),
        WindowEvent::MouseWheel { delta, .. } => {
            let ds = match delta {
                MouseScrollDelta::PixelDelta(position) => position.y,
                MouseScrollDelta::LineDelta(_, y) => y as f64,
            };
            vis.mouse_wheel(gl, ds);
        }
        WindowEvent::MouseInput { button, state, .. } => {
            let button = match button {
                MouseButtonEvent::Left => MouseButton::Left,
                MouseButtonEvent::Right => MouseButton::Right,
                _ => MouseButton::Other,
            };
            vis.mouse_input(gl, button, state == ElementState::Pressed);
        }
        WindowEvent::KeyboardInput { input, .. } => handle_key(vis, input),
        WindowEvent::Resized(size) => vis.resize(gl, size.width, size.height),
        WindowEvent::CloseRequested => return true,
        _ => (),
    }
    false
}

fn log_gl_info(gl: &glow::Context, shader_version: &str) {
    let version;
    unsafe {
        version = gl.get_parameter_string(glow::VERSION);
    }
    log::info!("gl {} with shaders {}", version, shader_version);
}

#[cfg(not(target_arch = "wasm32"))]
impl VisContext {
    pub fn new(width: f64, height: f64) -> Result<Self, VisContextError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(LogicalSize::new(width, height))
            .with_title(TITLE);
        let ctx_builder = ContextBuilder::new()
            .with_multisampling(4)
            .build_windowed(window_builder, &event_loop)?;
        let gl;
        let window;
        unsafe {
            window = ctx_builder
                .make_current()
                .map_err(|(_, e)| VisContextError::MakeCurrent(e))?;
            gl = glow::Context::from_loader_function(|x| window.get_proc_address(x) as *const _);
        }
        let shader_version = String::from("#version 410");
        log_gl_info(&gl, &shader_version);
        Ok(Self {
            gl,
            window,
            event_loop,
            shader_version,
        })
    }

    // context passed as argument since running event loop causes move
    // calls vis event handlers on event
    pub fn run(context: VisContext, mut vis: VisGl) -> Result<(), VisContextError> {
        vis.setup_gl_resources(&context.gl)?;
        let size = context.window.window().inner_size();
        vis.resize(&context.gl, size.width, size.height);
        let mut draw = VisGl::get_draw();
        context.event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::WindowEvent { event, .. } => {
                    if let WindowEvent::Resized(size) = event {
                        context.window.resize(size);
                    }
                    if handle_window_event(&context.gl, &mut vis, event) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                Event::LoopDestroyed => {
                    vis.drop(&context.gl);
                }
                Event::RedrawRequested(_) => {
                    draw(&context.gl, &mut vis);
                    if let Err(e) = context.window.swap_buffers() {
                        log::error!("swap buffers failed: {}", e);
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    context.window.window().request_redraw();
                }
                _ => (),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
impl VisContext {
    pub fn new(width: f64, height: f64) -> Result<Self, VisContextError> {
        let shader_version = String::from("#version 300 es");
        let event_loop = EventLoop::new();
        let winit_window = WindowBuilder::new()
            .with_title(TITLE)
            .build(&event_loop)
            .map_err(|_| VisContextError::Window)?;
        let canvas = winit_window.canvas();
        let body = window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .ok_or(VisContextError::Document)?;

        canvas
            .style()
            .set_css_text(&format!("width: {:.0}px; height: {:.0}px;", width, height));
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        body.append_child(&canvas)
            .map_err(|_| VisContextError::Document)?;

        let ctx = canvas
            .get_context("webgl2")
            .ok()
            .and_then(|o| o)
            .and_then(|e| e.dyn_into::<WebGl2RenderingContext>().ok())
            .ok_or(VisContextError::WebGl2Context)?;
        let gl = glow::Context::from_webgl2_context(ctx);
        log_gl_info(&gl, &shader_version);
        Ok(Self {
            gl,
            shader_version,
            window: winit_window,
            event_loop,
        })
    }

    pub fn run(context: VisContext, mut vis: VisGl) -> Result<(), VisContextError> {
        vis.setup_gl_resources(&context.gl)?;
        let canvas = context.window.canvas();
        vis.resize(&context.gl, canvas.width(), canvas.height());
        let mut draw = VisGl::get_draw();

        context.event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => {
                    if handle_window_event(&context.gl, &mut vis, event) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                Event::RedrawRequested(_) => {
                    draw(&context.gl, &mut vis);
                    context.window.request_redraw();
                }
                _ => (),
            }
        });
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisContextError {
    #[error("{0}")]
    VisGl(#[from] VisGlError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("{0}")]
    CtxCreation(#[from] glutin::CreationError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("{0}")]
    MakeCurrent(glutin::ContextError),
    #[cfg(target_arch = "wasm32")]
    #[error("Window creation failed")]
    Window,
    #[cfg(target_arch = "wasm32")]
    #[error("Document body not available")]
    Document,
    #[cfg(target_arch = "wasm32")]
    #[error("Web sys webgl2 context creation failed")]
    WebGl2Context,
}
