use glam::{Mat4, Quat, Vec3};

// eye distance that frames a fully expanded cloud
pub const CAMERA_DISTANCE: f32 = 7.0;
const FOV: f32 = 1.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 50.0;
const ROTATION_SPEED: f64 = 0.01;
const ZOOM_SPEED: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

pub fn default_view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_DISTANCE), Vec3::ZERO, Vec3::Y)
}

pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV, aspect, NEAR, FAR)
}

// orbit camera, left drag rotates the cloud and scroll zooms
pub struct OrbitCamera {
    pub proj: Mat4,
    pub view: Mat4,
    dragging: bool,
    last: Option<(f64, f64)>,
}

impl OrbitCamera {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            proj: projection(aspect(width, height)),
            view: default_view(),
            dragging: false,
            last: None,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.proj = projection(aspect(width, height));
    }

    pub fn mouse_input(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left {
            self.dragging = pressed;
        }
    }

    // returns true when the view changed
    pub fn mouse_move(&mut self, x: f64, y: f64) -> bool {
        let moved = match (self.dragging, self.last) {
            (true, Some((last_x, last_y))) => {
                self.view = rotate_from_mouse(self.view, x - last_x, y - last_y);
                true
            }
            _ => false,
        };
        self.last = Some((x, y));
        moved
    }

    pub fn mouse_wheel(&mut self, delta: f64) {
        self.view = zoom_from_scroll(self.view, delta);
    }
}

fn aspect(width: f64, height: f64) -> f32 {
    if height > 0.0 {
        (width / height) as f32
    } else {
        1.0
    }
}

pub fn rotate_from_mouse(view: Mat4, dx: f64, dy: f64) -> Mat4 {
    let x_rad = (dy * ROTATION_SPEED) as f32;
    let y_rad = (dx * ROTATION_SPEED) as f32;

    // rotate about model-space axes that line up with the screen
    let inv_view = view.inverse();
    let x_axis = inv_view.transform_vector3(Vec3::X).normalize_or_zero();
    let y_axis = inv_view.transform_vector3(Vec3::Y).normalize_or_zero();
    if x_axis == Vec3::ZERO || y_axis == Vec3::ZERO {
        return view;
    }

    let x_rot = Mat4::from_quat(Quat::from_axis_angle(x_axis, x_rad));
    let y_rot = Mat4::from_quat(Quat::from_axis_angle(y_axis, y_rad));
    view.mul_mat4(&x_rot.mul_mat4(&y_rot))
}

pub fn zoom_from_scroll(view: Mat4, delta: f64) -> Mat4 {
    let zoom = (delta * ZOOM_SPEED).clamp(-0.5, 0.5) as f32;
    view.mul_mat4(&Mat4::from_scale(Vec3::splat(1.0 + zoom)))
}
