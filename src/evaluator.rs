//! Per-particle evaluation.
//!
//! `Evaluator::point` is a pure function of the frame snapshot and a particle
//! index, so a frame is just that function fanned out over `0..N`. The batch
//! entry point runs the fan-out on the rayon pool.

use crate::camera::CAMERA_DISTANCE;
use crate::config::VisConfig;
use crate::params::{clamp_expansion, FrameParams, Template, TEMPLATE_COUNT};
use crate::shapes::{normalized_index, shape_position, Burst};
use glam::{Mat4, Vec3};
use rayon::prelude::*;
use std::f32::consts::TAU;

// keeps points behind or at the eye from blowing up the size
const MIN_DEPTH: f32 = 0.1;

/// Output for one particle, rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedPoint {
    pub position: Vec3,
    pub color: Vec3,
    pub size: f32,
}

impl RenderedPoint {
    // interleaved vertex layout: position, color, size
    pub const FLOATS: usize = 7;

    pub fn to_vertex(&self) -> [f32; Self::FLOATS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.x,
            self.color.y,
            self.color.z,
            self.size,
        ]
    }
}

// how the accent tint breathes in and out
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorCycle {
    rate: f32,
    floor: f32,
    ceiling: f32,
}

const CALM_CYCLE: ColorCycle = ColorCycle {
    rate: 1.2,
    floor: 0.0,
    ceiling: 0.7,
};

const HOT_CYCLE: ColorCycle = ColorCycle {
    rate: 6.0,
    floor: 0.6,
    ceiling: 1.0,
};

fn color_cycle(template: Template) -> ColorCycle {
    match template {
        Template::Firework => HOT_CYCLE,
        _ => CALM_CYCLE,
    }
}

// uniform outward scale, identical for every template
pub fn expand(position: Vec3, expansion: f32, gain: f32) -> Vec3 {
    position * (1.0 + clamp_expansion(expansion) * gain)
}

pub struct Evaluator {
    particle_count: usize,
    expansion_gain: f32,
    base_color: Vec3,
    accents: [Vec3; TEMPLATE_COUNT],
    point_size: f32,
    expansion_shrink: f32,
    reference_depth: f32,
    burst: Burst,
}

impl Evaluator {
    pub fn new(config: &VisConfig) -> Self {
        Self {
            particle_count: config.particle_count,
            expansion_gain: config.expansion_gain,
            base_color: config.base_color,
            accents: config.accents,
            point_size: config.point_size,
            expansion_shrink: config.expansion_shrink,
            reference_depth: CAMERA_DISTANCE,
            burst: config.burst,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    // shape position after expansion, None past the particle count
    pub fn position(&self, params: &FrameParams, index: usize) -> Option<Vec3> {
        let n = normalized_index(index, self.particle_count)?;
        let shape = shape_position(params.template(), n, params.time(), &self.burst);
        Some(expand(shape, params.expansion(), self.expansion_gain))
    }

    pub fn color(&self, params: &FrameParams, normalized_index: f32) -> Vec3 {
        let template = params.template();
        let cycle = color_cycle(template);
        let wave = 0.5 + 0.5 * (params.time() * cycle.rate + normalized_index * TAU).sin();
        let mix = cycle.floor + (cycle.ceiling - cycle.floor) * wave;
        let accent = self.accents[template.id() as usize];
        self.base_color
            .lerp(accent, mix)
            .clamp(Vec3::ZERO, Vec3::ONE)
    }

    /// Point size in pixels for a point `depth` units in front of the eye.
    ///
    /// Shrinks with distance and with expansion, reaching
    /// `1 - expansion_shrink` of its size when fully expanded.
    pub fn size(&self, params: &FrameParams, depth: f32) -> f32 {
        let perspective = self.reference_depth / depth.max(MIN_DEPTH);
        let spread = 1.0 - params.expansion() * self.expansion_shrink;
        self.point_size * perspective * spread
    }

    pub fn point(&self, params: &FrameParams, view: &Mat4, index: usize) -> Option<RenderedPoint> {
        let n = normalized_index(index, self.particle_count)?;
        let position = self.position(params, index)?;
        let depth = -view.transform_point3(position).z;
        Some(RenderedPoint {
            position,
            color: self.color(params, n),
            size: self.size(params, depth),
        })
    }

    pub fn evaluate_all(&self, params: FrameParams, view: &Mat4) -> Vec<RenderedPoint> {
        (0..self.particle_count)
            .into_par_iter()
            .filter_map(|index| self.point(&params, view, index))
            .collect()
    }

    // flatten into the interleaved buffer layout, reusing the allocation
    pub fn write_vertices(points: &[RenderedPoint], out: &mut Vec<f32>) {
        out.clear();
        out.reserve(points.len() * RenderedPoint::FLOATS);
        for point in points {
            out.extend_from_slice(&point.to_vertex());
        }
    }
}
