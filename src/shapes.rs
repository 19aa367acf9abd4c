//! Closed-form particle shapes.
//!
//! Every shape maps a normalized particle index in `[0, 1]` (and, where the
//! shape animates, elapsed time in seconds) to a point in model space. All
//! shapes share roughly a unit envelope so switching templates keeps the
//! same visual scale. Angles use the full `TAU` turn so index `0` and index
//! `~1` land on neighbouring points.

use crate::params::Template;
use glam::Vec3;
use std::f32::consts::TAU;

// heart curve spans about 32 units wide before scaling
pub const HEART_SCALE: f32 = 1.0 / 17.0;

pub const FLOWER_BASE: f32 = 0.6;
pub const FLOWER_AMPLITUDE: f32 = 0.35;
pub const FLOWER_PETALS: f32 = 5.0;
pub const FLOWER_DEPTH: f32 = 0.15;

pub const SATURN_RADIUS: f32 = 1.0;
pub const SATURN_WAVE_AMPLITUDE: f32 = 0.12;
pub const SATURN_WAVE_SPEED: f32 = 1.5;
// whole number of turns keeps the wave seamless at the wrap point
pub const SATURN_PHASE_SPREAD: f32 = 2.0 * TAU;

/// Timing and reach of the firework burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    /// bursts per second
    pub rate: f32,
    /// per-particle phase offset, zero fires every particle together
    pub spread: f32,
    pub amplitude: f32,
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            rate: 0.4,
            spread: 0.0,
            // phase * (1 - phase) peaks at 0.25, so the fastest particle reaches 1.0
            amplitude: 4.0,
        }
    }
}

// stable fraction of a particle index over the configured count
pub fn normalized_index(index: usize, count: usize) -> Option<f32> {
    if count == 0 || index >= count {
        None
    } else {
        Some(index as f32 / count as f32)
    }
}

pub fn heart(normalized_index: f32) -> Vec3 {
    let angle = normalized_index * TAU;
    let x = 16.0 * angle.sin().powi(3);
    let y = 13.0 * angle.cos()
        - 5.0 * (2.0 * angle).cos()
        - 2.0 * (3.0 * angle).cos()
        - (4.0 * angle).cos();
    Vec3::new(x, y, 0.0) * HEART_SCALE
}

pub fn flower(normalized_index: f32) -> Vec3 {
    let angle = normalized_index * TAU;
    let r = FLOWER_BASE + FLOWER_AMPLITUDE * (FLOWER_PETALS * angle).sin();
    Vec3::new(
        r * angle.cos(),
        r * angle.sin(),
        FLOWER_DEPTH * (3.0 * angle).cos(),
    )
}

pub fn saturn(normalized_index: f32, time: f32) -> Vec3 {
    let angle = normalized_index * TAU;
    let z = SATURN_WAVE_AMPLITUDE
        * (time * SATURN_WAVE_SPEED + normalized_index * SATURN_PHASE_SPREAD).sin();
    Vec3::new(SATURN_RADIUS * angle.cos(), SATURN_RADIUS * angle.sin(), z)
}

pub fn firework(normalized_index: f32, time: f32, burst: &Burst) -> Vec3 {
    let phase = explosion_phase(normalized_index, time, burst);
    burst_direction(normalized_index)
        * burst_speed(normalized_index)
        * phase
        * (1.0 - phase)
        * burst.amplitude
}

// cycles through [0, 1), one cycle per burst
pub fn explosion_phase(normalized_index: f32, time: f32, burst: &Burst) -> f32 {
    fract(time * burst.rate + normalized_index * burst.spread)
}

/// Fixed unit direction for a particle's burst.
///
/// Hashed from the index alone so a particle flies the same way every cycle.
pub fn burst_direction(normalized_index: f32) -> Vec3 {
    let theta = hash(normalized_index * 127.1 + 0.31) * TAU;
    let z = hash(normalized_index * 311.7 + 0.73) * 2.0 - 1.0;
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * theta.cos(), ring * theta.sin(), z)
}

// in [0.55, 1.0]
pub fn burst_speed(normalized_index: f32) -> f32 {
    0.55 + 0.45 * hash(normalized_index * 269.5 + 0.17)
}

pub fn shape_position(template: Template, normalized_index: f32, time: f32, burst: &Burst) -> Vec3 {
    match template {
        Template::Heart => heart(normalized_index),
        Template::Flower => flower(normalized_index),
        Template::Saturn => saturn(normalized_index, time),
        Template::Firework => firework(normalized_index, time, burst),
    }
}

// always in [0, 1), unlike f32::fract for negative input
fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

fn hash(x: f32) -> f32 {
    fract(x.sin() * 43758.547)
}
