use gesture_particles::camera::default_view;
use gesture_particles::evaluator::expand;
use gesture_particles::shapes::{shape_position, Burst};
use gesture_particles::signal::{ControlLoop, PulseSignal};
use gesture_particles::{Evaluator, FrameParams, Template, VisConfig};
use proptest::prelude::*;

fn template() -> impl Strategy<Value = Template> {
    (0u32..4).prop_map(Template::from_id)
}

fn evaluator(count: usize) -> Evaluator {
    Evaluator::new(&VisConfig {
        particle_count: count,
        ..VisConfig::default()
    })
}

proptest! {
    #[test]
    fn shapes_are_finite(template in template(), n in 0.0f32..=1.0, time in 0.0f32..10_000.0) {
        let p = shape_position(template, n, time, &Burst::default());
        prop_assert!(p.is_finite());
    }

    #[test]
    fn shapes_are_pure(template in template(), n in 0.0f32..=1.0, time in 0.0f32..100.0) {
        let burst = Burst::default();
        let a = shape_position(template, n, time, &burst);
        let b = shape_position(template, n, time, &burst);
        prop_assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn expansion_is_monotonic(
        template in template(),
        index in 0usize..256,
        time in 0.0f32..50.0,
        low in 0.0f32..=1.0,
        high in 0.0f32..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let eval = evaluator(256);
        let near = eval.position(&FrameParams::new(template, low, time), index).unwrap();
        let far = eval.position(&FrameParams::new(template, high, time), index).unwrap();
        prop_assert!(far.length() + 1e-5 >= near.length());
    }

    #[test]
    fn out_of_range_expansion_clamps(
        template in template(),
        index in 0usize..64,
        time in 0.0f32..50.0,
        excess in 0.0f32..100.0,
    ) {
        let eval = evaluator(64);
        let view = default_view();
        let over = eval.point(&FrameParams::new(template, 1.0 + excess, time), &view, index);
        let full = eval.point(&FrameParams::new(template, 1.0, time), &view, index);
        let under = eval.point(&FrameParams::new(template, -excess, time), &view, index);
        let none = eval.point(&FrameParams::new(template, 0.0, time), &view, index);
        prop_assert_eq!(over, full);
        prop_assert_eq!(under, none);
    }

    #[test]
    fn rendered_points_are_well_formed(
        template in template(),
        expansion in -1.0f32..2.0,
        time in 0.0f32..1000.0,
    ) {
        let eval = evaluator(97);
        let points = eval.evaluate_all(FrameParams::new(template, expansion, time), &default_view());
        prop_assert_eq!(points.len(), 97);
        for p in points {
            prop_assert!(p.position.is_finite());
            prop_assert!(p.color.is_finite());
            prop_assert!(p.size.is_finite() && p.size > 0.0);
        }
    }

    #[test]
    fn expand_matches_linear_scale(x in -2.0f32..2.0, y in -2.0f32..2.0, e in 0.0f32..=1.0) {
        let p = glam::Vec3::new(x, y, 0.25);
        prop_assert_eq!(expand(p, e, 2.5), p * (1.0 + e * 2.5));
    }
}

#[test]
fn simulated_loop_cycles_every_template() {
    let config = VisConfig::default();
    let mut control = ControlLoop::with_source(&config, Box::new(PulseSignal::new(config.pulse)));
    let mut seen = Vec::new();
    let mut time = 0.0;
    while time < 20.0 {
        let params = control.tick(time);
        assert!((0.3 - 1e-6..=1.0 + 1e-6).contains(&params.expansion()));
        if seen.last() != Some(&params.template()) {
            seen.push(params.template());
        }
        time += 1.0 / 60.0;
    }
    assert_eq!(
        seen,
        vec![Template::Heart, Template::Flower, Template::Saturn, Template::Firework]
    );
}

#[test]
fn reduced_variant_never_shows_firework() {
    let config = VisConfig {
        template_count: 3,
        switch_interval: 1.0,
        ..VisConfig::default()
    };
    let mut control = ControlLoop::new(&config);
    for step in 0..600 {
        let params = control.tick(step as f32 * 0.05);
        assert_ne!(params.template(), Template::Firework);
    }
}
