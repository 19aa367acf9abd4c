//! Control signals that drive the particle cloud.
//!
//! The rest of the crate only consumes two values per tick: an expansion
//! level and the active template. `SignalSource` is the seam where a real
//! gesture tracker plugs in; `PulseSignal` stands in for it with a sine
//! pulse, and `TemplateSelector` rotates templates on a timer whenever the
//! source does not report a template of its own.

use crate::config::{PulseConfig, VisConfig};
use crate::params::{FrameParams, Template, TEMPLATE_COUNT};
use std::f32::consts::TAU;

/// One sample from a gesture source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSignal {
    /// any range, clamped downstream
    pub expansion: f32,
    /// discrete template event, `None` leaves rotation to the timer
    pub template: Option<u32>,
}

pub trait SignalSource {
    fn sample(&mut self, time: f32) -> GestureSignal;
}

// simulated pinch distance
pub struct PulseSignal {
    pulse: PulseConfig,
}

impl PulseSignal {
    pub fn new(pulse: PulseConfig) -> Self {
        Self { pulse }
    }

    pub fn expansion_at(&self, time: f32) -> f32 {
        let wave = 0.5 + 0.5 * (time * TAU / self.pulse.period).sin();
        self.pulse.min + (self.pulse.max - self.pulse.min) * wave
    }
}

impl SignalSource for PulseSignal {
    fn sample(&mut self, time: f32) -> GestureSignal {
        GestureSignal {
            expansion: self.expansion_at(time),
            template: None,
        }
    }
}

/// Cyclic template state over the first `count` templates.
pub struct TemplateSelector {
    current: usize,
    count: usize,
    interval: f32,
    next_switch: f32,
}

impl TemplateSelector {
    pub fn new(start: Template, count: usize, interval: f32) -> Self {
        let count = count.clamp(1, TEMPLATE_COUNT);
        Self {
            current: start.id() as usize % count,
            count,
            interval,
            next_switch: interval,
        }
    }

    pub fn current(&self) -> Template {
        Template::ALL[self.current]
    }

    pub fn advance(&mut self) -> Template {
        self.current = (self.current + 1) % self.count;
        self.current()
    }

    // out-of-set ids fail closed to the first template
    pub fn select(&mut self, id: u32) -> Template {
        self.current = if (id as usize) < self.count {
            id as usize
        } else {
            log::warn!(
                "template id {} outside active set of {}, falling back to {}",
                id,
                self.count,
                Template::ALL[0].name()
            );
            0
        };
        self.current()
    }

    // timer fallback, returns true when the template changed
    pub fn update(&mut self, time: f32) -> bool {
        if time < self.next_switch {
            return false;
        }
        // step count stays in f32 so a tiny interval cannot overflow usize
        let steps = ((time - self.next_switch) / self.interval).floor() + 1.0;
        let offset = (steps % self.count as f32) as usize;
        self.next_switch += steps * self.interval;
        if self.next_switch.is_nan() || self.next_switch <= time {
            self.next_switch = time + self.interval;
        }
        let before = self.current;
        self.current = (self.current + offset) % self.count;
        before != self.current
    }

    pub fn restart_timer(&mut self, time: f32) {
        self.next_switch = time + self.interval;
    }
}

/// Produces the frame snapshot once per tick.
pub struct ControlLoop {
    source: Box<dyn SignalSource>,
    selector: TemplateSelector,
    last_time: f32,
    pending: Option<u32>,
    warned_range: bool,
}

impl ControlLoop {
    pub fn new(config: &VisConfig) -> Self {
        Self::with_source(config, Box::new(PulseSignal::new(config.pulse)))
    }

    pub fn with_source(config: &VisConfig, source: Box<dyn SignalSource>) -> Self {
        let selector = TemplateSelector::new(
            config.start_template(),
            config.template_count,
            config.switch_interval,
        );
        Self {
            source,
            selector,
            last_time: 0.0,
            pending: None,
            warned_range: false,
        }
    }

    // edge-triggered switch, applied on the next tick
    pub fn request_template(&mut self, id: u32) {
        self.pending = Some(id);
    }

    pub fn template(&self) -> Template {
        self.selector.current()
    }

    pub fn tick(&mut self, time: f32) -> FrameParams {
        // time never runs backwards
        if time.is_finite() && time > self.last_time {
            self.last_time = time;
        }
        let time = self.last_time;

        let signal = self.source.sample(time);
        let before = self.selector.current();
        match self.pending.take().or(signal.template) {
            Some(id) => {
                self.selector.select(id);
                self.selector.restart_timer(time);
            }
            None => {
                self.selector.update(time);
            }
        }
        let template = self.selector.current();
        if template != before {
            log::debug!("template {} -> {} at {:.2}s", before.name(), template.name(), time);
        }

        if !(0.0..=1.0).contains(&signal.expansion) && !self.warned_range {
            log::warn!("expansion {} out of range, clamping", signal.expansion);
            self.warned_range = true;
        }
        FrameParams::new(template, signal.expansion, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Vec<GestureSignal>);

    impl SignalSource for Scripted {
        fn sample(&mut self, _time: f32) -> GestureSignal {
            if self.0.len() > 1 {
                self.0.remove(0)
            } else {
                self.0[0]
            }
        }
    }

    fn signal(expansion: f32, template: Option<u32>) -> GestureSignal {
        GestureSignal {
            expansion,
            template,
        }
    }

    #[test]
    fn pulse_stays_inside_configured_range() {
        let pulse = PulseSignal::new(PulseConfig::default());
        for i in 0..400 {
            let e = pulse.expansion_at(i as f32 * 0.037);
            assert!((0.3 - 1e-6..=1.0 + 1e-6).contains(&e), "{}", e);
        }
        // starts mid-range, peaks a quarter period in
        assert!((pulse.expansion_at(0.0) - 0.65).abs() < 1e-5);
        assert!((pulse.expansion_at(1.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn selector_returns_after_full_cycle() {
        for count in 1..=TEMPLATE_COUNT {
            let mut selector = TemplateSelector::new(Template::Heart, count, 5.0);
            let start = selector.current();
            for _ in 0..count {
                selector.advance();
            }
            assert_eq!(selector.current(), start);
        }
    }

    #[test]
    fn reduced_cycle_skips_firework() {
        let mut selector = TemplateSelector::new(Template::Heart, 3, 5.0);
        let seen: Vec<Template> = (0..6).map(|_| selector.advance()).collect();
        assert!(!seen.contains(&Template::Firework));
        assert_eq!(seen[2], Template::Heart);
    }

    #[test]
    fn timer_switches_on_interval() {
        let mut selector = TemplateSelector::new(Template::Heart, 4, 5.0);
        assert!(!selector.update(4.9));
        assert!(selector.update(5.0));
        assert_eq!(selector.current(), Template::Flower);
        assert!(!selector.update(9.0));
        // a long stall catches up in one step: saturn, firework, heart
        assert!(selector.update(20.5));
        assert_eq!(selector.current(), Template::Heart);
        assert!(!selector.update(24.9));
    }

    #[test]
    fn tiny_interval_does_not_overflow() {
        let mut selector = TemplateSelector::new(Template::Flower, 4, 1e-30);
        selector.update(1.0);
        selector.update(1.0e6);
        assert!(Template::ALL.contains(&selector.current()));
        let mut stalled = TemplateSelector::new(Template::Heart, 3, 0.0);
        stalled.update(2.0);
        assert!(stalled.current() != Template::Firework);
    }

    #[test]
    fn selector_rejects_unknown_ids() {
        let mut selector = TemplateSelector::new(Template::Saturn, 3, 5.0);
        assert_eq!(selector.select(3), Template::Heart);
        assert_eq!(selector.select(9), Template::Heart);
        assert_eq!(selector.select(1), Template::Flower);
    }

    #[test]
    fn control_loop_time_never_decreases() {
        let mut control = ControlLoop::new(&VisConfig::default());
        assert_eq!(control.tick(2.0).time(), 2.0);
        assert_eq!(control.tick(1.0).time(), 2.0);
        assert_eq!(control.tick(f32::NAN).time(), 2.0);
        assert_eq!(control.tick(f32::INFINITY).time(), 2.0);
        assert_eq!(control.tick(3.0).time(), 3.0);
    }

    #[test]
    fn control_loop_clamps_source_expansion() {
        let source = Scripted(vec![signal(1.5, None), signal(-0.3, None)]);
        let mut control = ControlLoop::with_source(&VisConfig::default(), Box::new(source));
        assert_eq!(control.tick(0.0).expansion(), 1.0);
        assert_eq!(control.tick(0.1).expansion(), 0.0);
    }

    #[test]
    fn source_template_overrides_timer() {
        let source = Scripted(vec![signal(0.5, Some(2)), signal(0.5, None)]);
        let mut control = ControlLoop::with_source(&VisConfig::default(), Box::new(source));
        assert_eq!(control.tick(0.5).template(), Template::Saturn);
        // timer restarted at the event
        assert_eq!(control.tick(5.0).template(), Template::Saturn);
        assert_eq!(control.tick(5.5).template(), Template::Firework);
    }

    #[test]
    fn requested_template_applies_next_tick() {
        let mut control = ControlLoop::new(&VisConfig::default());
        control.tick(0.1);
        control.request_template(3);
        assert_eq!(control.template(), Template::Heart);
        assert_eq!(control.tick(0.2).template(), Template::Firework);
        control.request_template(42);
        assert_eq!(control.tick(0.3).template(), Template::Heart);
    }

    #[test]
    fn timer_rotates_without_events() {
        let mut control = ControlLoop::new(&VisConfig::default());
        assert_eq!(control.tick(0.0).template(), Template::Heart);
        assert_eq!(control.tick(5.0).template(), Template::Flower);
        assert_eq!(control.tick(10.0).template(), Template::Saturn);
        assert_eq!(control.tick(15.0).template(), Template::Firework);
        assert_eq!(control.tick(20.0).template(), Template::Heart);
    }
}
