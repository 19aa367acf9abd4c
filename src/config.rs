// startup configuration, read once when the visualization is built
use crate::params::{Template, TEMPLATE_COUNT};
use crate::shapes::Burst;
use glam::Vec3;

// shortest rotation period the timer accepts, in seconds
pub const MIN_SWITCH_INTERVAL: f32 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    // fixed for the lifetime of the process
    pub particle_count: usize,
    pub initial_template: u32,
    // 3 runs the reduced heart / flower / saturn cycle
    pub template_count: usize,
    pub expansion_gain: f32,
    pub base_color: Vec3,
    pub accents: [Vec3; TEMPLATE_COUNT],
    // pixels at the reference camera distance
    pub point_size: f32,
    // fraction of the size lost at full expansion
    pub expansion_shrink: f32,
    pub pulse: PulseConfig,
    pub switch_interval: f32,
    pub burst: Burst,
}

// simulated gesture distance, a sine remapped into [min, max]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseConfig {
    pub min: f32,
    pub max: f32,
    pub period: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            min: 0.3,
            max: 1.0,
            period: 4.0,
        }
    }
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            particle_count: 12_000,
            initial_template: Template::Heart.id(),
            template_count: TEMPLATE_COUNT,
            expansion_gain: 2.5,
            base_color: Vec3::new(0.2, 0.5, 1.0),
            accents: [
                Vec3::new(1.0, 0.25, 0.45),
                Vec3::new(1.0, 0.55, 0.9),
                Vec3::new(0.95, 0.8, 0.45),
                Vec3::new(1.0, 0.5, 0.05),
            ],
            point_size: 6.0,
            expansion_shrink: 0.4,
            pulse: PulseConfig::default(),
            switch_interval: 5.0,
            burst: Burst::default(),
        }
    }
}

impl VisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=TEMPLATE_COUNT).contains(&self.template_count) {
            return Err(ConfigError::TemplateCount(self.template_count));
        }
        if !self.expansion_gain.is_finite() || self.expansion_gain < 0.0 {
            return Err(ConfigError::ExpansionGain(self.expansion_gain));
        }
        let pulse = &self.pulse;
        if !(0.0..=1.0).contains(&pulse.min)
            || !(0.0..=1.0).contains(&pulse.max)
            || pulse.min > pulse.max
        {
            return Err(ConfigError::PulseRange(pulse.min, pulse.max));
        }
        check_positive("pulse period", pulse.period)?;
        if !self.switch_interval.is_finite() || self.switch_interval < MIN_SWITCH_INTERVAL {
            return Err(ConfigError::SwitchInterval(self.switch_interval));
        }
        check_positive("point size", self.point_size)?;
        check_positive("burst rate", self.burst.rate)?;
        if !self.burst.spread.is_finite() {
            return Err(ConfigError::Burst("spread", self.burst.spread));
        }
        if !self.burst.amplitude.is_finite() || self.burst.amplitude < 0.0 {
            return Err(ConfigError::Burst("amplitude", self.burst.amplitude));
        }
        if !(0.0..=1.0).contains(&self.expansion_shrink) {
            return Err(ConfigError::Shrink(self.expansion_shrink));
        }
        let mut colors = std::iter::once(&self.base_color).chain(self.accents.iter());
        if colors.any(|c| !c.is_finite()) {
            return Err(ConfigError::Color);
        }
        Ok(())
    }

    // initial template restricted to the active cycle
    pub fn start_template(&self) -> Template {
        let id = self.initial_template;
        if (id as usize) < self.template_count {
            Template::from_id(id)
        } else {
            log::warn!(
                "initial template {} outside active set of {}, using heart",
                id,
                self.template_count
            );
            Template::Heart
        }
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive(name, value))
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Template count must be between 1 and 4, got {0}")]
    TemplateCount(usize),
    #[error("Expansion gain must be finite and non-negative, got {0}")]
    ExpansionGain(f32),
    #[error("Pulse range [{0}, {1}] must be an ordered sub-range of [0, 1]")]
    PulseRange(f32, f32),
    #[error("Expansion shrink must be in [0, 1], got {0}")]
    Shrink(f32),
    #[error("{0} must be positive, got {1}")]
    NotPositive(&'static str, f32),
    #[error("Switch interval must be at least 0.05s, got {0}")]
    SwitchInterval(f32),
    #[error("Burst {0} out of range, got {1}")]
    Burst(&'static str, f32),
    #[error("Colors must be finite")]
    Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(VisConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_particles_is_allowed() {
        let config = VisConfig {
            particle_count: 0,
            ..VisConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = VisConfig::default();
        let cases = [
            VisConfig {
                template_count: 0,
                ..base.clone()
            },
            VisConfig {
                template_count: 5,
                ..base.clone()
            },
            VisConfig {
                expansion_gain: -1.0,
                ..base.clone()
            },
            VisConfig {
                pulse: PulseConfig {
                    min: 0.8,
                    max: 0.2,
                    period: 4.0,
                },
                ..base.clone()
            },
            VisConfig {
                switch_interval: 0.0,
                ..base.clone()
            },
            VisConfig {
                switch_interval: 1e-30,
                ..base.clone()
            },
            VisConfig {
                burst: Burst {
                    spread: f32::INFINITY,
                    ..base.burst
                },
                ..base.clone()
            },
            VisConfig {
                burst: Burst {
                    amplitude: f32::NAN,
                    ..base.burst
                },
                ..base.clone()
            },
            VisConfig {
                burst: Burst {
                    amplitude: -1.0,
                    ..base.burst
                },
                ..base.clone()
            },
            VisConfig {
                point_size: f32::NAN,
                ..base.clone()
            },
            VisConfig {
                base_color: Vec3::new(f32::INFINITY, 0.0, 0.0),
                ..base.clone()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn interval_floor_and_burst_are_named() {
        let config = VisConfig {
            switch_interval: 1e-30,
            ..VisConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SwitchInterval(1e-30)));
        let config = VisConfig {
            switch_interval: MIN_SWITCH_INTERVAL,
            burst: Burst {
                spread: 0.25,
                amplitude: 0.0,
                ..Burst::default()
            },
            ..VisConfig::default()
        };
        assert!(config.validate().is_ok());
        let config = VisConfig {
            burst: Burst {
                spread: f32::NEG_INFINITY,
                ..Burst::default()
            },
            ..config
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Burst("spread", f32::NEG_INFINITY))
        );
    }

    #[test]
    fn start_template_respects_reduced_cycle() {
        let config = VisConfig {
            template_count: 3,
            initial_template: Template::Firework.id(),
            ..VisConfig::default()
        };
        assert_eq!(config.start_template(), Template::Heart);
        let config = VisConfig {
            initial_template: Template::Saturn.id(),
            ..config
        };
        assert_eq!(config.start_template(), Template::Saturn);
    }
}
