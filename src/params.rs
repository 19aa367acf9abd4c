// template selection and the per-frame parameter snapshot

pub const TEMPLATE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Heart,
    Flower,
    Saturn,
    Firework,
}

impl Template {
    pub const ALL: [Template; TEMPLATE_COUNT] = [
        Template::Heart,
        Template::Flower,
        Template::Saturn,
        Template::Firework,
    ];

    // unknown ids fall back to heart rather than undefined geometry
    pub fn from_id(id: u32) -> Self {
        match Self::try_from_id(id) {
            Some(template) => template,
            None => {
                log::warn!("unknown template id {}, falling back to heart", id);
                Template::Heart
            }
        }
    }

    pub fn try_from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Template::Heart => "heart",
            Template::Flower => "flower",
            Template::Saturn => "saturn",
            Template::Firework => "firework",
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Template::Heart
    }
}

/// Immutable snapshot of everything a particle needs for one frame.
///
/// Built once per tick by the control loop and passed by value to the
/// evaluator, so every particle in a frame reads the same state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    template: Template,
    expansion: f32,
    time: f32,
}

impl FrameParams {
    pub fn new(template: Template, expansion: f32, time: f32) -> Self {
        Self {
            template,
            expansion: clamp_expansion(expansion),
            time: if time.is_finite() { time.max(0.0) } else { 0.0 },
        }
    }

    pub fn template(&self) -> Template {
        self.template
    }

    // always in [0, 1]
    pub fn expansion(&self) -> f32 {
        self.expansion
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        Self::new(Template::default(), 0.0, 0.0)
    }
}

pub fn clamp_expansion(expansion: f32) -> f32 {
    if expansion.is_nan() {
        0.0
    } else {
        expansion.clamp(0.0, 1.0)
    }
}
