use crate::{
    config::{ConfigError, VisConfig},
    vis_ctx::{VisContext, VisContextError},
    vis_gl::{VisGl, VisGlError},
};

// builder for initialization and running vis
pub struct VisBuilder {
    width: Option<f64>,
    height: Option<f64>,
    config: Option<VisConfig>,
}

impl VisBuilder {
    pub fn new() -> Self {
        let width = None;
        let height = None;
        let config = None;
        Self {
            width,
            height,
            config,
        }
    }

    // set window size
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    // replace the default particle configuration
    pub fn with_config(mut self, config: VisConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config_mut().particle_count = count;
        self
    }

    pub fn with_template(mut self, id: u32) -> Self {
        self.config_mut().initial_template = id;
        self
    }

    fn config_mut(&mut self) -> &mut VisConfig {
        self.config.get_or_insert_with(VisConfig::default)
    }

    // validated config the vis would start with
    pub fn config(&self) -> Result<VisConfig, ConfigError> {
        let config = self.config.clone().unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    // run visualization from prev set fields
    pub fn start(&mut self) -> Result<(), VisError> {
        let width = self.width.unwrap_or(800.0);
        let height = self.height.unwrap_or(800.0);
        let config = self.config()?;
        log::info!("starting {}x{} with {:?}", width, height, config);

        let window = VisContext::new(width, height)?;
        let gl = VisGl::new(&window.gl, &window.shader_version, &config, width, height)?;
        VisContext::run(window, gl)?;
        Ok(())
    }
}

impl Default for VisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    VisGl(#[from] VisGlError),
    #[error("{0}")]
    VisContext(#[from] VisContextError),
}
