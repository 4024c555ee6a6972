//! Experiment configuration loaded from TOML
//!
//! ```toml
//! metal = "Sodium"
//! source = "Laser"
//!
//! [controls]
//! wavelength_nm = 400.0
//! intensity = 100.0
//! stopping_voltage = 0.5
//!
//! [simulation]
//! seed = 7
//!
//! [[metals]]
//! name = "Caesium"
//! work_function = 3.43e-19
//! color = [240, 230, 140]
//! ```

use std::fs;
use std::path::Path;

use photoelectric_physics::{Metal, MetalCatalog, Source, SourceCatalog};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Controls, SimulationParams};

/// Slider positions at startup, wavelength in nanometres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub wavelength_nm: f64,
    pub intensity: f64,
    pub stopping_voltage: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            wavelength_nm: 100.0,
            intensity: 0.0,
            stopping_voltage: 0.0,
        }
    }
}

impl ControlsConfig {
    pub fn to_controls(&self) -> Controls {
        Controls::new(self.wavelength_nm, self.intensity, self.stopping_voltage)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Selected metal, defaults to the first registered
    pub metal: Option<String>,
    /// Selected source, defaults to the first registered
    pub source: Option<String>,
    pub controls: ControlsConfig,
    pub simulation: SimulationParams,
    /// Extra metals appended after the built-in ones
    pub metals: Vec<Metal>,
    /// Extra sources appended after the built-in ones
    pub sources: Vec<Source>,
}

impl ExperimentConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!(
            "Loaded experiment config from {} ({} extra metals, {} extra sources)",
            path.display(),
            config.metals.len(),
            config.sources.len()
        );
        Ok(config)
    }
}

/// Catalogs plus the current selection and slider positions
#[derive(Debug, Clone)]
pub struct Experiment {
    pub metals: MetalCatalog,
    pub sources: SourceCatalog,
    metal: Metal,
    source: Source,
    pub controls: Controls,
}

impl Experiment {
    /// Built-in catalogs extended by the config, with the configured selection
    pub fn from_config(config: &ExperimentConfig) -> Result<Self, ConfigError> {
        let mut metals = MetalCatalog::with_defaults();
        for metal in &config.metals {
            metals.push(metal.clone());
        }
        let mut sources = SourceCatalog::with_defaults();
        for source in &config.sources {
            sources.register(source.clone());
        }

        let metal = match &config.metal {
            Some(name) => metals.find(name),
            None => metals.first(),
        }
        .cloned()
        .ok_or_else(|| ConfigError::UnknownMetal(config.metal.clone().unwrap_or_default()))?;

        let source = match &config.source {
            Some(name) => sources.find(name),
            None => sources.first(),
        }
        .cloned()
        .ok_or_else(|| ConfigError::UnknownSource(config.source.clone().unwrap_or_default()))?;

        Ok(Self {
            metals,
            sources,
            metal,
            source,
            controls: config.controls.to_controls(),
        })
    }

    pub fn metal(&self) -> &Metal {
        &self.metal
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn select_metal(&mut self, name: &str) -> Result<(), ConfigError> {
        let metal = self
            .metals
            .find(name)
            .ok_or_else(|| ConfigError::UnknownMetal(name.to_string()))?;
        self.metal = metal.clone();
        Ok(())
    }

    pub fn select_source(&mut self, name: &str) -> Result<(), ConfigError> {
        let source = self
            .sources
            .find(name)
            .ok_or_else(|| ConfigError::UnknownSource(name.to_string()))?;
        self.source = source.clone();
        Ok(())
    }
}
