//! Simulation parameters and per-frame controls

use glam::DVec2;
use photoelectric_physics::{
    from_nanometres, Rect, CARRIER_RADIUS, CARRIER_START_X, QUANTUM_RADIUS, QUANTUM_VELOCITY,
};
use serde::{Deserialize, Serialize};

/// Fixed scene layout and tuning constants. Set once when the simulation is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // Scene
    pub scene_width: f64,
    pub scene_height: f64,
    /// Quanta falling below this (plus two radii) are dropped
    pub expiry_height: f64,

    // Plates
    /// Emitter plate that quanta strike
    pub emitter_plate: Rect,
    /// Collector plate that carriers drift into
    pub collector_plate: Rect,

    // Particles
    pub quantum_velocity: DVec2,
    pub quantum_radius: f64,
    pub carrier_radius: f64,
    pub carrier_start_x: f64,

    // Timing
    /// Countdown after an emission is `ceil(emission_scale / intensity)` ticks
    pub emission_scale: f64,
    /// Target frame rate of the driver
    pub tick_rate: u32,
    /// Number of ticks the photocurrent is summed over
    pub photocurrent_window: usize,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            scene_width: 800.0,
            scene_height: 600.0,
            expiry_height: 800.0,

            emitter_plate: Rect::new(10.0, 360.0, 50.0, 210.0),
            collector_plate: Rect::new(740.0, 360.0, 50.0, 210.0),

            quantum_velocity: QUANTUM_VELOCITY,
            quantum_radius: QUANTUM_RADIUS,
            carrier_radius: CARRIER_RADIUS,
            carrier_start_x: CARRIER_START_X,

            emission_scale: 100.0,
            tick_rate: 30,
            photocurrent_window: 30,

            seed: None,
        }
    }
}

/// The continuous inputs the user adjusts between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Wavelength of the light (m)
    pub wavelength: f64,
    /// Intensity (%), 0 switches the source off
    pub intensity: f64,
    /// Retarding potential (V), negative values accelerate carriers
    pub stopping_voltage: f64,
}

impl Controls {
    /// Controls with the wavelength given in nanometres
    pub fn new(wavelength_nm: f64, intensity: f64, stopping_voltage: f64) -> Self {
        Self {
            wavelength: from_nanometres(wavelength_nm),
            intensity,
            stopping_voltage,
        }
    }
}

impl Default for Controls {
    /// The light starts switched off at the short end of the slider
    fn default() -> Self {
        Self::new(100.0, 0.0, 0.0)
    }
}
