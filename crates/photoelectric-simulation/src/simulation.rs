//! Frame-stepped photoelectric simulation
//!
//! Each tick runs in a fixed order: emission, then quanta (move + emitter
//! plate), then carriers (move + collector plate), then statistics. Callers
//! only ever observe the state between ticks.

use std::collections::VecDeque;

use photoelectric_physics::{
    speed_from_energy, Carrier, CarrierFate, Metal, Quantum, QuantumFate, Source,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Controls, EmissionController, ParticleInstance, SimulationParams};

/// Running totals since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub emitted: u64,
    /// Quanta that freed a carrier
    pub converted: u64,
    /// Quanta that hit the plate without freeing a carrier
    pub absorbed: u64,
    /// Quanta that left the scene
    pub expired: u64,
    /// Carriers that reached the collector
    pub collected: u64,
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub emitted: bool,
    pub converted: u32,
    pub absorbed: u32,
    pub expired: u32,
    pub collected: u32,
}

/// CPU particle simulation for the emitter/collector apparatus
pub struct PhotoelectricSimulation {
    params: SimulationParams,
    emitter: EmissionController,
    rng: StdRng,

    // Live particles, in spawn order (draw order)
    quanta: Vec<Quantum>,
    carriers: Vec<Carrier>,

    // Statistics
    mean_speed: Option<f64>,
    stats: SimulationStats,
    // Carriers collected per tick over the photocurrent window
    collected_window: VecDeque<u32>,
    tick_count: u64,
}

impl PhotoelectricSimulation {
    pub fn new(params: SimulationParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        log::info!(
            "Initializing PhotoelectricSimulation ({}x{} scene, {} Hz, seed {:?})",
            params.scene_width,
            params.scene_height,
            params.tick_rate,
            params.seed
        );

        Self {
            emitter: EmissionController::new(
                params.emission_scale,
                params.quantum_velocity,
                params.quantum_radius,
            ),
            rng,
            quanta: Vec::new(),
            carriers: Vec::new(),
            mean_speed: None,
            stats: SimulationStats::default(),
            collected_window: VecDeque::with_capacity(params.photocurrent_window + 1),
            tick_count: 0,
            params,
        }
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self, metal: &Metal, source: &Source, controls: &Controls) -> TickReport {
        let Self {
            params,
            emitter,
            rng,
            quanta,
            carriers,
            mean_speed,
            stats,
            collected_window,
            tick_count,
        } = self;
        let mut report = TickReport::default();
        *tick_count += 1;

        // 1. Emission
        if let Some(quantum) = emitter.tick(metal, source, controls.intensity, controls.wavelength, rng) {
            quanta.push(quantum);
            report.emitted = true;
        }

        // 2. Quanta: move, then check the emitter plate and scene bounds
        quanta.retain_mut(|quantum| {
            quantum.advance();
            let fate = quantum.resolve_collision(
                &params.emitter_plate,
                controls.stopping_voltage,
                params.expiry_height,
            );
            match fate {
                QuantumFate::Converted => {
                    let carrier = Carrier::from_quantum(quantum, params.carrier_start_x)
                        .with_radius(params.carrier_radius);
                    log::trace!(
                        "Carrier freed at y={:.1} with {:.3e} J ({:.2} px/frame)",
                        carrier.position.y,
                        carrier.kinetic_energy,
                        carrier.speed
                    );
                    carriers.push(carrier);
                    report.converted += 1;
                }
                QuantumFate::Absorbed => report.absorbed += 1,
                QuantumFate::Expired => report.expired += 1,
                QuantumFate::InFlight => {}
            }
            !fate.is_terminal()
        });

        // 3. Carriers: energy is summed before anything is collected this tick
        let summed = carriers.len();
        let mut total_energy = 0.0;
        carriers.retain_mut(|carrier| {
            total_energy += carrier.kinetic_energy;
            carrier.advance();
            match carrier.resolve_collision(&params.collector_plate) {
                CarrierFate::Collected => {
                    log::trace!("Carrier collected at x={:.1}", carrier.position.x);
                    report.collected += 1;
                    false
                }
                CarrierFate::Drifting => true,
            }
        });

        // 4. Statistics. An empty apparatus keeps the last reading.
        if !carriers.is_empty() {
            *mean_speed = Some(speed_from_energy(total_energy / summed as f64));
        }

        stats.emitted += u64::from(report.emitted);
        stats.converted += u64::from(report.converted);
        stats.absorbed += u64::from(report.absorbed);
        stats.expired += u64::from(report.expired);
        stats.collected += u64::from(report.collected);

        collected_window.push_back(report.collected);
        while collected_window.len() > params.photocurrent_window {
            collected_window.pop_front();
        }

        report
    }

    /// Clear all particles and statistics, keeping the parameters and RNG stream
    pub fn reset(&mut self) {
        log::debug!(
            "Resetting simulation ({} quanta, {} carriers dropped)",
            self.quanta.len(),
            self.carriers.len()
        );
        self.emitter.reset();
        self.quanta.clear();
        self.carriers.clear();
        self.mean_speed = None;
        self.stats = SimulationStats::default();
        self.collected_window.clear();
        self.tick_count = 0;
    }

    /// Add a quantum directly, bypassing the emitter
    pub fn push_quantum(&mut self, quantum: Quantum) {
        self.quanta.push(quantum);
    }

    /// Add a carrier directly, bypassing conversion
    pub fn push_carrier(&mut self, carrier: Carrier) {
        self.carriers.push(carrier);
    }

    /// Live quanta in draw order
    pub fn quanta(&self) -> &[Quantum] {
        &self.quanta
    }

    /// Live carriers in draw order
    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    /// Mean carrier speed (m/s) from the mean kinetic energy.
    /// `None` until the first tick with carriers in flight.
    pub fn mean_speed(&self) -> Option<f64> {
        self.mean_speed
    }

    /// Carriers collected over the last `photocurrent_window` ticks
    pub fn photocurrent(&self) -> u32 {
        self.collected_window.iter().sum()
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Ticks until the emitter may fire again
    pub fn emission_countdown(&self) -> u32 {
        self.emitter.countdown()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated time at the configured tick rate
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick_count as f64 / f64::from(self.params.tick_rate.max(1))
    }

    /// Render instances: all quanta, then all carriers
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.quanta
            .iter()
            .map(ParticleInstance::from_quantum)
            .chain(self.carriers.iter().map(ParticleInstance::from_carrier))
            .collect()
    }
}
