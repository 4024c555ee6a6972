//! Light-quanta and the charge carriers they liberate

use glam::DVec2;
use rand::Rng;

use crate::catalog::Source;
use crate::constants::*;
use crate::geometry::Rect;
use crate::sampling::gaussian_offset;
use crate::spectrum::Rgb;

/// Default quantum velocity: left and down toward the emitter plate
pub const QUANTUM_VELOCITY: DVec2 = DVec2::new(-10.0, 4.0);

/// Default x where liberated carriers start (right face of the emitter plate)
pub const CARRIER_START_X: f64 = 60.0;

/// What happened to a quantum after a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumFate {
    /// Still travelling
    InFlight,
    /// Hit the plate without enough energy to free a carrier
    Absorbed,
    /// Hit the plate and freed a carrier
    Converted,
    /// Left the visible scene
    Expired,
}

impl QuantumFate {
    /// The quantum should be removed from the live set
    pub fn is_terminal(self) -> bool {
        !matches!(self, QuantumFate::InFlight)
    }
}

/// What happened to a carrier after a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierFate {
    Drifting,
    Collected,
}

/// A single light-quantum in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Quantum {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Energy left over after the work function (J). Can be negative.
    pub kinetic_energy: f64,
    pub color: Rgb,
    pub radius: f64,
    converted: bool,
}

impl Quantum {
    pub fn new(position: DVec2, velocity: DVec2, kinetic_energy: f64, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            kinetic_energy,
            color,
            radius: QUANTUM_RADIUS,
            converted: false,
        }
    }

    /// Spawn at the source origin plus Gaussian jitter
    pub fn emit<R: Rng>(
        source: &Source,
        velocity: DVec2,
        kinetic_energy: f64,
        color: Rgb,
        rng: &mut R,
    ) -> Self {
        let jitter = gaussian_offset(rng, source.mean_offset, source.std_dev);
        Self::new(source.origin + jitter, velocity, kinetic_energy, color)
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.radius)
    }

    /// Whether this quantum has already paid the stopping energy
    pub fn is_converted(&self) -> bool {
        self.converted
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Check against the emitter plate and the scene bounds.
    ///
    /// On a plate hit the stopping energy is deducted once, only if what
    /// remains is positive. The quantum is spent either way.
    pub fn resolve_collision(
        &mut self,
        collector: &Rect,
        stopping_voltage: f64,
        expiry_height: f64,
    ) -> QuantumFate {
        if self.bounds().intersects(collector) {
            let stopping = stopping_energy(stopping_voltage);
            if !self.converted && self.kinetic_energy - stopping > 0.0 {
                self.kinetic_energy -= stopping;
                self.converted = true;
                QuantumFate::Converted
            } else {
                QuantumFate::Absorbed
            }
        } else if self.position.x < -2.0 * self.radius
            || self.position.y > expiry_height + 2.0 * self.radius
        {
            QuantumFate::Expired
        } else {
            QuantumFate::InFlight
        }
    }
}

/// A charge carrier drifting from the emitter to the collector plate
#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    pub position: DVec2,
    pub kinetic_energy: f64,
    /// Pixels per frame along +x
    pub speed: f64,
    pub radius: f64,
}

impl Carrier {
    pub fn new(x: f64, y: f64, kinetic_energy: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            kinetic_energy,
            speed: kinetic_energy * CARRIER_SPEED_SCALE,
            radius: CARRIER_RADIUS,
        }
    }

    /// Carrier freed by a converted quantum, at the quantum's current height
    pub fn from_quantum(quantum: &Quantum, start_x: f64) -> Self {
        Self::new(start_x, quantum.position.y, quantum.kinetic_energy)
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, self.radius)
    }

    /// Physical speed (m/s) for this carrier's kinetic energy
    pub fn speed_m_per_s(&self) -> f64 {
        speed_from_energy(self.kinetic_energy)
    }

    pub fn advance(&mut self) {
        self.position.x += self.speed;
    }

    pub fn resolve_collision(&self, collector: &Rect) -> CarrierFate {
        if self.bounds().intersects(collector) {
            CarrierFate::Collected
        } else {
            CarrierFate::Drifting
        }
    }
}

/// E = ½mv² solved for v (m/s)
pub fn speed_from_energy(kinetic_energy: f64) -> f64 {
    (2.0 * kinetic_energy / ELECTRON_MASS).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PLATE: Rect = Rect::new(10.0, 360.0, 50.0, 210.0);
    const EXPIRY: f64 = 800.0;

    fn quantum_on_plate(kinetic_energy: f64) -> Quantum {
        Quantum::new(DVec2::new(40.0, 400.0), QUANTUM_VELOCITY, kinetic_energy, [255, 0, 0])
    }

    #[test]
    fn quantum_moves_by_its_velocity() {
        let mut q = Quantum::new(DVec2::new(500.0, 200.0), QUANTUM_VELOCITY, 1.0e-19, [0, 0, 0]);
        q.advance();
        q.advance();
        assert_eq!(q.position, DVec2::new(480.0, 208.0));
    }

    #[test]
    fn energetic_quantum_converts_and_pays_stopping_energy() {
        let mut q = quantum_on_plate(3.0e-19);
        assert_eq!(q.resolve_collision(&PLATE, 1.0, EXPIRY), QuantumFate::Converted);
        assert!((q.kinetic_energy - 1.4e-19).abs() < 1e-30);
        assert!(q.is_converted());
    }

    #[test]
    fn stopping_energy_is_deducted_only_once() {
        let mut q = quantum_on_plate(5.0e-19);
        assert_eq!(q.resolve_collision(&PLATE, 1.0, EXPIRY), QuantumFate::Converted);
        let after_first = q.kinetic_energy;
        assert_eq!(q.resolve_collision(&PLATE, 1.0, EXPIRY), QuantumFate::Absorbed);
        assert_eq!(q.kinetic_energy, after_first);
    }

    #[test]
    fn weak_quantum_is_absorbed_unchanged() {
        for (energy, volts) in [(1.0e-19, 1.0), (1.6e-19, 1.0), (-2.0e-19, 0.0), (0.0, 0.0), (2.0e-19, 3.0)] {
            let mut q = quantum_on_plate(energy);
            assert_eq!(q.resolve_collision(&PLATE, volts, EXPIRY), QuantumFate::Absorbed);
            assert_eq!(q.kinetic_energy, energy);
        }
    }

    #[test]
    fn reverse_bias_adds_energy() {
        let mut q = quantum_on_plate(1.0e-19);
        assert_eq!(q.resolve_collision(&PLATE, -1.0, EXPIRY), QuantumFate::Converted);
        assert!((q.kinetic_energy - 2.6e-19).abs() < 1e-30);
    }

    #[test]
    fn quantum_expires_off_screen() {
        let mut left = Quantum::new(DVec2::new(-9.0, 100.0), QUANTUM_VELOCITY, 1.0e-19, [0, 0, 0]);
        assert_eq!(left.resolve_collision(&PLATE, 0.0, EXPIRY), QuantumFate::Expired);

        let mut below = Quantum::new(DVec2::new(300.0, 809.0), QUANTUM_VELOCITY, 1.0e-19, [0, 0, 0]);
        assert_eq!(below.resolve_collision(&PLATE, 0.0, EXPIRY), QuantumFate::Expired);

        let mut flying = Quantum::new(DVec2::new(300.0, 300.0), QUANTUM_VELOCITY, 1.0e-19, [0, 0, 0]);
        assert_eq!(flying.resolve_collision(&PLATE, 0.0, EXPIRY), QuantumFate::InFlight);
    }

    #[test]
    fn emitted_quantum_is_jittered_around_the_source() {
        let source = Source::new("Laser", 516.0, 234.0, 60.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let q = Quantum::emit(&source, QUANTUM_VELOCITY, 1.0e-19, [1, 2, 3], &mut rng);
        let offset = q.position - source.origin;
        assert!((offset.x - 60.0).abs() < 8.0);
        assert!((offset.y - 60.0).abs() < 8.0);
        assert_eq!(q.color, [1, 2, 3]);
    }

    #[test]
    fn carrier_inherits_height_and_energy() {
        let mut q = quantum_on_plate(3.0e-19);
        q.resolve_collision(&PLATE, 0.0, EXPIRY);
        let c = Carrier::from_quantum(&q, CARRIER_START_X);
        assert_eq!(c.position, DVec2::new(60.0, 400.0));
        assert_eq!(c.kinetic_energy, 3.0e-19);
        assert!((c.speed - 3.0).abs() < 1e-12);
    }

    #[test]
    fn carrier_drifts_right_until_collected() {
        let collector = Rect::new(740.0, 360.0, 50.0, 210.0);
        let mut c = Carrier::new(60.0, 450.0, 2.0e-19);
        let mut ticks = 0;
        while c.resolve_collision(&collector) == CarrierFate::Drifting {
            c.advance();
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(c.position.y, 450.0);
        assert!(c.position.x + 2.0 * c.radius > 740.0);
    }

    #[test]
    fn physical_speed_matches_kinetic_energy() {
        let c = Carrier::new(60.0, 400.0, 1.0e-19);
        let v = c.speed_m_per_s();
        assert!((0.5 * ELECTRON_MASS * v * v - 1.0e-19).abs() < 1e-30);
    }
}
