//! Light source timing: when a new quantum leaves the source

use glam::DVec2;
use photoelectric_physics::{color_for, to_nanometres, Metal, Quantum, Source, PLANCK, SPEED_OF_LIGHT};
use rand::Rng;

/// Energy (J) of one quantum of light with this wavelength (m)
pub fn photon_energy(wavelength: f64) -> f64 {
    let frequency = SPEED_OF_LIGHT / wavelength;
    PLANCK * frequency
}

/// Energy left to a freed carrier after the metal's work function (J).
/// Negative when the light is below the metal's threshold frequency.
pub fn kinetic_energy(wavelength: f64, metal: &Metal) -> f64 {
    photon_energy(wavelength) - metal.work_function
}

/// Emits quanta at a rate proportional to intensity.
///
/// After each emission a countdown of `ceil(scale / intensity)` ticks must
/// elapse before the next one, so at 100 % intensity (scale 100) every other
/// tick emits.
#[derive(Debug, Clone)]
pub struct EmissionController {
    countdown: u32,
    scale: f64,
    velocity: DVec2,
    radius: f64,
}

impl EmissionController {
    pub fn new(scale: f64, velocity: DVec2, radius: f64) -> Self {
        Self {
            countdown: 0,
            scale,
            velocity,
            radius,
        }
    }

    /// Ticks left before the next emission may happen
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn reset(&mut self) {
        self.countdown = 0;
    }

    /// Advance one tick, possibly producing a new quantum
    pub fn tick<R: Rng>(
        &mut self,
        metal: &Metal,
        source: &Source,
        intensity: f64,
        wavelength: f64,
        rng: &mut R,
    ) -> Option<Quantum> {
        if intensity <= 0.0 {
            return None;
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }

        let wavelength_nm = to_nanometres(wavelength);
        if !source.accepts(wavelength_nm) {
            return None;
        }

        let energy = kinetic_energy(wavelength, metal);
        let quantum = Quantum::emit(source, self.velocity, energy, color_for(wavelength), rng)
            .with_radius(self.radius);
        self.countdown = (self.scale / intensity).ceil() as u32;

        log::debug!(
            "Emitted quantum from '{}' at ({:.1}, {:.1}): {:.0} nm, {:.3e} J spare over '{}'",
            source.name,
            quantum.position.x,
            quantum.position.y,
            wavelength_nm,
            energy,
            metal.name
        );

        Some(quantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoelectric_physics::{from_nanometres, MetalCatalog, SourceCatalog, QUANTUM_RADIUS, QUANTUM_VELOCITY};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> EmissionController {
        EmissionController::new(100.0, QUANTUM_VELOCITY, QUANTUM_RADIUS)
    }

    fn emission_ticks(intensity: f64, ticks: usize) -> Vec<usize> {
        let metals = MetalCatalog::with_defaults();
        let sources = SourceCatalog::with_defaults();
        let sodium = metals.find("Sodium").unwrap();
        let lamp = sources.find("Lamp").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut emitter = controller();
        (0..ticks)
            .filter(|_| {
                emitter
                    .tick(sodium, lamp, intensity, from_nanometres(400.0), &mut rng)
                    .is_some()
            })
            .collect()
    }

    #[test]
    fn sodium_at_400nm_frees_a_carrier() {
        let sodium = Metal::new("Sodium", 3.65e-19, [255, 252, 238]);
        let energy = kinetic_energy(from_nanometres(400.0), &sodium);
        assert!(energy > 0.0);
        assert!((energy - 1.31955e-19).abs() < 1e-23);
    }

    #[test]
    fn gold_at_700nm_falls_short() {
        let metals = MetalCatalog::with_defaults();
        assert!(kinetic_energy(from_nanometres(700.0), metals.find("Gold").unwrap()) < 0.0);
    }

    #[test]
    fn period_matches_intensity() {
        for intensity in [100.0, 75.0, 50.0, 33.0, 10.0, 7.0, 1.0, 0.5] {
            let gap = (100.0_f64 / intensity).ceil() as usize;
            let ticks = emission_ticks(intensity, 4 * (gap + 1));
            assert_eq!(ticks.len(), 4, "intensity {intensity}");
            for (i, tick) in ticks.iter().enumerate() {
                assert_eq!(*tick, i * (gap + 1), "intensity {intensity}");
            }
        }
    }

    #[test]
    fn zero_intensity_never_emits() {
        assert!(emission_ticks(0.0, 1000).is_empty());
        assert!(emission_ticks(-5.0, 1000).is_empty());
    }

    #[test]
    fn switching_off_freezes_the_countdown() {
        let metals = MetalCatalog::with_defaults();
        let sources = SourceCatalog::with_defaults();
        let (sodium, lamp) = (metals.first().unwrap(), sources.first().unwrap());
        let mut rng = StdRng::seed_from_u64(5);
        let mut emitter = controller();
        let wavelength = from_nanometres(450.0);

        assert!(emitter.tick(sodium, lamp, 50.0, wavelength, &mut rng).is_some());
        assert_eq!(emitter.countdown(), 2);
        for _ in 0..10 {
            assert!(emitter.tick(sodium, lamp, 0.0, wavelength, &mut rng).is_none());
        }
        assert_eq!(emitter.countdown(), 2);
    }

    #[test]
    fn out_of_band_wavelength_is_rejected() {
        let metals = MetalCatalog::with_defaults();
        let sources = SourceCatalog::with_defaults();
        let sodium = metals.find("Sodium").unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for source in sources.iter() {
            let mut emitter = controller();
            for _ in 0..500 {
                let q = emitter.tick(sodium, source, 100.0, from_nanometres(900.0), &mut rng);
                assert!(q.is_none(), "{} emitted at 900 nm", source.name);
                assert_eq!(emitter.countdown(), 0);
            }
        }
    }

    #[test]
    fn lamp_emits_positive_energy_quanta_in_band() {
        let metals = MetalCatalog::with_defaults();
        let sources = SourceCatalog::with_defaults();
        let sodium = metals.find("Sodium").unwrap();
        let lamp = sources.find("Lamp").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let quantum = controller()
            .tick(sodium, lamp, 100.0, from_nanometres(400.0), &mut rng)
            .unwrap();
        assert!(quantum.kinetic_energy > 0.0);
        assert_eq!(quantum.color, color_for(from_nanometres(400.0)));
        assert_eq!(quantum.velocity, QUANTUM_VELOCITY);
    }

    #[test]
    fn below_threshold_quanta_are_still_emitted() {
        let metals = MetalCatalog::with_defaults();
        let sources = SourceCatalog::with_defaults();
        let gold = metals.find("Gold").unwrap();
        let lamp = sources.find("Lamp").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let quantum = controller()
            .tick(gold, lamp, 100.0, from_nanometres(700.0), &mut rng)
            .unwrap();
        assert!(quantum.kinetic_energy < 0.0);
    }
}
