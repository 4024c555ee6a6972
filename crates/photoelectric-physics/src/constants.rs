//! Physical constants for the photoelectric model
//!
//! Values are deliberately rounded the way the classroom model uses them, so
//! the numbers on screen match hand calculations.

/// Speed of light (m/s), rounded to 3e8
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Planck's constant (J·s)
pub const PLANCK: f64 = 6.62607004e-34;

/// Elementary charge (C), used to turn volts into joules
pub const ELEMENTARY_CHARGE: f64 = 1.6e-19;

/// Electron mass (kg)
pub const ELECTRON_MASS: f64 = 9.11e-31;

/// Energy-to-speed scale for carriers.
/// A carrier moves `kinetic_energy * CARRIER_SPEED_SCALE` pixels per frame.
pub const CARRIER_SPEED_SCALE: f64 = 1.0e19;

/// Nanometres per metre
pub const NANOMETRES_PER_METRE: f64 = 1.0e9;

// Particle sizes for rendering and hit boxes (pixels)
/// Quantum radius
pub const QUANTUM_RADIUS: f64 = 4.0;

/// Carrier radius
pub const CARRIER_RADIUS: f64 = 5.0;

/// Carrier fill color
pub const CARRIER_FILL: [u8; 3] = [60, 230, 255];

/// Carrier border color
pub const CARRIER_BORDER: [u8; 3] = [0, 0, 0];

/// Convert a wavelength in metres to nanometres
#[inline]
pub fn to_nanometres(wavelength: f64) -> f64 {
    wavelength * NANOMETRES_PER_METRE
}

/// Convert a wavelength in nanometres to metres
#[inline]
pub fn from_nanometres(wavelength_nm: f64) -> f64 {
    wavelength_nm / NANOMETRES_PER_METRE
}

/// Energy (J) a carrier must spend to overcome a retarding potential (V)
#[inline]
pub fn stopping_energy(stopping_voltage: f64) -> f64 {
    stopping_voltage * ELEMENTARY_CHARGE
}
