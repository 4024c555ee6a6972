//! Gaussian jitter for emission positions

use glam::DVec2;
use rand::Rng;

/// Two independent standard-normal samples from one Box-Muller transform
pub fn standard_normal_pair<R: Rng>(rng: &mut R) -> (f64, f64) {
    // u1 in (0, 1] keeps ln(u1) finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = std::f64::consts::TAU * u2;
    (r * theta.cos(), r * theta.sin())
}

/// Offset with both axes drawn from N(mean, std_dev²)
pub fn gaussian_offset<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> DVec2 {
    let (z1, z2) = standard_normal_pair(rng);
    DVec2::new(z1 * std_dev + mean, z2 * std_dev + mean)
}
