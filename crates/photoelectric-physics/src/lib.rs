//! # Photoelectric Physics Model
//!
//! Light-quanta, liberated charge carriers, the metals and light sources they
//! come from, and the wavelength-to-color mapping used to draw them.

pub mod catalog;
pub mod constants;
pub mod geometry;
pub mod particle;
pub mod sampling;
pub mod spectrum;

pub use catalog::*;
pub use constants::*;
pub use geometry::*;
pub use particle::*;
pub use sampling::*;
pub use spectrum::*;
