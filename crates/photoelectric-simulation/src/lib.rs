//! # Photoelectric Simulation Engine
//!
//! Frame-stepped emission, transport and collection of light-quanta and the
//! carriers they free, plus the statistics and render data for each frame.

pub mod config;
pub mod emission;
pub mod error;
pub mod instance;
pub mod params;
pub mod simulation;

pub use config::*;
pub use emission::*;
pub use error::*;
pub use instance::*;
pub use params::*;
pub use simulation::*;
