//! Render-ready particle instances
//!
//! One instance per live particle, laid out for direct upload into a vertex
//! or storage buffer.

use bytemuck::{Pod, Zeroable};
use photoelectric_physics::{Carrier, Quantum, Rgb, CARRIER_BORDER, CARRIER_FILL};

/// Particle kind stored in `ParticleInstance::kind`
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    Quantum = 0,
    Carrier = 1,
}

/// GPU-compatible particle instance (48 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Screen-space center
    pub position: [f32; 2],
    pub radius: f32,
    /// Maps to `InstanceKind`
    pub kind: u32,
    /// Fill color, RGBA in 0..=1
    pub fill: [f32; 4],
    /// Outline color, RGB in 0..=1, w: outline width in pixels (0 for none)
    pub border: [f32; 4],
}

fn to_linear_rgba(color: Rgb, alpha: f32) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        alpha,
    ]
}

impl ParticleInstance {
    pub fn from_quantum(quantum: &Quantum) -> Self {
        Self {
            position: quantum.position.as_vec2().to_array(),
            radius: quantum.radius as f32,
            kind: InstanceKind::Quantum as u32,
            fill: to_linear_rgba(quantum.color, 1.0),
            border: [0.0; 4],
        }
    }

    /// Carriers draw one pixel smaller than their hit box with a 2 px outline
    pub fn from_carrier(carrier: &Carrier) -> Self {
        let [r, g, b, _] = to_linear_rgba(CARRIER_BORDER, 1.0);
        Self {
            position: carrier.position.round().as_vec2().to_array(),
            radius: carrier.radius as f32 - 1.0,
            kind: InstanceKind::Carrier as u32,
            fill: to_linear_rgba(CARRIER_FILL, 1.0),
            border: [r, g, b, 2.0],
        }
    }

    pub fn kind(&self) -> Option<InstanceKind> {
        match self.kind {
            0 => Some(InstanceKind::Quantum),
            1 => Some(InstanceKind::Carrier),
            _ => None,
        }
    }
}
