//! Materials for the fluid simulation
//!
//! A single weakly-compressible fluid model plus shared helpers.

pub mod fluid;
pub mod utils;

pub use fluid::{FluidParams, calculate_stress, tait_pressure, viscous_strain};
