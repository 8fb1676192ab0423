//! Weakly-compressible fluid material
//!
//! Tait equation-of-state pressure plus a linear viscous term built from the
//! particle's affine velocity field.

use crate::config::constants::{
    DYNAMIC_VISCOSITY, EOS_POWER, EOS_STIFFNESS, PRESSURE_FLOOR, REST_DENSITY,
};
use crate::error::ConfigError;
use crate::math::{Matrix, Real, diagonal_from_value};

/// Parameters describing a fluid material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidParams {
    pub rest_density: Real,
    pub eos_stiffness: Real,
    pub eos_power: Real,
    pub dynamic_viscosity: Real,
}

impl FluidParams {
    pub const fn new(
        rest_density: Real,
        eos_stiffness: Real,
        eos_power: Real,
        dynamic_viscosity: Real,
    ) -> Self {
        Self {
            rest_density,
            eos_stiffness,
            eos_power,
            dynamic_viscosity,
        }
    }

    /// Default parameters matching the water demo.
    pub const fn water() -> Self {
        Self::new(REST_DENSITY, EOS_STIFFNESS, EOS_POWER, DYNAMIC_VISCOSITY)
    }

    pub fn with_viscosity(mut self, dynamic_viscosity: Real) -> Self {
        self.dynamic_viscosity = dynamic_viscosity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rest_density.is_finite() && self.rest_density > 0.0) {
            return Err(ConfigError::InvalidRestDensity(self.rest_density));
        }
        if !(self.eos_stiffness.is_finite() && self.eos_stiffness >= 0.0) {
            return Err(ConfigError::InvalidStiffness(self.eos_stiffness));
        }
        if !self.eos_power.is_finite() {
            return Err(ConfigError::InvalidPower(self.eos_power));
        }
        if !(self.dynamic_viscosity.is_finite() && self.dynamic_viscosity >= 0.0) {
            return Err(ConfigError::InvalidViscosity(self.dynamic_viscosity));
        }
        Ok(())
    }
}

impl Default for FluidParams {
    fn default() -> Self {
        Self::water()
    }
}

/// Tait EOS pressure, floored at [`PRESSURE_FLOOR`].
#[inline]
pub fn tait_pressure(density: Real, params: &FluidParams) -> Real {
    Real::max(
        PRESSURE_FLOOR,
        params.eos_stiffness * ((density / params.rest_density).powf(params.eos_power) - 1.0),
    )
}

/// Strain approximation from the affine matrix: diagonal kept, both
/// off-diagonals replaced by `C01 + C10`.
#[inline]
pub fn viscous_strain(affine: &Matrix) -> Matrix {
    let mut strain = *affine;
    let trace = strain.col(1).x + strain.col(0).y;
    strain.col_mut(0).y = trace;
    strain.col_mut(1).x = trace;
    strain
}

/// Cauchy stress for a particle at the given density.
pub fn calculate_stress(affine: &Matrix, density: Real, params: &FluidParams) -> Matrix {
    let pressure = tait_pressure(density, params);
    let stress = diagonal_from_value(-pressure);

    stress + viscous_strain(affine) * params.dynamic_viscosity
}
