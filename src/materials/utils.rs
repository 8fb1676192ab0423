//! Helper functions for materials

use crate::config::constants::MIN_DENSITY;
use crate::math::Real;

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: Real) -> Real {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Particle volume from its mass and the grid density around it.
///
/// Density is floored at [`MIN_DENSITY`]; the flag reports whether the floor
/// was applied.
#[inline]
pub fn particle_volume(mass: Real, density: Real) -> (Real, bool) {
    if density >= MIN_DENSITY {
        (mass / density, false)
    } else {
        (mass / MIN_DENSITY, true)
    }
}
