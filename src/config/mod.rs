//! Configuration and parameters
//!
//! Default constants, solver settings and initial particle layout.

pub mod constants;
pub mod solver_params;

pub use constants::*;
pub use solver_params::*;
