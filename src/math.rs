use bevy::math::{DMat2, DVec2};

pub type Real = f64;

pub type Vector = DVec2;
pub type Matrix = DMat2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    DVec2::ZERO
}

#[inline(always)]
pub fn repeat_vector(value: Real) -> Vector {
    DVec2::splat(value)
}

#[inline(always)]
pub fn zero_matrix() -> Matrix {
    DMat2::ZERO
}

#[inline(always)]
pub fn diagonal_from_value(value: Real) -> Matrix {
    Matrix::from_diagonal(DVec2::splat(value))
}

/// `a ⊗ b`, i.e. column `j` is `a * b[j]`.
#[inline(always)]
pub fn outer_product(a: Vector, b: Vector) -> Matrix {
    Matrix::from_cols(a * b.x, a * b.y)
}

#[inline(always)]
pub fn matrix_is_finite(m: &Matrix) -> bool {
    m.x_axis.is_finite() && m.y_axis.is_finite()
}

/// Largest absolute entry, used by tests and diagnostics.
#[inline]
pub fn matrix_max_abs(m: &Matrix) -> Real {
    m.x_axis
        .abs()
        .max_element()
        .max(m.y_axis.abs().max_element())
}
