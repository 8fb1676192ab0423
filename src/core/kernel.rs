//! Quadratic B-spline interpolation shared by every transfer stage.

use bevy::math::IVec2;

use crate::math::{Real, Vector};

/// MPM kernel size (3x3 B-spline)
pub const KERNEL_SIZE: usize = 3;
/// Number of neighbors in 3x3 kernel
pub const NEIGHBOR_COUNT: usize = KERNEL_SIZE * KERNEL_SIZE;

/// Compute the inverse dimension factor used by MLS-MPM kernels.
///
/// For the quadratic kernel this is `4 / dx²`; the grid here has unit cells,
/// so every stage ends up using 4.
#[inline]
pub fn inv_d(cell_width: Real) -> Real {
    4.0 / (cell_width * cell_width)
}

/// Quadratic B-spline weights for grid offsets -1, 0 and +1.
///
/// `d` is the particle's offset from the centre of its base cell and lies in
/// `[-0.5, 0.5)`.
#[inline(always)]
pub fn quadratic_weights(d: Real) -> [Real; KERNEL_SIZE] {
    let d2 = d * d;

    [
        0.5 * (0.5 - d) * (0.5 - d),
        0.75 - d2,
        0.5 * (0.5 + d) * (0.5 + d),
    ]
}

/// Weights, coordinates and APIC distances of the 3x3 cells around a particle.
#[derive(Debug, Clone, Copy)]
pub struct GridInterpolation {
    /// Bottom-left cell of the 3x3 stencil; may be negative near the walls.
    pub base_cell: IVec2,
    /// B-spline weights [x, y] for each of the three stencil columns/rows.
    pub weights: [Vector; KERNEL_SIZE],
    pub neighbor_coords: [IVec2; NEIGHBOR_COUNT],
    /// `cell + 0.5 - position` for each neighbor.
    pub cell_distances: [Vector; NEIGHBOR_COUNT],
}

impl GridInterpolation {
    #[inline(always)]
    pub fn compute_for_particle(particle_position: Vector) -> Self {
        let center_cell = particle_position.floor().as_ivec2();
        let base_cell = center_cell - IVec2::ONE;

        let cell_difference = particle_position - center_cell.as_dvec2() - 0.5;

        let x_weights = quadratic_weights(cell_difference.x);
        let y_weights = quadratic_weights(cell_difference.y);

        let weights = [
            Vector::new(x_weights[0], y_weights[0]),
            Vector::new(x_weights[1], y_weights[1]),
            Vector::new(x_weights[2], y_weights[2]),
        ];

        let mut neighbor_coords = [IVec2::ZERO; NEIGHBOR_COUNT];
        let mut cell_distances = [Vector::ZERO; NEIGHBOR_COUNT];

        for gy in 0..KERNEL_SIZE {
            for gx in 0..KERNEL_SIZE {
                let idx = gy * KERNEL_SIZE + gx;
                let coord = base_cell + IVec2::new(gx as i32, gy as i32);
                neighbor_coords[idx] = coord;
                cell_distances[idx] = (coord.as_dvec2() - particle_position) + 0.5;
            }
        }

        Self {
            base_cell,
            weights,
            neighbor_coords,
            cell_distances,
        }
    }

    #[inline(always)]
    pub fn weight_for_neighbor(&self, neighbor_idx: usize) -> Real {
        let gx = neighbor_idx % KERNEL_SIZE;
        let gy = neighbor_idx / KERNEL_SIZE;
        self.weights[gx].x * self.weights[gy].y
    }

    /// Iterator over (coordinate, weight, distance) tuples
    #[inline(always)]
    pub fn iter_neighbors(&self) -> impl Iterator<Item = (IVec2, Real, Vector)> + '_ {
        (0..NEIGHBOR_COUNT).map(move |idx| {
            (
                self.neighbor_coords[idx],
                self.weight_for_neighbor(idx),
                self.cell_distances[idx],
            )
        })
    }
}
