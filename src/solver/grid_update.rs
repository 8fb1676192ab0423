//! Grid velocity update
//!
//! Turns scattered momentum into velocity, adds gravity and enforces the walls.

use crate::core::{BoundaryHandling, Grid, apply_boundary_conditions};
use crate::materials::utils;
use crate::math::{Real, Vector};

/// Grid update stage (divides momentum by mass, applies gravity, clamps boundaries).
///
/// Cells without mass are left at zero.
pub fn update_grid(grid: &mut Grid, gravity: Vector, boundary: BoundaryHandling, dt: Real) {
    let resolution = grid.resolution();
    let gravity_velocity = gravity * dt;

    for (index, cell) in grid.cells_mut().iter_mut().enumerate() {
        if !cell.is_active() {
            continue;
        }

        cell.velocity *= utils::inv_exact(cell.mass);
        cell.velocity += gravity_velocity;

        let (x, y) = (index / resolution, index % resolution);
        apply_boundary_conditions(cell, x, y, resolution, boundary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::IVec2;

    #[test]
    fn normalises_momentum_and_adds_gravity() {
        let mut grid = Grid::new(16);
        let cell = grid.get_cell_coord_mut(IVec2::new(8, 8)).unwrap();
        cell.mass = 2.0;
        cell.velocity = Vector::new(4.0, 2.0);

        update_grid(&mut grid, Vector::new(0.0, -0.3), BoundaryHandling::Slip, 0.2);

        let cell = grid.get_cell_coord(IVec2::new(8, 8)).unwrap();
        assert!((cell.velocity - Vector::new(2.0, 1.0 - 0.06)).length() < 1e-12);
    }

    #[test]
    fn empty_cells_stay_at_rest() {
        let mut grid = Grid::new(16);
        update_grid(&mut grid, Vector::new(0.0, -0.3), BoundaryHandling::Slip, 0.2);
        assert!(grid.cells().iter().all(|cell| cell.velocity == Vector::ZERO));
    }

    #[test]
    fn walls_use_row_and_column_of_flat_index() {
        let mut grid = Grid::new(16);
        for coord in [IVec2::new(1, 8), IVec2::new(8, 14)] {
            let cell = grid.get_cell_coord_mut(coord).unwrap();
            cell.mass = 1.0;
            cell.velocity = Vector::new(1.0, 1.0);
        }

        update_grid(&mut grid, Vector::ZERO, BoundaryHandling::Slip, 0.2);

        // x = 1 is inside the left wall band: horizontal velocity removed.
        assert_eq!(
            grid.get_cell_coord(IVec2::new(1, 8)).unwrap().velocity,
            Vector::new(0.0, 1.0)
        );
        // y = 14 > N - 3: vertical velocity removed.
        assert_eq!(
            grid.get_cell_coord(IVec2::new(8, 14)).unwrap().velocity,
            Vector::new(1.0, 0.0)
        );
    }
}
