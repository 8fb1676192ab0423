//! Background grid for the fluid simulation
//!
//! Fixed `N x N` cells stored in a flat array addressed as `x * N + y`.

use bevy::math::IVec2;

use crate::config::constants::WALL_THICKNESS;
use crate::math::{Real, Vector, zero_vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Momentum while particles scatter, velocity after `update_grid`.
    pub velocity: Vector,
    pub mass: Real,
}

impl Cell {
    #[inline(always)]
    pub fn zeroed() -> Self {
        Self {
            velocity: zero_vector(),
            mass: 0.0,
        }
    }

    #[inline(always)]
    pub fn zero(&mut self) {
        self.velocity = zero_vector();
        self.mass = 0.0;
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.mass > 0.0
    }
}

// Boundary handling modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryHandling {
    /// Cells in the wall band lose their whole velocity.
    Stick,
    /// Cells in the wall band lose the velocity component normal to the wall.
    #[default]
    Slip,
    /// No wall constraint; particles are still clamped to the domain.
    None,
}

#[derive(Debug, Clone)]
pub struct Grid {
    resolution: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            cells: vec![Cell::zeroed(); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Flat index of `coord`, or `None` if it lies outside `[0, N)²`.
    #[inline(always)]
    pub fn flat_index(&self, coord: IVec2) -> Option<usize> {
        if is_valid_grid_coord(coord, self.resolution) {
            Some(coord.x as usize * self.resolution + coord.y as usize)
        } else {
            None
        }
    }

    /// Get cell at coordinates (read-only)
    #[inline(always)]
    pub fn get_cell_coord(&self, coord: IVec2) -> Option<&Cell> {
        self.flat_index(coord).map(|index| &self.cells[index])
    }

    #[inline(always)]
    pub fn get_cell_coord_mut(&mut self, coord: IVec2) -> Option<&mut Cell> {
        let index = self.flat_index(coord)?;
        Some(&mut self.cells[index])
    }

    /// Zero every cell.
    pub fn zero_cells(&mut self) {
        self.cells.iter_mut().for_each(Cell::zero);
    }

    pub fn total_mass(&self) -> Real {
        self.cells.iter().map(|cell| cell.mass).sum()
    }

    /// Total momentum; only meaningful before `update_grid` normalises.
    pub fn total_momentum(&self) -> Vector {
        self.cells
            .iter()
            .fold(zero_vector(), |acc, cell| acc + cell.velocity)
    }

    pub fn active_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_active()).count()
    }
}

#[inline(always)]
pub fn is_valid_grid_coord(coord: IVec2, resolution: usize) -> bool {
    coord.x >= 0
        && coord.y >= 0
        && (coord.x as usize) < resolution
        && (coord.y as usize) < resolution
}

/// Whether row/column `i` lies in the wall band of a grid of `resolution`.
#[inline(always)]
pub fn in_wall_band(i: usize, resolution: usize) -> bool {
    i < WALL_THICKNESS || i + WALL_THICKNESS + 1 > resolution
}

/// Enforce the wall constraint on an active cell at `(x, y)`.
#[inline(always)]
pub fn apply_boundary_conditions(
    cell: &mut Cell,
    x: usize,
    y: usize,
    resolution: usize,
    boundary: BoundaryHandling,
) {
    let wall_x = in_wall_band(x, resolution);
    let wall_y = in_wall_band(y, resolution);

    match boundary {
        BoundaryHandling::Stick => {
            if wall_x || wall_y {
                cell.velocity = zero_vector();
            }
        }
        BoundaryHandling::Slip => {
            if wall_x {
                cell.velocity.x = 0.0; // Allow Y sliding
            }
            if wall_y {
                cell.velocity.y = 0.0; // Allow X sliding
            }
        }
        BoundaryHandling::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_is_row_major_by_x() {
        let grid = Grid::new(8);
        assert_eq!(grid.flat_index(IVec2::new(2, 5)), Some(21));
        assert_eq!(grid.flat_index(IVec2::new(-1, 0)), None);
        assert_eq!(grid.flat_index(IVec2::new(0, 8)), None);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut grid = Grid::new(6);
        for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
            cell.mass = i as Real;
            cell.velocity = Vector::new(1.0, -(i as Real));
        }
        grid.zero_cells();
        grid.zero_cells();
        assert!(grid.cells().iter().all(|cell| *cell == Cell::zeroed()));
        assert_eq!(grid.active_cell_count(), 0);
    }

    #[test]
    fn wall_band_is_two_cells_thick() {
        let n = 64;
        let band: Vec<usize> = (0..n).filter(|&i| in_wall_band(i, n)).collect();
        assert_eq!(band, vec![0, 1, 62, 63]);
    }

    #[test]
    fn slip_zeroes_normal_component_only() {
        let mut cell = Cell {
            velocity: Vector::new(1.0, 2.0),
            mass: 1.0,
        };
        apply_boundary_conditions(&mut cell, 1, 30, 64, BoundaryHandling::Slip);
        assert_eq!(cell.velocity, Vector::new(0.0, 2.0));

        let mut corner = Cell {
            velocity: Vector::new(1.0, 2.0),
            mass: 1.0,
        };
        apply_boundary_conditions(&mut corner, 62, 0, 64, BoundaryHandling::Slip);
        assert_eq!(corner.velocity, Vector::ZERO);
    }

    #[test]
    fn stick_and_open_boundaries() {
        let mut stuck = Cell {
            velocity: Vector::new(1.0, 2.0),
            mass: 1.0,
        };
        apply_boundary_conditions(&mut stuck, 30, 63, 64, BoundaryHandling::Stick);
        assert_eq!(stuck.velocity, Vector::ZERO);

        let mut open = Cell {
            velocity: Vector::new(1.0, 2.0),
            mass: 1.0,
        };
        apply_boundary_conditions(&mut open, 0, 0, 64, BoundaryHandling::None);
        assert_eq!(open.velocity, Vector::new(1.0, 2.0));
    }
}
