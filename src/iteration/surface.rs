//! Surface mode: one scenario per combustible cell, run exactly once (§4.6).

use crate::grid::{Grid, Ignition};

/// Build the full list of ignitions for surface mode: one point ignition
/// per combustible cell in the grid, each with zero initial size.
#[must_use]
pub fn surface_ignitions(grid: &Grid) -> Vec<Ignition> {
    let mut ignitions = Vec::new();
    for row in 0..grid.rows() as i64 {
        for col in 0..grid.cols() as i64 {
            if grid.get(row, col).is_some_and(|c| c.is_combustible()) {
                ignitions.push(Ignition::Point {
                    row,
                    col,
                    size_ha: 0.0,
                });
            }
        }
    }
    ignitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, GridCorners};

    #[test]
    fn one_ignition_per_combustible_cell() {
        let mut cells = vec![Cell::new(1, 0.0, 0.0); 10];
        cells[3] = Cell::NONFUEL;
        let grid = Grid::new(
            2,
            5,
            10.0,
            GridCorners {
                xllcorner: 0.0,
                yllcorner: 0.0,
            },
            -9999.0,
            cells,
        )
        .unwrap();
        let ignitions = surface_ignitions(&grid);
        assert_eq!(ignitions.len(), 9);
    }
}
