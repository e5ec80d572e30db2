//! Resolving an ignition request (point or perimeter) to starting cells.

use crate::error::{FirefrontError, Result};
use crate::grid::grid::Grid;
use tracing::debug;

/// How a fire is started.
#[derive(Debug, Clone)]
pub enum Ignition {
    /// A single point, optionally with an initial size in hectares.
    Point { row: i64, col: i64, size_ha: f64 },
    /// A set of cells already inside the perimeter at `t = 0`.
    Perimeter { cells: Vec<(i64, i64)> },
}

/// The resolved set of starting cells for a scenario, each adjusted so it
/// lands on a combustible cell.
#[derive(Debug, Clone)]
pub struct ResolvedIgnition {
    pub cells: Vec<u32>,
}

impl Ignition {
    /// Resolve this ignition against a grid, finding the nearest
    /// combustible cell(s) per §6: "If the centre cell of a perimeter-of-
    /// size-1 or a zero-size point lands in non-fuel, the nearest
    /// combustible cell in expanding rings is used instead."
    ///
    /// # Errors
    /// [`FirefrontError::IgnitionOutOfBounds`] if the point/perimeter cells
    /// are off the grid; [`FirefrontError::NoCombustibleCellNearIgnition`]
    /// if no fuel is found within the grid's extent;
    /// [`FirefrontError::EmptyIgnitionPerimeter`] for an empty perimeter.
    pub fn resolve(&self, grid: &Grid) -> Result<ResolvedIgnition> {
        match self {
            Ignition::Point { row, col, size_ha } => {
                if !grid.is_in_bounds(*row, *col) {
                    return Err(FirefrontError::IgnitionOutOfBounds {
                        row: *row,
                        col: *col,
                        rows: grid.rows(),
                        cols: grid.cols(),
                    });
                }
                if *size_ha <= 0.0 {
                    let cell = find_nearest_combustible(grid, *row, *col)?;
                    return Ok(ResolvedIgnition { cells: vec![cell] });
                }
                // A sized point ignition covers a roughly circular patch of
                // cells; cells that land on non-fuel within that patch are
                // simply skipped (only a single-cell point re-seeks fuel).
                let radius_cells =
                    ((size_ha * 10_000.0 / std::f64::consts::PI).sqrt() / grid.cell_size_m())
                        .ceil() as i64;
                let mut cells = Vec::new();
                for dr in -radius_cells..=radius_cells {
                    for dc in -radius_cells..=radius_cells {
                        let r = dr as f64;
                        let c = dc as f64;
                        if (r * r + c * c).sqrt() > radius_cells as f64 {
                            continue;
                        }
                        if let Some(h) = grid.hash(row + dr, col + dc) {
                            if grid.get_by_hash(h).is_combustible() {
                                cells.push(h);
                            }
                        }
                    }
                }
                if cells.is_empty() {
                    let cell = find_nearest_combustible(grid, *row, *col)?;
                    cells.push(cell);
                }
                Ok(ResolvedIgnition { cells })
            }
            Ignition::Perimeter { cells } => {
                if cells.is_empty() {
                    return Err(FirefrontError::EmptyIgnitionPerimeter);
                }
                if cells.len() == 1 {
                    let (row, col) = cells[0];
                    if !grid.is_in_bounds(row, col) {
                        return Err(FirefrontError::IgnitionOutOfBounds {
                            row,
                            col,
                            rows: grid.rows(),
                            cols: grid.cols(),
                        });
                    }
                    let cell = find_nearest_combustible(grid, row, col)?;
                    return Ok(ResolvedIgnition { cells: vec![cell] });
                }
                let mut hashes = Vec::with_capacity(cells.len());
                for &(row, col) in cells {
                    let h = grid.hash(row, col).ok_or(FirefrontError::IgnitionOutOfBounds {
                        row,
                        col,
                        rows: grid.rows(),
                        cols: grid.cols(),
                    })?;
                    if grid.get_by_hash(h).is_combustible() {
                        hashes.push(h);
                    }
                }
                if hashes.is_empty() {
                    return Err(FirefrontError::EmptyIgnitionPerimeter);
                }
                Ok(ResolvedIgnition { cells: hashes })
            }
        }
    }
}

/// Expanding-ring search (Chebyshev rings) for the closest combustible cell.
fn find_nearest_combustible(grid: &Grid, row: i64, col: i64) -> Result<u32> {
    let max_ring = grid.rows().max(grid.cols()) as i64;
    for ring in 0..=max_ring {
        if ring == 0 {
            if let Some(h) = grid.hash(row, col) {
                if grid.get_by_hash(h).is_combustible() {
                    return Ok(h);
                }
            }
            continue;
        }
        let mut best: Option<(u32, i64)> = None;
        for dr in -ring..=ring {
            for dc in -ring..=ring {
                if dr.abs() != ring && dc.abs() != ring {
                    continue; // interior of the ring, already checked
                }
                if let Some(h) = grid.hash(row + dr, col + dc) {
                    if grid.get_by_hash(h).is_combustible() {
                        let dist_sq = dr * dr + dc * dc;
                        let better = match best {
                            Some((_, best_dist)) => dist_sq < best_dist,
                            None => true,
                        };
                        if better {
                            best = Some((h, dist_sq));
                        }
                    }
                }
            }
        }
        if let Some((h, _)) = best {
            debug!(ring, "resolved ignition to nearest combustible cell");
            return Ok(h);
        }
    }
    Err(FirefrontError::NoCombustibleCellNearIgnition {
        row,
        col,
        rings_searched: max_ring as u32,
    })
}
