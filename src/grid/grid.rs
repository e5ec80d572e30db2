//! The landscape raster: a rectangular array of immutable [`Cell`]s.

use crate::error::{FirefrontError, Result};
use crate::grid::cell::Cell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Georeferenced corner coordinates of the grid extent, in the source CRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCorners {
    pub xllcorner: f64,
    pub yllcorner: f64,
}

/// A rectangular landscape raster.
///
/// Cells are stored row-major; the packed hash `row * cols + col` is used
/// everywhere downstream (event payloads, `CellPointsMap` keys, bit-set
/// indices) as the single cell identifier, matching §3's `h = row*COLS + col`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cell_size_m: f64,
    corners: GridCorners,
    nodata: f64,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from a flat, row-major cell buffer.
    ///
    /// # Errors
    /// Returns [`FirefrontError::InvalidGridDimensions`] if `rows`/`cols` are
    /// zero, or if `cells.len() != rows * cols`, and
    /// [`FirefrontError::EmptyFuelGrid`] if every cell is non-fuel.
    pub fn new(
        rows: usize,
        cols: usize,
        cell_size_m: f64,
        corners: GridCorners,
        nodata: f64,
        cells: Vec<Cell>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(FirefrontError::InvalidGridDimensions { rows, cols });
        }
        if cells.len() != rows * cols {
            return Err(FirefrontError::GridExtentMismatch {
                name_a: "cells",
                rows_a: cells.len() / cols.max(1),
                cols_a: cols,
                name_b: "requested",
                rows_b: rows,
                cols_b: cols,
            });
        }
        if !cells.iter().any(Cell::is_combustible) {
            return Err(FirefrontError::EmptyFuelGrid);
        }

        info!(rows, cols, cell_size_m, "built landscape grid");
        Ok(Self {
            rows,
            cols,
            cell_size_m,
            corners,
            nodata,
            cells,
        })
    }

    /// Build a grid from three equal-extent rasters (fuel code, slope, aspect).
    ///
    /// Unknown fuel codes are not rejected here — the §7 "unknown fuel-table
    /// entry" policy is the fuel lookup's concern, not the grid's; this
    /// constructor only checks the structural (extent) invariant.
    ///
    /// # Errors
    /// Returns [`FirefrontError::GridExtentMismatch`] if the three rasters
    /// disagree on length.
    pub fn from_rasters(
        rows: usize,
        cols: usize,
        cell_size_m: f64,
        corners: GridCorners,
        nodata: f64,
        fuel_codes: &[u16],
        slope_pct: &[f64],
        aspect_deg: &[f64],
    ) -> Result<Self> {
        let expected = rows * cols;
        if fuel_codes.len() != expected {
            return Err(FirefrontError::GridExtentMismatch {
                name_a: "fuel",
                rows_a: fuel_codes.len() / cols.max(1),
                cols_a: cols,
                name_b: "requested",
                rows_b: rows,
                cols_b: cols,
            });
        }
        if slope_pct.len() != expected || aspect_deg.len() != expected {
            return Err(FirefrontError::GridExtentMismatch {
                name_a: "slope/aspect",
                rows_a: slope_pct.len().min(aspect_deg.len()) / cols.max(1),
                cols_a: cols,
                name_b: "fuel",
                rows_b: rows,
                cols_b: cols,
            });
        }

        let cells = fuel_codes
            .iter()
            .zip(slope_pct.iter())
            .zip(aspect_deg.iter())
            .map(|((&fuel, &slope), &aspect)| Cell::new(fuel, slope, aspect))
            .collect();

        Self::new(rows, cols, cell_size_m, corners, nodata, cells)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cell_size_m(&self) -> f64 {
        self.cell_size_m
    }

    #[must_use]
    pub fn corners(&self) -> GridCorners {
        self.corners
    }

    #[must_use]
    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    /// Packed cell identifier `row * cols + col`, or `None` if out of bounds.
    #[must_use]
    pub fn hash(&self, row: i64, col: i64) -> Option<u32> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some((row as u32) * (self.cols as u32) + col as u32)
    }

    /// Inverse of [`Grid::hash`]: `(row, col)` for a packed cell id.
    #[must_use]
    pub fn row_col(&self, hash: u32) -> (i64, i64) {
        let cols = self.cols as u32;
        ((hash / cols) as i64, (hash % cols) as i64)
    }

    #[must_use]
    pub fn get(&self, row: i64, col: i64) -> Option<&Cell> {
        self.hash(row, col).map(|h| &self.cells[h as usize])
    }

    #[must_use]
    pub fn get_by_hash(&self, hash: u32) -> &Cell {
        &self.cells[hash as usize]
    }

    #[must_use]
    pub fn is_in_bounds(&self, row: i64, col: i64) -> bool {
        self.hash(row, col).is_some()
    }

    /// The eight queen-adjacency neighbour hashes of a cell, skipping any
    /// that would fall outside the grid.
    pub fn neighbours_8(&self, hash: u32) -> impl Iterator<Item = u32> + '_ {
        let (row, col) = self.row_col(hash);
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS
            .into_iter()
            .filter_map(move |(dr, dc)| self.hash(row + dr, col + dc))
    }

    /// `true` if every one of the cell's (in-bounds) 8 neighbours is marked
    /// in `predicate`; out-of-bounds neighbours are treated as satisfied so a
    /// cell on the grid edge can still be fully "surrounded" (§4.1).
    pub fn is_surrounded(&self, hash: u32, mut is_closed: impl FnMut(u32) -> bool) -> bool {
        self.neighbours_8(hash).all(|n| is_closed(n))
    }

    /// Warn (not fail) if `fuel_codes_known` doesn't cover every fuel code
    /// present in the grid — the "unknown fuel-table entry" policy of §7.
    pub fn warn_on_unknown_fuel_codes(&self, is_known: impl Fn(u16) -> bool) {
        let mut seen = std::collections::HashSet::new();
        for cell in &self.cells {
            if cell.fuel_code != 0 && !is_known(cell.fuel_code) && seen.insert(cell.fuel_code) {
                warn!(fuel_code = cell.fuel_code, "unknown fuel-table entry, cell treated as non-fuel");
            }
        }
    }
}
