//! Mapping from cell hash to the set of front samples currently inside it.

use crate::grid::point::InnerPos;
use rustc_hash::FxHashMap;

/// Tracks which [`InnerPos`] front samples currently occupy each cell.
///
/// Monotone in time per §3: points are added or advance, and are only
/// removed from a cell when that cell closes (is marked burned) and its
/// entry is dropped wholesale.
#[derive(Debug, Clone, Default)]
pub struct CellPointsMap {
    points: FxHashMap<u32, Vec<InnerPos>>,
}

impl CellPointsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a front sample into a cell's set.
    pub fn insert(&mut self, cell_hash: u32, point: InnerPos) {
        self.points.entry(cell_hash).or_default().push(point);
    }

    /// Insert multiple front samples at once (used for ignition seeding).
    pub fn insert_many(&mut self, cell_hash: u32, points: impl IntoIterator<Item = InnerPos>) {
        self.points.entry(cell_hash).or_default().extend(points);
    }

    #[must_use]
    pub fn points_in(&self, cell_hash: u32) -> &[InnerPos] {
        self.points.get(&cell_hash).map_or(&[], Vec::as_slice)
    }

    /// Remove and return all points for a cell — used when a cell closes
    /// (becomes burned) and its front samples are retired.
    pub fn take(&mut self, cell_hash: u32) -> Vec<InnerPos> {
        self.points.remove(&cell_hash).unwrap_or_default()
    }

    #[must_use]
    pub fn cells_with_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
