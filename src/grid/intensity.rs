//! Per-scenario record of the fire-line intensity each cell burned at.

use rustc_hash::FxHashMap;

/// One cell's burn record: arrival time (simulated seconds since scenario
/// start) and the maximum fire-line intensity (kW/m) observed there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBurn {
    pub arrival_time: f64,
    pub max_intensity_kw_m: f64,
}

/// Maps burned cells to their [`CellBurn`] record.
///
/// Per §3: arrival time is written exactly once (first ignition wins);
/// intensity is updated only if a later visit records something larger.
#[derive(Debug, Clone, Default)]
pub struct IntensityMap {
    records: FxHashMap<u32, CellBurn>,
}

impl IntensityMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or update) a cell's burn. On the cell's first visit this
    /// sets the arrival time; on every visit it raises the max intensity
    /// if the new value is larger.
    pub fn record(&mut self, cell_hash: u32, time: f64, intensity_kw_m: f64) {
        self.records
            .entry(cell_hash)
            .and_modify(|rec| {
                if intensity_kw_m > rec.max_intensity_kw_m {
                    rec.max_intensity_kw_m = intensity_kw_m;
                }
            })
            .or_insert(CellBurn {
                arrival_time: time,
                max_intensity_kw_m: intensity_kw_m,
            });
    }

    #[must_use]
    pub fn get(&self, cell_hash: u32) -> Option<CellBurn> {
        self.records.get(&cell_hash).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, CellBurn)> + '_ {
        self.records.iter().map(|(&h, &b)| (h, b))
    }
}
