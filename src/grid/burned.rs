//! Compact per-scenario bit-set of cells that cannot receive new fire.

use std::sync::Mutex;

/// One bit per cell: `true` means "already burned or non-fuel, cannot
/// receive new fire". Owned by a single [`crate::scenario::Scenario`].
#[derive(Debug, Clone)]
pub struct BurnedData {
    bits: Vec<u64>,
    len: usize,
}

impl BurnedData {
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self {
            bits: vec![0; cell_count.div_ceil(64)],
            len: cell_count,
        }
    }

    #[must_use]
    pub fn is_burned(&self, hash: u32) -> bool {
        let idx = hash as usize;
        (self.bits[idx / 64] >> (idx % 64)) & 1 != 0
    }

    /// Marks a cell burned; returns `true` if this call was the one that
    /// first closed it (caller uses this to decide whether to record
    /// arrival time / fire an observer notification).
    pub fn mark_burned(&mut self, hash: u32) -> bool {
        let idx = hash as usize;
        let word = idx / 64;
        let bit = 1u64 << (idx % 64);
        let was_set = self.bits[word] & bit != 0;
        self.bits[word] |= bit;
        !was_set
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn count_burned(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Zero every bit, preparing the buffer for reuse by another scenario.
    pub fn reset(&mut self) {
        self.bits.iter_mut().for_each(|w| *w = 0);
    }
}

/// A simple mutex-guarded stack of reusable [`BurnedData`] buffers, keyed
/// implicitly by cell count (the pool only ever serves one grid size in
/// practice, per §5 "Pool of reusable buffers").
#[derive(Debug, Default)]
pub struct BurnedDataPool {
    free: Mutex<Vec<BurnedData>>,
}

impl BurnedDataPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a zeroed buffer sized for `cell_count` cells, reusing a
    /// pooled one if available.
    pub fn acquire(&self, cell_count: usize) -> BurnedData {
        let mut free = self.free.lock().expect("burned-data pool mutex poisoned");
        while let Some(mut buf) = free.pop() {
            if buf.len() == cell_count {
                buf.reset();
                return buf;
            }
            // Wrong size (grid changed between acquisitions): drop it.
        }
        BurnedData::new(cell_count)
    }

    /// Return a buffer to the pool for future reuse.
    pub fn release(&self, buf: BurnedData) {
        self.free.lock().expect("burned-data pool mutex poisoned").push(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_unburned() {
        let data = BurnedData::new(100);
        assert!((0..100).all(|h| !data.is_burned(h)));
        assert_eq!(data.count_burned(), 0);
    }

    #[test]
    fn mark_burned_reports_first_closure_only() {
        let mut data = BurnedData::new(10);
        assert!(data.mark_burned(3));
        assert!(!data.mark_burned(3));
        assert!(data.is_burned(3));
        assert_eq!(data.count_burned(), 1);
    }

    #[test]
    fn reset_clears_all_bits() {
        let mut data = BurnedData::new(10);
        data.mark_burned(1);
        data.mark_burned(9);
        data.reset();
        assert_eq!(data.count_burned(), 0);
    }

    #[test]
    fn pool_reuses_matching_size_buffers() {
        let pool = BurnedDataPool::new();
        let mut buf = pool.acquire(50);
        buf.mark_burned(2);
        pool.release(buf);

        let reused = pool.acquire(50);
        assert!(!reused.is_burned(2), "pooled buffer must be zeroed on acquire");
    }

    #[test]
    fn pool_discards_mismatched_size_buffers() {
        let pool = BurnedDataPool::new();
        pool.release(BurnedData::new(20));
        let acquired = pool.acquire(50);
        assert_eq!(acquired.len(), 50);
    }
}
