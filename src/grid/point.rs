//! Sub-cell floating point positions carrying the advancing fire front.

/// A sub-cell position `(x, y)`, in metres from the cell's lower-left
/// corner, representing one sample of the advancing fire front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerPos {
    pub x: f64,
    pub y: f64,
}

impl InnerPos {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The eight unit directions used to seed a point ignition (§4.1).
    #[must_use]
    pub fn eight_directions() -> [f64; 8] {
        use std::f64::consts::PI;
        let mut dirs = [0.0; 8];
        for (i, d) in dirs.iter_mut().enumerate() {
            *d = (i as f64) * (PI / 4.0);
        }
        dirs
    }

    /// Advance this point by `(dx, dy)`, returning the new position.
    #[must_use]
    pub fn advance(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Resolve which cell (by row/col offset from a reference cell) this
    /// position now falls in, given a uniform `cell_size_m`, and the
    /// position re-expressed relative to that cell's origin.
    ///
    /// A point can cross more than one cell boundary in a single step if
    /// the step was large, hence this returns signed offsets rather than
    /// assuming single-cell steps.
    #[must_use]
    pub fn resolve_cell_offset(&self, cell_size_m: f64) -> ((i64, i64), InnerPos) {
        let d_col = (self.x / cell_size_m).floor();
        let d_row = (self.y / cell_size_m).floor();
        let local = InnerPos::new(self.x - d_col * cell_size_m, self.y - d_row * cell_size_m);
        ((d_row as i64, d_col as i64), local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn eight_directions_span_full_circle() {
        let dirs = InnerPos::eight_directions();
        assert_relative_eq!(dirs[0], 0.0);
        assert_relative_eq!(dirs[4], std::f64::consts::PI);
    }

    #[test]
    fn resolve_cell_offset_identity_within_cell() {
        let p = InnerPos::new(5.0, 5.0);
        let (offset, local) = p.resolve_cell_offset(10.0);
        assert_eq!(offset, (0, 0));
        assert_relative_eq!(local.x, 5.0);
        assert_relative_eq!(local.y, 5.0);
    }

    #[test]
    fn resolve_cell_offset_crosses_boundary() {
        let p = InnerPos::new(23.0, -3.0);
        let (offset, local) = p.resolve_cell_offset(10.0);
        assert_eq!(offset, (-1, 2));
        assert_relative_eq!(local.x, 3.0);
        assert_relative_eq!(local.y, 7.0);
    }
}
