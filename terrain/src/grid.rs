//! Square altitude grid.

/// Altitude above which a cell is land rather than water.
pub const LAND_THRESHOLD: u8 = 128;

/// A square grid of widened (8-bit range) altitudes.
///
/// Cells are addressed `(x, y)` with `x` as the outer index, matching the
/// order snapshots place them in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltitudeGrid {
    size: usize,
    cells: Vec<u8>,
}

impl AltitudeGrid {
    /// Creates a grid of the given side length filled with altitude 0.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a grid from cells in `(x, y)` outer-x order.
    ///
    /// Returns `None` if `cells` does not hold exactly `size * size` values.
    #[must_use]
    pub fn from_cells(size: usize, cells: Vec<u8>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Side length in cells.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All cells in `(x, y)` outer-x order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns the altitude at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Sets the altitude at `(x, y)`. Returns `false` outside the grid.
    pub fn set(&mut self, x: usize, y: usize, altitude: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = altitude;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the cell at `(x, y)` is land.
    #[must_use]
    pub fn is_land(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|alt| alt > LAND_THRESHOLD)
    }

    /// Number of land cells.
    #[must_use]
    pub fn land_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&alt| alt > LAND_THRESHOLD)
            .count()
    }

    /// Renders the grid as text, one line per `x`, `#` for land.
    #[must_use]
    pub fn render_land(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size.max(1)) {
            for &alt in row {
                out.push(if alt > LAND_THRESHOLD { '#' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }

    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.size && y < self.size {
            Some(x * self.size + y)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_flat() {
        let grid = AltitudeGrid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().len(), 16);
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn set_and_get() {
        let mut grid = AltitudeGrid::new(4);
        assert!(grid.set(1, 2, 240));
        assert_eq!(grid.get(1, 2), Some(240));
        assert_eq!(grid.get(2, 1), Some(0));
        assert_eq!(grid.cells()[6], 240);
    }

    #[test]
    fn out_of_range_access() {
        let mut grid = AltitudeGrid::new(4);
        assert_eq!(grid.get(4, 0), None);
        assert!(!grid.set(0, 4, 16));
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(AltitudeGrid::from_cells(2, vec![0; 4]).is_some());
        assert!(AltitudeGrid::from_cells(2, vec![0; 3]).is_none());
    }

    #[test]
    fn land_threshold_is_exclusive() {
        let grid = AltitudeGrid::from_cells(2, vec![128, 144, 0, 240]).unwrap();
        assert!(!grid.is_land(0, 0));
        assert!(grid.is_land(0, 1));
        assert_eq!(grid.land_cells(), 2);
    }

    #[test]
    fn render_land_rows() {
        let grid = AltitudeGrid::from_cells(2, vec![240, 0, 0, 240]).unwrap();
        assert_eq!(grid.render_land(), "# \n #\n");
    }
}
