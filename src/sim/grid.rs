//! Fixed-size cell grid and Moore-neighborhood counting.

use super::error::GridError;
use rand::Rng;

/// How neighbors beyond the grid edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Cells outside the grid are permanently dead.
    #[default]
    Clamped,
    /// Edges wrap around, so the grid behaves as a torus.
    Toroidal,
}

impl Boundary {
    /// Parse a boundary name as accepted on the command line and in settings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "clamped" | "bounded" | "dead" => Some(Boundary::Clamped),
            "toroidal" | "torus" | "wrap" => Some(Boundary::Toroidal),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Boundary::Clamped => "clamped",
            Boundary::Toroidal => "toroidal",
        }
    }

    /// Resolve `index + delta` along an axis of length `len`.
    #[inline]
    fn resolve(self, index: usize, delta: isize, len: usize) -> Option<usize> {
        let target = index as isize + delta;
        match self {
            Boundary::Clamped => (0..len as isize).contains(&target).then_some(target as usize),
            Boundary::Toroidal => Some(target.rem_euclid(len as isize) as usize),
        }
    }
}

/// Row-major boolean cell matrix with immutable dimensions.
///
/// Origin is the top-left cell. Reads outside the grid return dead, writes
/// outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    boundary: Boundary,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid.
    pub fn new(width: usize, height: usize, boundary: Boundary) -> Result<Self, GridError> {
        let len = match width.checked_mul(height) {
            Some(len) if len > 0 => len,
            _ => return Err(GridError::InvalidDimensions { width, height }),
        };
        Ok(Self {
            width,
            height,
            boundary,
            cells: vec![false; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Returns true if the signed coordinate lies inside the grid.
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// Gets the state of a cell. Out-of-range cells read as dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    /// Sets the state of a cell. Returns false if the cell is out of range.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let i = self.index(row, col);
        self.cells[i] = alive;
        true
    }

    /// Flips a cell. Returns false if the cell is out of range.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let alive = self.get(row, col);
        self.set(row, col, !alive)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Replaces every cell with an independent Bernoulli(`density`) draw.
    ///
    /// A NaN or infinite density fills nothing.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_finite() { density.clamp(0.0, 1.0) } else { 0.0 };
        for cell in &mut self.cells {
            *cell = rng.gen_bool(density);
        }
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterates over rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Iterates over the (row, col) coordinates of live cells.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Counts live cells among the 8 Moore neighbors of (row, col).
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        let mut count = 0u8;
        for dr in -1..=1isize {
            for dc in -1..=1isize {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = self.boundary.resolve(row, dr, self.height);
                let c = self.boundary.resolve(col, dc, self.width);
                if let (Some(r), Some(c)) = (r, c) {
                    if self.cells[self.index(r, c)] {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Neighbor counts for every cell, row-major.
    ///
    /// Sums each 3-cell horizontal window per row, then each 3-row vertical
    /// window of those sums, and subtracts the center. Matches
    /// [`Grid::neighbor_count`] for both boundary policies, including the
    /// wrapped duplicates a 1- or 2-wide torus produces.
    pub fn neighbor_counts(&self) -> Vec<u8> {
        let (w, h) = (self.width, self.height);
        let mut horizontal = vec![0u8; w * h];
        for row in 0..h {
            for col in 0..w {
                let mut sum = 0u8;
                for dc in -1..=1isize {
                    if let Some(c) = self.boundary.resolve(col, dc, w) {
                        sum += self.cells[row * w + c] as u8;
                    }
                }
                horizontal[row * w + col] = sum;
            }
        }

        let mut counts = vec![0u8; w * h];
        for row in 0..h {
            for col in 0..w {
                let mut sum = 0u8;
                for dr in -1..=1isize {
                    if let Some(r) = self.boundary.resolve(row, dr, h) {
                        sum += horizontal[r * w + col];
                    }
                }
                counts[row * w + col] = sum - self.cells[row * w + col] as u8;
            }
        }
        counts
    }

    /// Copies the overlapping top-left region of `source` into this grid.
    ///
    /// Cells outside the overlap keep their current state.
    pub fn copy_overlap(&mut self, source: &Grid) {
        for row in 0..self.height.min(source.height) {
            for col in 0..self.width.min(source.width) {
                let i = self.index(row, col);
                self.cells[i] = source.cells[source.index(row, col)];
            }
        }
    }

    /// Copies the overlapping top-left region into a fresh grid of another size.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self, GridError> {
        let mut out = Grid::new(width, height, self.boundary)?;
        out.copy_overlap(self);
        Ok(out)
    }

    /// Same cells under a different boundary policy.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(rows: &[&str], boundary: Boundary) -> Grid {
        let mut grid = Grid::new(rows[0].len(), rows.len(), boundary).unwrap();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                grid.set(r, c, ch == 'O');
            }
        }
        grid
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 5, Boundary::Clamped),
            Err(GridError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(Grid::new(3, 0, Boundary::Toroidal).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2, Boundary::Clamped),
            Err(GridError::InvalidDimensions { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut grid = Grid::new(4, 3, Boundary::Clamped).unwrap();
        assert!(!grid.set(3, 0, true));
        assert!(!grid.set(0, 4, true));
        assert!(!grid.get(10, 10));
        assert_eq!(grid.population(), 0);
        assert!(grid.toggle(2, 3));
        assert!(grid.get(2, 3));
    }

    #[test]
    fn clamped_corner_sees_three_neighbors() {
        let full = grid_from(&["OOO", "OOO", "OOO"], Boundary::Clamped);
        assert_eq!(full.neighbor_count(0, 0), 3);
        assert_eq!(full.neighbor_count(0, 1), 5);
        assert_eq!(full.neighbor_count(1, 1), 8);
    }

    #[test]
    fn toroidal_wraps_across_edges() {
        let grid = grid_from(
            &["O...O", ".....", ".....", "O...O"],
            Boundary::Toroidal,
        );
        // Every corner touches the other three through the wrap.
        assert_eq!(grid.neighbor_count(0, 0), 3);
        assert_eq!(grid.neighbor_count(3, 4), 3);
        let clamped = grid.clone().with_boundary(Boundary::Clamped);
        assert_eq!(clamped.neighbor_count(0, 0), 0);
    }

    #[test]
    fn summed_counts_match_naive_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let sizes = [(1, 1), (2, 1), (1, 3), (2, 2), (5, 3), (17, 11)];
        for &(w, h) in &sizes {
            for boundary in [Boundary::Clamped, Boundary::Toroidal] {
                let mut grid = Grid::new(w, h, boundary).unwrap();
                grid.fill_random(&mut rng, 0.5);
                let counts = grid.neighbor_counts();
                for row in 0..h {
                    for col in 0..w {
                        assert_eq!(
                            counts[row * w + col],
                            grid.neighbor_count(row, col),
                            "{}x{} {:?} at ({}, {})",
                            w,
                            h,
                            boundary,
                            row,
                            col
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn single_cell_torus_counts_itself_eight_times() {
        let mut grid = Grid::new(1, 1, Boundary::Toroidal).unwrap();
        grid.set(0, 0, true);
        assert_eq!(grid.neighbor_count(0, 0), 8);
        assert_eq!(grid.neighbor_counts(), vec![8]);
    }

    #[test]
    fn resized_copies_overlap_only() {
        let grid = grid_from(&["O..O", ".OO.", "O..O"], Boundary::Clamped);
        let smaller = grid.resized(2, 2).unwrap();
        assert_eq!((smaller.width(), smaller.height()), (2, 2));
        assert!(smaller.get(0, 0) && smaller.get(1, 1));
        assert!(!smaller.get(0, 1) && !smaller.get(1, 0));

        let larger = grid.resized(6, 5).unwrap();
        assert_eq!(larger.population(), grid.population());
        assert!(larger.get(2, 3));
        assert!(!larger.get(4, 5));
    }

    #[test]
    fn fill_random_respects_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(10, 10, Boundary::Clamped).unwrap();
        grid.fill_random(&mut rng, 1.0);
        assert_eq!(grid.population(), 100);
        grid.fill_random(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
        grid.fill_random(&mut rng, 1.0);
        grid.fill_random(&mut rng, f64::NAN);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn live_cells_are_row_major() {
        let grid = grid_from(&[".O", "O."], Boundary::Clamped);
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn boundary_names_parse() {
        assert_eq!(Boundary::from_name("Wrap"), Some(Boundary::Toroidal));
        assert_eq!(Boundary::from_name("clamped"), Some(Boundary::Clamped));
        assert_eq!(Boundary::from_name("sphere"), None);
        assert_eq!(Boundary::Toroidal.name(), "toroidal");
    }
}
