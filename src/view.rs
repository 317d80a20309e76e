//! Mapping between terminal coordinates and grid coordinates.

/// Narrowest and widest a cell may be drawn, in terminal columns.
pub const MIN_CELL_WIDTH: u16 = 1;
pub const MAX_CELL_WIDTH: u16 = 4;

/// Pan offset (in grid cells) and cell size (in terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub offset_col: isize,
    pub offset_row: isize,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl View {
    pub fn new(cell_width: u16) -> Self {
        Self {
            offset_col: 0,
            offset_row: 0,
            cell_width: cell_width.clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
            cell_height: 1,
        }
    }

    pub fn pan(&mut self, d_col: isize, d_row: isize) {
        self.offset_col += d_col;
        self.offset_row += d_row;
    }

    pub fn zoom_in(&mut self) {
        self.cell_width = (self.cell_width + 1).min(MAX_CELL_WIDTH);
    }

    pub fn zoom_out(&mut self) {
        self.cell_width = self.cell_width.saturating_sub(1).max(MIN_CELL_WIDTH);
    }

    /// Grid coordinate under a terminal position.
    pub fn screen_to_grid(&self, x: u16, y: u16) -> (isize, isize) {
        screen_to_grid(
            (x, y),
            (self.offset_col, self.offset_row),
            (self.cell_width, self.cell_height),
        )
    }

    /// Top-left terminal position of a grid cell, if it is on screen.
    pub fn grid_to_screen(&self, row: usize, col: usize) -> Option<(i32, i32)> {
        let c = col as isize - self.offset_col;
        let r = row as isize - self.offset_row;
        if c < 0 || r < 0 {
            return None;
        }
        Some((
            (c * self.cell_width as isize) as i32,
            (r * self.cell_height as isize) as i32,
        ))
    }

    /// Grid cells that fit in a `width` x `height` terminal area.
    pub fn visible_cells(&self, width: u16, height: u16) -> (usize, usize) {
        (
            (width / self.cell_width.max(1)) as usize,
            (height / self.cell_height.max(1)) as usize,
        )
    }

    /// Pans so the grid center sits in the middle of the area.
    pub fn center_on(&mut self, grid_width: usize, grid_height: usize, width: u16, height: u16) {
        let (cols, rows) = self.visible_cells(width, height);
        self.offset_col = (grid_width as isize - cols as isize) / 2;
        self.offset_row = (grid_height as isize - rows as isize) / 2;
    }
}

/// Device position, pan offset and cell size to a (row, col) grid coordinate.
///
/// The result may lie outside the grid; callers pass it straight to the
/// core, which clips.
pub fn screen_to_grid(
    (x, y): (u16, u16),
    (offset_col, offset_row): (isize, isize),
    (cell_width, cell_height): (u16, u16),
) -> (isize, isize) {
    let col = offset_col + (x / cell_width.max(1)) as isize;
    let row = offset_row + (y / cell_height.max(1)) as isize;
    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_through_cell_width() {
        assert_eq!(screen_to_grid((0, 0), (0, 0), (2, 1)), (0, 0));
        assert_eq!(screen_to_grid((5, 3), (0, 0), (2, 1)), (3, 2));
        assert_eq!(screen_to_grid((5, 3), (10, -4), (2, 1)), (-1, 12));
    }

    #[test]
    fn roundtrips_visible_cells() {
        let mut view = View::new(3);
        view.pan(4, 2);
        let (x, y) = view.grid_to_screen(7, 9).unwrap();
        assert_eq!(view.screen_to_grid(x as u16, y as u16), (7, 9));
        assert_eq!(view.grid_to_screen(1, 9), None);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut view = View::new(9);
        assert_eq!(view.cell_width, MAX_CELL_WIDTH);
        view.zoom_in();
        assert_eq!(view.cell_width, MAX_CELL_WIDTH);
        for _ in 0..10 {
            view.zoom_out();
        }
        assert_eq!(view.cell_width, MIN_CELL_WIDTH);
    }

    #[test]
    fn centers_small_and_large_grids() {
        let mut view = View::new(2);
        view.center_on(100, 60, 80, 20);
        assert_eq!((view.offset_col, view.offset_row), (30, 20));
        view.center_on(10, 4, 80, 20);
        assert_eq!((view.offset_col, view.offset_row), (-15, -8));
    }
}
