//! Pattern masks, their transforms, and stamping onto a grid.
//!
//! A pattern is an immutable rectangular mask that knows nothing about the
//! grid it will be stamped on; bounds only matter at placement time.
//! Rotation is always clockwise.

use super::error::PatternError;
use super::grid::Grid;

/// Named immutable cell mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    description: String,
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Builds a pattern from rows of cells. Rows must be non-empty and equally long.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rows: Vec<Vec<bool>>,
    ) -> Result<Self, PatternError> {
        let name = name.into();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(PatternError::Empty(name));
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(PatternError::Ragged { row, expected: width, found });
        }

        Ok(Self {
            name,
            description: description.into(),
            width,
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parses plaintext cell art.
    ///
    /// `O`, `o`, `*`, `#` and `1` are alive; `.` and `0` are dead. Lines
    /// starting with `!` are comments. Short rows are padded with dead cells.
    pub fn from_plaintext(
        name: impl Into<String>,
        description: impl Into<String>,
        text: &str,
    ) -> Result<Self, PatternError> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.starts_with('!') {
                continue;
            }
            let row = line
                .chars()
                .map(|glyph| match glyph {
                    'O' | 'o' | '*' | '#' | '1' => Ok(true),
                    '.' | '0' => Ok(false),
                    _ => Err(PatternError::UnknownGlyph { glyph, line: i + 1 }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, false);
        }
        Self::new(name, description, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Mask value at (row, col); out-of-range reads as dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Offsets of live cells relative to the top-left corner.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(i, _)| (i / width, i % width))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn remapped(&self, width: usize, height: usize, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let cells = (0..height)
            .flat_map(|r| (0..width).map(move |c| (r, c)))
            .map(|(r, c)| {
                let (sr, sc) = source(r, c);
                self.cells[sr * self.width + sc]
            })
            .collect();
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            width,
            height,
            cells,
        }
    }

    /// Rotates 90° clockwise; a height×width mask becomes width×height.
    pub fn rotate90(&self) -> Self {
        let h = self.height;
        self.remapped(self.height, self.width, |r, c| (h - 1 - c, r))
    }

    /// Mirrors columns left to right.
    pub fn flip_horizontal(&self) -> Self {
        let w = self.width;
        self.remapped(self.width, self.height, |r, c| (r, w - 1 - c))
    }

    /// Mirrors rows top to bottom.
    pub fn flip_vertical(&self) -> Self {
        let h = self.height;
        self.remapped(self.width, self.height, |r, c| (h - 1 - r, c))
    }

    /// Anchor that centers the pattern on (row, col).
    pub fn centered_anchor(&self, row: isize, col: isize) -> (isize, isize) {
        (row - (self.height / 2) as isize, col - (self.width / 2) as isize)
    }
}

/// Stamps the live cells of `pattern` onto `grid` with its top-left at the anchor.
///
/// Only live cells are written, so dead mask cells leave the grid as it was.
/// Cells landing outside the grid are dropped, never wrapped. Returns the
/// number of cells written.
pub fn place(grid: &mut Grid, pattern: &Pattern, anchor_row: isize, anchor_col: isize) -> usize {
    let mut written = 0;
    for (dr, dc) in pattern.live_cells() {
        let row = anchor_row + dr as isize;
        let col = anchor_col + dc as isize;
        if grid.contains(row, col) && grid.set(row as usize, col as usize, true) {
            written += 1;
        }
    }
    written
}

/// Built-in pattern registry.
pub mod library {
    use super::Pattern;
    use std::sync::OnceLock;

    struct Entry {
        name: &'static str,
        description: &'static str,
        rows: &'static [&'static str],
    }

    const ENTRIES: &[Entry] = &[
        Entry {
            name: "Glider",
            description: "A small spaceship that moves diagonally",
            rows: &[".O.", "..O", "OOO"],
        },
        Entry {
            name: "Gosper Gun",
            description: "Famous pattern that generates gliders",
            rows: &[
                "........................O...........",
                "......................O.O...........",
                "............OO......OO............OO",
                "...........O...O....OO............OO",
                "OO........O.....O...OO..............",
                "OO........O...O.OO....O.O...........",
                "..........O.....O.......O...........",
                "...........O...O....................",
                "............OO......................",
            ],
        },
        Entry {
            name: "Pulsar",
            description: "Oscillator with period 3",
            rows: &[
                "..OOO...OOO..",
                ".............",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                "..OOO...OOO..",
                ".............",
                "..OOO...OOO..",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                ".............",
                "..OOO...OOO..",
            ],
        },
        Entry {
            name: "Beacon",
            description: "Simple period-2 oscillator",
            rows: &["OO..", "OO..", "..OO", "..OO"],
        },
        Entry {
            name: "Toad",
            description: "Period-2 oscillator",
            rows: &[".OOO", "OOO."],
        },
        Entry {
            name: "Blinker",
            description: "Simplest oscillator",
            rows: &["OOO"],
        },
        Entry {
            name: "R-pentomino",
            description: "Famous methuselah pattern",
            rows: &[".OO", "OO.", ".O."],
        },
        Entry {
            name: "Acorn",
            description: "Long-lived methuselah pattern",
            rows: &[".O.....", "...O...", "OO..OOO"],
        },
        Entry {
            name: "LWSS",
            description: "Lightweight spaceship that moves horizontally",
            rows: &["O..O.", "....O", "O...O", ".OOOO"],
        },
    ];

    /// Every built-in pattern, in menu order.
    pub fn all() -> &'static [Pattern] {
        static LIBRARY: OnceLock<Vec<Pattern>> = OnceLock::new();
        LIBRARY.get_or_init(|| {
            ENTRIES
                .iter()
                .filter_map(|entry| {
                    let text = entry.rows.join("\n");
                    match Pattern::from_plaintext(entry.name, entry.description, &text) {
                        Ok(pattern) => Some(pattern),
                        Err(e) => {
                            log::error!("built-in pattern {} is malformed: {}", entry.name, e);
                            None
                        }
                    }
                })
                .collect()
        })
    }

    /// Case-insensitive lookup; "Lightweight Spaceship" is accepted for LWSS.
    pub fn lookup(name: &str) -> Option<Pattern> {
        let wanted = match name.to_lowercase().as_str() {
            "lightweight spaceship" => "lwss".to_string(),
            "gosper glider gun" => "gosper gun".to_string(),
            other => other.to_string(),
        };
        all()
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
            .cloned()
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        all().iter().map(Pattern::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Boundary;

    fn rows_of(pattern: &Pattern) -> Vec<String> {
        (0..pattern.height())
            .map(|r| {
                (0..pattern.width())
                    .map(|c| if pattern.get(r, c) { 'O' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn new_rejects_bad_masks() {
        assert_eq!(
            Pattern::new("x", "", vec![]),
            Err(PatternError::Empty("x".into()))
        );
        assert_eq!(
            Pattern::new("x", "", vec![vec![true, false], vec![true]]),
            Err(PatternError::Ragged { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn plaintext_parsing() {
        let text = "!Name: sample\n.O\nOOO\n\n";
        let pattern = Pattern::from_plaintext("sample", "", text).unwrap();
        assert_eq!((pattern.height(), pattern.width()), (2, 3));
        assert_eq!(rows_of(&pattern), vec![".O.", "OOO"]);
        assert_eq!(pattern.population(), 4);

        let err = Pattern::from_plaintext("bad", "", "O.\n.x").unwrap_err();
        assert_eq!(err, PatternError::UnknownGlyph { glyph: 'x', line: 2 });
        assert!(Pattern::from_plaintext("blank", "", "!only a comment\n").is_err());
    }

    #[test]
    fn rotate_is_clockwise() {
        let glider = library::lookup("glider").unwrap();
        let turned = glider.rotate90();
        assert_eq!(rows_of(&turned), vec!["O..", "O.O", "OO."]);

        let lwss = library::lookup("LWSS").unwrap();
        let turned = lwss.rotate90();
        assert_eq!((turned.height(), turned.width()), (5, 4));
        assert_eq!(turned.population(), lwss.population());
    }

    #[test]
    fn four_rotations_are_identity() {
        for pattern in library::all() {
            let spun = pattern.rotate90().rotate90().rotate90().rotate90();
            assert_eq!(&spun, pattern, "{}", pattern.name());
        }
    }

    #[test]
    fn flips_mirror_the_mask() {
        let glider = library::lookup("Glider").unwrap();
        assert_eq!(rows_of(&glider.flip_horizontal()), vec![".O.", "O..", "OOO"]);
        assert_eq!(rows_of(&glider.flip_vertical()), vec!["OOO", "..O", ".O."]);
        assert_eq!(glider.flip_horizontal().flip_horizontal(), glider);
    }

    #[test]
    fn place_overlays_live_cells_only() {
        let mut grid = Grid::new(5, 5, Boundary::Clamped).unwrap();
        grid.set(0, 0, true);
        let glider = library::lookup("Glider").unwrap();

        let written = place(&mut grid, &glider, 0, 0);
        assert_eq!(written, 5);
        // Dead mask cell over a live grid cell leaves it alive.
        assert!(grid.get(0, 0));
        assert_eq!(grid.population(), 6);
    }

    #[test]
    fn place_clips_at_edges() {
        let mut grid = Grid::new(5, 5, Boundary::Toroidal).unwrap();
        let block = Pattern::from_plaintext("block", "", "OO\nOO").unwrap();

        assert_eq!(place(&mut grid, &block, 4, 4), 1);
        assert!(grid.get(4, 4));
        assert_eq!(place(&mut grid, &block, -1, -1), 1);
        assert!(grid.get(0, 0));
        // Clipping never wraps, even on a torus.
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn place_fully_outside_is_a_noop() {
        let mut grid = Grid::new(6, 4, Boundary::Clamped).unwrap();
        grid.set(1, 1, true);
        let before = grid.clone();
        let gun = library::lookup("Gosper Gun").unwrap();

        assert_eq!(place(&mut grid, &gun, 10, 10), 0);
        assert_eq!(place(&mut grid, &gun, -50, -50), 0);
        assert_eq!(place(&mut grid, &gun, 0, 6), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn centered_anchor_offsets_by_half_size() {
        let pulsar = library::lookup("pulsar").unwrap();
        assert_eq!(pulsar.centered_anchor(20, 20), (14, 14));
        let blinker = library::lookup("blinker").unwrap();
        assert_eq!(blinker.centered_anchor(0, 0), (0, -1));
    }

    #[test]
    fn library_is_complete() {
        let names: Vec<_> = library::names().collect();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"Gosper Gun"));
        assert_eq!(library::lookup("Lightweight Spaceship").unwrap().name(), "LWSS");
        assert!(library::lookup("unknown").is_none());
        for pattern in library::all() {
            assert!(!pattern.description().is_empty());
            assert!(pattern.population() > 0);
        }
    }
}
