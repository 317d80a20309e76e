//! JSON save format for a grid and its cumulative statistics.
//!
//! ```json
//! {"grid": [[0, 1, 0], [0, 0, 1]],
//!  "stats": {"generation": 12, "population": 2, "max_population": 9,
//!            "total_births": 30, "total_deaths": 35}}
//! ```
//!
//! There is no version field. Every stats field is optional and defaults to
//! zero; older saves that carry a bare top-level `generation` are accepted too.

use super::error::{DecodeError, PersistError};
use super::grid::{Boundary, Grid};
use super::stats::Statistics;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    grid: Vec<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stats: Option<SavedStats>,
    #[serde(default, skip_serializing)]
    generation: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedStats {
    #[serde(default)]
    generation: u64,
    #[serde(default)]
    population: usize,
    #[serde(default)]
    max_population: usize,
    #[serde(default)]
    total_births: u64,
    #[serde(default)]
    total_deaths: u64,
}

/// Encodes the grid as nested 0/1 arrays plus the cumulative statistics.
pub fn serialize(grid: &Grid, stats: &Statistics) -> Result<String, serde_json::Error> {
    let file = SaveFile {
        grid: grid
            .rows()
            .map(|row| row.iter().map(|&alive| alive as u64).collect())
            .collect(),
        stats: Some(SavedStats {
            generation: stats.generation,
            population: stats.population,
            max_population: stats.max_population,
            total_births: stats.total_births,
            total_deaths: stats.total_deaths,
        }),
        generation: None,
    };
    serde_json::to_string(&file)
}

/// Decodes a save blob. The grid keeps whatever size was stored.
///
/// Per-step births/deaths and runtime are not persisted and come back as zero.
pub fn deserialize(blob: &str, boundary: Boundary) -> Result<(Grid, Statistics), DecodeError> {
    decode(serde_json::from_str(blob)?, boundary)
}

fn decode(file: SaveFile, boundary: Boundary) -> Result<(Grid, Statistics), DecodeError> {
    let width = file.grid.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(DecodeError::EmptyGrid);
    }
    let mut grid = Grid::new(width, file.grid.len(), boundary).map_err(|_| DecodeError::EmptyGrid)?;
    for (r, row) in file.grid.iter().enumerate() {
        if row.len() != width {
            return Err(DecodeError::Ragged { row: r, expected: width, found: row.len() });
        }
        for (c, &value) in row.iter().enumerate() {
            match value {
                0 => {}
                1 => {
                    grid.set(r, c, true);
                }
                value => return Err(DecodeError::InvalidCell { row: r, col: c, value }),
            }
        }
    }

    let saved = match (file.stats, file.generation) {
        (Some(stats), _) => stats,
        (None, generation) => SavedStats {
            generation: generation.unwrap_or(0),
            ..Default::default()
        },
    };
    let stats = Statistics {
        generation: saved.generation,
        population: saved.population,
        max_population: saved.max_population,
        total_births: saved.total_births,
        total_deaths: saved.total_deaths,
        ..Default::default()
    };
    Ok((grid, stats))
}

/// Writes the encoded state to `path`.
pub fn save_file(path: &Path, grid: &Grid, stats: &Statistics) -> Result<(), PersistError> {
    let blob = serialize(grid, stats).map_err(PersistError::Encode)?;
    fs::write(path, blob).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and decodes `path`. Nothing is returned unless the whole file decodes.
///
/// Bytes that are not UTF-8 are a decode error, not an I/O error.
pub fn load_file(path: &Path, boundary: Boundary) -> Result<(Grid, Statistics), PersistError> {
    let bytes = fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SaveFile = serde_json::from_slice(&bytes).map_err(DecodeError::from)?;
    Ok(decode(file, boundary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::NamedTempFile;

    fn sample() -> (Grid, Statistics) {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(7, 4, Boundary::Clamped).unwrap();
        grid.fill_random(&mut rng, 0.4);
        let stats = Statistics {
            generation: 17,
            population: grid.population(),
            max_population: 21,
            total_births: 80,
            total_deaths: 75,
            ..Default::default()
        };
        (grid, stats)
    }

    #[test]
    fn roundtrip_preserves_cells_and_counters() {
        let (grid, stats) = sample();
        let blob = serialize(&grid, &stats).unwrap();
        let (loaded, loaded_stats) = deserialize(&blob, Boundary::Clamped).unwrap();
        assert_eq!(loaded, grid);
        assert_eq!(loaded_stats, stats);
    }

    #[test]
    fn writes_nested_zero_one_arrays() {
        let mut grid = Grid::new(3, 2, Boundary::Clamped).unwrap();
        grid.set(0, 1, true);
        grid.set(1, 2, true);
        let blob = serialize(&grid, &Statistics::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["grid"], serde_json::json!([[0, 1, 0], [0, 0, 1]]));
        assert_eq!(value["stats"]["generation"], 0);
        assert!(value.get("generation").is_none());
    }

    #[test]
    fn missing_stats_default_to_zero() {
        let (grid, stats) = deserialize(r#"{"grid": [[1, 1], [0, 1]]}"#, Boundary::Toroidal).unwrap();
        assert_eq!(grid.population(), 3);
        assert_eq!(grid.boundary(), Boundary::Toroidal);
        assert_eq!(stats, Statistics::default());

        let (_, stats) = deserialize(r#"{"grid": [[1]], "stats": {"generation": 4}}"#, Boundary::Clamped).unwrap();
        assert_eq!(stats.generation, 4);
        assert_eq!(stats.total_births, 0);
    }

    #[test]
    fn legacy_top_level_generation() {
        let (_, stats) = deserialize(r#"{"grid": [[0, 1]], "generation": 9}"#, Boundary::Clamped).unwrap();
        assert_eq!(stats.generation, 9);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(deserialize("not json", Boundary::Clamped), Err(DecodeError::Json(_))));
        assert!(matches!(
            deserialize(r#"{"grid": "rows"}"#, Boundary::Clamped),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            deserialize(r#"{"grid": [[0, 1]], "stats": {"generation": "ten"}}"#, Boundary::Clamped),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(deserialize(r#"{"grid": []}"#, Boundary::Clamped), Err(DecodeError::EmptyGrid)));
        assert!(matches!(deserialize(r#"{"grid": [[]]}"#, Boundary::Clamped), Err(DecodeError::EmptyGrid)));
        assert!(matches!(
            deserialize(r#"{"grid": [[0, 1], [1]]}"#, Boundary::Clamped),
            Err(DecodeError::Ragged { row: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(
            deserialize(r#"{"grid": [[0, 2]]}"#, Boundary::Clamped),
            Err(DecodeError::InvalidCell { row: 0, col: 1, value: 2 })
        ));
    }

    #[test]
    fn file_roundtrip() {
        let (grid, stats) = sample();
        let file = NamedTempFile::with_suffix(".json").unwrap();
        save_file(file.path(), &grid, &stats).unwrap();
        let (loaded, loaded_stats) = load_file(file.path(), Boundary::Clamped).unwrap();
        assert_eq!(loaded, grid);
        assert_eq!(loaded_stats, stats);
    }

    #[test]
    fn binary_garbage_is_a_decode_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0xff, 0xfe, 0x00, 0x7b]).unwrap();
        assert!(matches!(
            load_file(file.path(), Boundary::Clamped),
            Err(PersistError::Decode(DecodeError::Json(_)))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.json");
        match load_file(&path, Boundary::Clamped) {
            Err(PersistError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
