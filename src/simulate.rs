//! Headless runs: seed a session, advance it, print the result.

use crate::config::{Seed, SimulateConfig};
use crate::sim::{library, Grid, GridError, Pattern, PatternError, PersistError, Session, Statistics};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("unknown pattern: {0} (available: {1})")]
    UnknownPattern(String, String),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Fills a fresh session according to `seed`. Patterns land centered.
pub fn seed_session(session: &mut Session, seed: &Seed) -> Result<(), SimulateError> {
    match seed {
        Seed::Empty => {}
        Seed::Random => session.random_fill(),
        Seed::Pattern(name) => {
            let pattern = library::lookup(name).ok_or_else(|| {
                SimulateError::UnknownPattern(name.clone(), library::names().collect::<Vec<_>>().join(", "))
            })?;
            place_centered(session, &pattern);
        }
        Seed::PatternFile(path) => {
            let text = fs::read_to_string(path).map_err(|source| SimulateError::Io {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string());
            let pattern = Pattern::from_plaintext(&name, "", &text)?;
            place_centered(session, &pattern);
        }
        Seed::SaveFile(path) => session.load_from(path)?,
    }
    Ok(())
}

fn place_centered(session: &mut Session, pattern: &Pattern) {
    let grid = session.grid();
    let (row, col) = pattern.centered_anchor((grid.height() / 2) as isize, (grid.width() / 2) as isize);
    session.place_pattern(pattern, row, col);
}

/// One line per row, `O` for live cells and `.` for dead ones.
pub fn to_plaintext(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        out.extend(row.iter().map(|&alive| if alive { 'O' } else { '.' }));
        out.push('\n');
    }
    out
}

pub fn summary(stats: &Statistics, grid: &Grid) -> String {
    format!(
        "generation: {}\npopulation: {}\nmax population: {}\nbirths: {} (total {})\ndeaths: {} (total {})\ndensity: {:.1}%",
        stats.generation,
        stats.population,
        stats.max_population,
        stats.births,
        stats.total_births,
        stats.deaths,
        stats.total_deaths,
        stats.density(grid.width() * grid.height()),
    )
}

/// Builds, seeds and advances a session without a terminal.
pub fn simulate(config: &SimulateConfig) -> Result<Session, SimulateError> {
    let mut session = Session::new(&config.sandbox)?;
    seed_session(&mut session, &config.seed)?;
    for _ in 0..config.generations {
        session.step();
    }
    session.tick(Instant::now());
    Ok(session)
}

pub fn run(config: SimulateConfig) -> Result<(), SimulateError> {
    let session = simulate(&config)?;
    log::info!(
        "simulated {} generations on {}x{} {}",
        config.generations,
        session.grid().width(),
        session.grid().height(),
        session.boundary().name()
    );

    if config.print {
        print!("{}", to_plaintext(session.grid()));
    }
    println!("{}", summary(session.stats(), session.grid()));

    if let Some(path) = &config.output {
        session.save_to(path)?;
        println!("saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;
    use crate::sim::Boundary;
    use tempfile::tempdir;

    fn config(seed: Seed, generations: u64) -> SimulateConfig {
        SimulateConfig {
            sandbox: SandboxConfig {
                width: 5,
                height: 5,
                seed: Some(11),
                ..SandboxConfig::default()
            },
            seed,
            generations,
            print: true,
            output: None,
        }
    }

    #[test]
    fn blinker_flips_after_one_generation() {
        let session = simulate(&config(Seed::Pattern("blinker".into()), 1)).unwrap();
        assert_eq!(
            to_plaintext(session.grid()),
            ".....\n..O..\n..O..\n..O..\n.....\n"
        );
        assert_eq!(session.stats().generation, 1);
    }

    #[test]
    fn unknown_pattern_lists_library() {
        let err = simulate(&config(Seed::Pattern("spaceship".into()), 1)).err().unwrap();
        let message = err.to_string();
        assert!(message.contains("spaceship"));
        assert!(message.contains("Glider"));
    }

    #[test]
    fn pattern_file_is_centered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.cells");
        fs::write(&path, "!Name: Block\nOO\nOO\n").unwrap();

        let session = simulate(&config(Seed::PatternFile(path), 3)).unwrap();
        let live: Vec<_> = session.grid().live_cells().collect();
        assert_eq!(live, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn save_file_seed_and_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        fs::write(&input, r#"{"grid": [[0,0,0],[1,1,1],[0,0,0]], "stats": {"generation": 7}}"#).unwrap();

        let mut cfg = config(Seed::SaveFile(input), 2);
        cfg.output = Some(dir.path().join("out.json"));
        run(cfg).unwrap();

        let (grid, stats) = crate::sim::codec::load_file(&dir.path().join("out.json"), Boundary::Clamped).unwrap();
        assert_eq!(stats.generation, 9);
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn empty_seed_stays_empty() {
        let session = simulate(&config(Seed::Empty, 5)).unwrap();
        assert_eq!(session.grid().population(), 0);
        assert!(summary(session.stats(), session.grid()).contains("generation: 5"));
    }
}
