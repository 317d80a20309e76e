//! Session state: the live grid, statistics, playback and edit history.
//!
//! Every grid-mutating user action records one history snapshot of the grid
//! as it was before the action, unless it matches the current snapshot.
//! Generations are not recorded, so
//! undo first commits the live grid if it has drifted from the snapshot under
//! the cursor; that keeps redo able to return to where the user was.

use super::codec;
use super::error::{GridError, PersistError};
use super::grid::{Boundary, Grid};
use super::history::History;
use super::patterns::{self, library, Pattern};
use super::rules;
use super::stats::Statistics;
use crate::config::{SandboxConfig, DEFAULT_DENSITY};
use crate::theme::{self, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Slowest playback rate, in generations per second.
pub const MIN_SPEED: u32 = 1;
/// Fastest playback rate, in generations per second.
pub const MAX_SPEED: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Paused,
    Running,
}

/// What a pointer stroke writes into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Draw,
    Erase,
}

impl DrawMode {
    fn value(self) -> bool {
        self == DrawMode::Draw
    }
}

/// User actions that the input layer can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Step,
    Clear,
    Random,
    Save,
    Load,
    Undo,
    Redo,
    SelectTheme(String),
    SelectPattern(String),
    CancelPattern,
    RotatePattern,
    FlipPattern,
    SpeedUp,
    SpeedDown,
    ToggleDrawMode,
}

pub struct Session {
    grid: Grid,
    stats: Statistics,
    history: History,
    playback: Playback,
    speed: u32,
    density: f64,
    draw_mode: DrawMode,
    selected: Option<Pattern>,
    theme: &'static Theme,
    save_path: PathBuf,
    rng: StdRng,
    stroke_active: bool,
    last_step: Option<Instant>,
    started: Instant,
}

impl Session {
    pub fn new(config: &SandboxConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.width, config.height, config.boundary)?;
        let mut history = History::new(config.history);
        history.record(&grid);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let theme = theme::lookup(&config.theme).unwrap_or_else(theme::default_theme);

        Ok(Self {
            grid,
            stats: Statistics::default(),
            history,
            playback: Playback::Paused,
            speed: config.speed.clamp(MIN_SPEED, MAX_SPEED),
            density: config.valid_density().unwrap_or(DEFAULT_DENSITY),
            draw_mode: DrawMode::Draw,
            selected: None,
            theme,
            save_path: config.save_path.clone(),
            rng,
            stroke_active: false,
            last_step: None,
            started: Instant::now(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_running(&self) -> bool {
        self.playback == Playback::Running
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selected.as_ref()
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    pub fn boundary(&self) -> Boundary {
        self.grid.boundary()
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Dispatches one user command. Only saving and loading can fail.
    pub fn apply(&mut self, command: Command) -> Result<(), PersistError> {
        match command {
            Command::PlayPause => self.toggle_playback(),
            Command::Step => self.step(),
            Command::Clear => self.clear(),
            Command::Random => self.random_fill(),
            Command::Save => {
                let path = self.save_path.clone();
                self.save_to(&path)?;
            }
            Command::Load => {
                let path = self.save_path.clone();
                self.load_from(&path)?;
            }
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::SelectTheme(name) => {
                self.select_theme(&name);
            }
            Command::SelectPattern(name) => {
                self.select_pattern(&name);
            }
            Command::CancelPattern => self.selected = None,
            Command::RotatePattern => self.transform_selection(Pattern::rotate90),
            Command::FlipPattern => self.transform_selection(Pattern::flip_horizontal),
            Command::SpeedUp => self.set_speed(self.speed.saturating_add(1)),
            Command::SpeedDown => self.set_speed(self.speed.saturating_sub(1)),
            Command::ToggleDrawMode => {
                self.draw_mode = match self.draw_mode {
                    DrawMode::Draw => DrawMode::Erase,
                    DrawMode::Erase => DrawMode::Draw,
                };
            }
        }
        Ok(())
    }

    // ---- playback ----

    pub fn toggle_playback(&mut self) {
        self.playback = match self.playback {
            Playback::Paused => {
                self.last_step = None;
                Playback::Running
            }
            Playback::Running => Playback::Paused,
        };
    }

    pub fn set_playback(&mut self, playback: Playback) {
        if playback != self.playback {
            self.toggle_playback();
        }
    }

    /// Sets the playback rate, clamped to [`MIN_SPEED`, `MAX_SPEED`].
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Minimum wall-clock time between automatic generations.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.speed as u64)
    }

    /// Advances runtime and, while running, steps at most once per interval.
    ///
    /// Returns true if a generation was computed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.stats.runtime = now.saturating_duration_since(self.started);
        if self.playback != Playback::Running {
            return false;
        }
        let due = self
            .last_step
            .map_or(true, |last| now.saturating_duration_since(last) >= self.step_interval());
        if due {
            self.step();
            self.last_step = Some(now);
        }
        due
    }

    /// Computes one generation and folds it into the statistics.
    pub fn step(&mut self) {
        let outcome = rules::step(&self.grid);
        self.stats
            .record_step(outcome.births, outcome.deaths, outcome.grid.population());
        self.grid = outcome.grid;
    }

    // ---- editing ----

    fn install(&mut self, grid: Grid) {
        self.grid = grid;
        self.stats.observe_population(self.grid.population());
    }

    /// Starts a draw/erase gesture, recording history once for the whole stroke.
    pub fn begin_stroke(&mut self) {
        if !self.stroke_active {
            self.history.record(&self.grid);
            self.stroke_active = true;
        }
    }

    /// Writes the draw-mode value into one cell, opening a stroke if needed.
    pub fn draw_on_grid(&mut self, row: usize, col: usize) -> bool {
        if row >= self.grid.height() || col >= self.grid.width() {
            return false;
        }
        self.begin_stroke();
        self.grid.set(row, col, self.draw_mode.value());
        self.stats.observe_population(self.grid.population());
        true
    }

    pub fn end_stroke(&mut self) {
        self.stroke_active = false;
    }

    pub fn stroke_active(&self) -> bool {
        self.stroke_active
    }

    /// Flips a single cell as its own undoable action.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        if row >= self.grid.height() || col >= self.grid.width() {
            return false;
        }
        self.history.record(&self.grid);
        self.grid.toggle(row, col);
        self.stats.observe_population(self.grid.population());
        true
    }

    /// Stamps `pattern` with its top-left at the anchor. Returns cells written.
    ///
    /// A pattern that would land entirely off the grid is ignored without
    /// touching history.
    pub fn place_pattern(&mut self, pattern: &Pattern, anchor_row: isize, anchor_col: isize) -> usize {
        let lands = pattern
            .live_cells()
            .any(|(r, c)| self.grid.contains(anchor_row + r as isize, anchor_col + c as isize));
        if !lands {
            return 0;
        }
        self.history.record(&self.grid);
        let written = patterns::place(&mut self.grid, pattern, anchor_row, anchor_col);
        self.stats.observe_population(self.grid.population());
        log::debug!(
            "placed {} at ({}, {}), {} cells",
            pattern.name(),
            anchor_row,
            anchor_col,
            written
        );
        written
    }

    /// Stamps the active pattern centered on (row, col) and drops the selection.
    pub fn place_selected(&mut self, row: isize, col: isize) -> usize {
        let Some(pattern) = self.selected.take() else {
            return 0;
        };
        let (anchor_row, anchor_col) = pattern.centered_anchor(row, col);
        self.place_pattern(&pattern, anchor_row, anchor_col)
    }

    /// Makes a library pattern the active selection.
    pub fn select_pattern(&mut self, name: &str) -> bool {
        match library::lookup(name) {
            Some(pattern) => {
                self.selected = Some(pattern);
                true
            }
            None => {
                log::warn!("unknown pattern: {}", name);
                false
            }
        }
    }

    /// Makes an arbitrary pattern the active selection.
    pub fn select_custom_pattern(&mut self, pattern: Pattern) {
        self.selected = Some(pattern);
    }

    fn transform_selection(&mut self, transform: fn(&Pattern) -> Pattern) {
        if let Some(pattern) = &self.selected {
            self.selected = Some(transform(pattern));
        }
    }

    /// Refills the grid with Bernoulli draws at the configured density.
    pub fn random_fill(&mut self) {
        let density = self.density;
        self.random_fill_with(density);
    }

    pub fn random_fill_with(&mut self, density: f64) {
        self.history.record(&self.grid);
        self.grid.fill_random(&mut self.rng, density);
        self.stats.observe_population(self.grid.population());
    }

    /// Kills every cell and resets statistics and runtime.
    pub fn clear(&mut self) {
        self.history.record(&self.grid);
        self.grid.clear();
        self.stats.reset();
        self.started = Instant::now();
    }

    // ---- history ----

    /// Restores the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        self.stroke_active = false;
        // Recording an unchanged grid would drop the redo branch
        if self.history.current() != Some(&self.grid) {
            self.history.record(&self.grid);
        }
        match self.history.undo() {
            Some(grid) => {
                self.install(grid);
                true
            }
            None => false,
        }
    }

    /// Re-applies the next snapshot. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        self.stroke_active = false;
        match self.history.redo() {
            Some(grid) => {
                self.install(grid);
                true
            }
            None => false,
        }
    }

    // ---- themes ----

    pub fn select_theme(&mut self, name: &str) -> bool {
        match theme::lookup(name) {
            Some(theme) => {
                self.theme = theme;
                true
            }
            None => {
                log::warn!("unknown theme: {}", name);
                false
            }
        }
    }

    /// Advances to the next theme in the registry.
    pub fn cycle_theme(&mut self) {
        self.theme = theme::next(self.theme);
    }

    // ---- persistence ----

    pub fn save_to(&self, path: &Path) -> Result<(), PersistError> {
        codec::save_file(path, &self.grid, &self.stats)?;
        log::info!("saved generation {} to {}", self.stats.generation, path.display());
        Ok(())
    }

    /// Loads a save file. On any error the session is left untouched.
    ///
    /// A stored grid of another size is copied over the overlapping region of
    /// a zeroed grid with this session's dimensions.
    pub fn load_from(&mut self, path: &Path) -> Result<(), PersistError> {
        let (loaded, stats) = codec::load_file(path, self.grid.boundary())?;
        let (width, height) = (self.grid.width(), self.grid.height());
        let loaded = if (loaded.width(), loaded.height()) == (width, height) {
            loaded
        } else {
            log::info!(
                "resizing loaded {}x{} grid to {}x{}",
                loaded.width(),
                loaded.height(),
                width,
                height
            );
            let mut fitted = self.grid.clone();
            fitted.clear();
            fitted.copy_overlap(&loaded);
            fitted
        };

        self.history.record(&self.grid);
        self.stats = Statistics {
            runtime: self.stats.runtime,
            ..stats
        };
        self.install(loaded);
        self.stats.max_population = self.stats.max_population.max(self.stats.population);
        log::info!("loaded generation {} from {}", self.stats.generation, path.display());
        Ok(())
    }
}
