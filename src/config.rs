use crate::sim::Boundary;
use std::path::PathBuf;

/// Live probability used when none (or a non-finite one) is configured
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Configuration for an interactive or headless sandbox session
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub width: usize,
    pub height: usize,
    pub boundary: Boundary,
    pub speed: u32,     // Generations per second while running
    pub history: usize, // Undo snapshots kept
    pub density: f64,   // Live probability for random fill
    pub seed: Option<u64>,
    pub save_path: PathBuf,
    pub theme: String,
    pub cell_width: u16, // Terminal columns per cell
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 60,
            boundary: Boundary::Clamped,
            speed: 10,
            history: 50,
            density: DEFAULT_DENSITY,
            seed: None,
            save_path: PathBuf::from("saved_pattern.json"),
            theme: "Classic".to_string(),
            cell_width: 2,
        }
    }
}

impl SandboxConfig {
    /// The configured density clamped to [0, 1], or None if it is NaN or infinite
    pub fn valid_density(&self) -> Option<f64> {
        valid_density(self.density)
    }
}

pub fn valid_density(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

/// Where a headless run gets its starting grid
#[derive(Clone, Debug, PartialEq)]
pub enum Seed {
    Empty,
    Random,
    Pattern(String),      // Built-in pattern, centered
    PatternFile(PathBuf), // Plaintext .cells file, centered
    SaveFile(PathBuf),    // JSON save file
}

/// Configuration for `simulate`
#[derive(Clone, Debug)]
pub struct SimulateConfig {
    pub sandbox: SandboxConfig,
    pub seed: Seed,
    pub generations: u64,
    pub print: bool,
    pub output: Option<PathBuf>,
}
