use crate::config::{valid_density, SandboxConfig};
use crate::sim::Boundary;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub boundary: Option<String>,    // "clamped" or "toroidal"
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionSettings {
    pub speed: Option<u32>,
    pub history: Option<usize>,
    pub density: Option<f64>,
    pub save_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub theme: Option<String>,
    pub cell_width: Option<u16>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings text, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid settings: {}", e);
            Self::default()
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifesandbox")
            .join("config.toml")
    }

    /// Layer these settings over `config`
    pub fn apply(&self, config: &mut SandboxConfig) {
        if let Some(width) = self.grid.width.filter(|&w| w > 0) {
            config.width = width;
        }
        if let Some(height) = self.grid.height.filter(|&h| h > 0) {
            config.height = height;
        }
        if let Some(name) = &self.grid.boundary {
            match Boundary::from_name(name) {
                Some(boundary) => config.boundary = boundary,
                None => log::warn!("unknown boundary in settings: {}", name),
            }
        }
        if let Some(speed) = self.session.speed {
            config.speed = speed;
        }
        if let Some(history) = self.session.history {
            config.history = history;
        }
        if let Some(density) = self.session.density {
            match valid_density(density) {
                Some(density) => config.density = density,
                None => log::warn!("ignoring non-finite density in settings: {}", density),
            }
        }
        if let Some(path) = &self.session.save_file {
            config.save_path = path.clone();
        }
        if let Some(theme) = &self.display.theme {
            config.theme = theme.clone();
        }
        if let Some(cell_width) = self.display.cell_width {
            config.cell_width = cell_width.clamp(1, 4);
        }
    }
}
