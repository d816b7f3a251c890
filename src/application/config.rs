use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{check_density, check_dimensions};
use crate::error::LifeResult;
use crate::rendering::{Glyphs, ALIVE_GLYPH, DEAD_GLYPH};

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_HEIGHT: usize = 30;
pub const DEFAULT_DENSITY: f64 = 0.2;
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Settings for one run. Loaded from an optional TOML file where every
/// key may be omitted; command-line flags are layered on top with
/// [`Settings::with_overrides`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    /// Probability that a cell starts alive
    pub density: f64,
    /// Pause between frames, in milliseconds. Zero means no pause.
    pub interval_ms: u64,
    /// Stop after this many frames; run until interrupted when unset
    pub max_generations: Option<u64>,
    /// Seed for the initial grid; OS entropy when unset
    pub seed: Option<u64>,
    pub alive_glyph: char,
    pub dead_glyph: char,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            density: DEFAULT_DENSITY,
            interval_ms: DEFAULT_INTERVAL_MS,
            max_generations: None,
            seed: None,
            alive_glyph: ALIVE_GLYPH,
            dead_glyph: DEAD_GLYPH,
        }
    }
}

/// Values given on the command line. `None` keeps the current setting.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub density: Option<f64>,
    pub interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> LifeResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> LifeResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(density) = overrides.density {
            self.density = density;
        }
        if let Some(interval_ms) = overrides.interval_ms {
            self.interval_ms = interval_ms;
        }
        if overrides.max_generations.is_some() {
            self.max_generations = overrides.max_generations;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }

    /// Reject settings the grid cannot be built from
    pub fn validate(&self) -> LifeResult<()> {
        check_dimensions(self.width, self.height)?;
        check_density(self.density)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            alive: self.alive_glyph,
            dead: self.dead_glyph,
        }
    }
}
