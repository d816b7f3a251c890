use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use super::Settings;
use crate::domain::Grid;
use crate::error::LifeResult;
use crate::rendering::{render_frame, DisplaySurface, Glyphs};

/// Simulation drives the automaton: it owns the current grid and threads
/// it from one generation to the next.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub grid: Grid,
    pub generation: u64,
    pub interval: Duration,
    pub max_generations: Option<u64>,
    pub glyphs: Glyphs,
}

/// What a bounded run ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of steps taken
    pub generations: u64,
    /// Live cells in the grid after the last step
    pub population: usize,
}

impl Simulation {
    /// Start from an existing grid at generation 0
    pub fn new(grid: Grid, settings: &Settings) -> Self {
        Self {
            grid,
            generation: 0,
            interval: settings.interval(),
            max_generations: settings.max_generations,
            glyphs: settings.glyphs(),
        }
    }

    /// Validate the settings and seed a random grid from `rng`
    pub fn seeded<R: Rng>(settings: &Settings, rng: &mut R) -> LifeResult<Self> {
        settings.validate()?;
        let grid = Grid::random(settings.width, settings.height, settings.density, rng)?;
        info!(
            "seeded {}x{} grid at density {} ({} alive)",
            settings.width,
            settings.height,
            settings.density,
            grid.population()
        );
        Ok(Self::new(grid, settings))
    }

    /// Set the generation bound (builder pattern)
    pub fn with_max_generations(mut self, max_generations: Option<u64>) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Advance one generation
    pub fn tick(mut self) -> Self {
        self.grid = self.grid.step();
        self.generation += 1;
        self
    }

    /// Current grid as text
    pub fn frame(&self) -> String {
        render_frame(&self.grid, self.glyphs)
    }

    fn finished(&self) -> bool {
        self.max_generations
            .is_some_and(|max| self.generation >= max)
    }

    /// Clear, render, step, wait; repeated until the generation bound is
    /// reached. Without a bound this only returns on a surface error.
    pub fn run<S, F>(mut self, surface: &mut S, mut wait: F) -> LifeResult<RunSummary>
    where
        S: DisplaySurface + ?Sized,
        F: FnMut(Duration),
    {
        let mut extinct = false;

        while !self.finished() {
            surface.clear()?;
            surface.render(&self.frame())?;

            debug!("generation {}: {} alive", self.generation, self.grid.population());
            if !extinct && self.grid.is_extinct() {
                info!("population died out at generation {}", self.generation);
                extinct = true;
            }

            self = self.tick();
            wait(self.interval);
        }

        Ok(RunSummary {
            generations: self.generation,
            population: self.grid.population(),
        })
    }
}
