// Domain layer - grid, cells and the generation rule
pub mod domain;

// Application layer - settings and the render/step/wait loop
pub mod application;

// Infrastructure layer - text frames and display surfaces
pub mod rendering;

pub mod error;

// Re-exports for convenience
pub use domain::{Cell, Grid};
pub use application::{Overrides, RunSummary, Settings, Simulation};
pub use error::{LifeError, LifeResult};
pub use rendering::{render_frame, DisplaySurface, Glyphs, RecordingSurface, TerminalSurface};
