pub mod config;
mod simulation;

pub use config::{Overrides, Settings};
pub use simulation::{RunSummary, Simulation};
