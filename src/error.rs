use std::io;

/// Errors raised by grid construction, cell access and the display loop.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("density must be within [0, 1], got {density}")]
    InvalidDensity { density: f64 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type LifeResult<T> = Result<T, LifeError>;
