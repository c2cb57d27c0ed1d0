use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Coordinate ({row}, {col}) is outside a {size}x{size} grid")]
    OutOfBounds { row: i64, col: i64, size: usize },

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Invalid threshold: {0} (must lie in [0, 1])")]
    InvalidThreshold(f64),

    #[error("Satisfaction matrix is {states}x{states} but grid is {grid}x{grid}")]
    SizeMismatch { grid: usize, states: usize },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
