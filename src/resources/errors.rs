use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("no active route")]
    NoActivePlan,
    #[error("invalid hold definition: {0}")]
    InvalidHoldDefinition(String),
    #[error("auto zoom bounds out of order: min {min} > max {max}")]
    RangeOutOfBounds { min: f64, max: f64 },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings format error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
