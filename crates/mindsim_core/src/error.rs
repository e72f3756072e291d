use thiserror::Error;

/// A configuration value the simulation cannot run with
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Boundary radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("Scale factor must be positive, got {0}")]
    NonPositiveScale(f32),
    #[error("Maximum frame delta must be positive, got {0}")]
    NonPositiveMaxDt(f32),
    #[error("Restitution {got} outside [{min}, {max}]")]
    RestitutionOutOfRange { got: f32, min: f32, max: f32 },
    #[error("Margin must not be negative, got {0}")]
    NegativeMargin(f32),
    #[error("Body radius must be positive, got {0}")]
    NonPositiveBodyRadius(f32),
    #[error("Cruise speed must not be negative, got {0}")]
    NegativeCruiseSpeed(f32),
    #[error("Speed band [{min_speed}, {max_speed}] is empty or non-positive")]
    InvalidSpeedBand { min_speed: f32, max_speed: f32 },
    #[error("Body radius {body_radius} does not fit inside boundary radius {boundary_radius}")]
    BodyTooLarge {
        body_radius: f32,
        boundary_radius: f32,
    },
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}
