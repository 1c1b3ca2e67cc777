use thiserror::Error;

/// Validation failures raised while building a scene configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one ring band is required")]
    NoRingBands,
    #[error("ring band {index} is empty or inverted ({min}..{max})")]
    InvertedBand { index: usize, min: f32, max: f32 },
    #[error("ring band {index} starts at {min}, inside the previous band ending at {prev_max}")]
    OverlappingBands { index: usize, min: f32, prev_max: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} bounds are inverted or non-finite ({min}..{max})")]
    InvalidBounds { name: &'static str, min: f32, max: f32 },
}
