use thiserror::Error;

/// A parameter outside its physically meaningful range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
}
