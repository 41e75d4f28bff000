use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid flock config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid bounds {width}x{height}: both sides must be positive and finite")]
    InvalidBounds { width: f32, height: f32 },

    #[error("non-finite {what}")]
    NonFinite { what: &'static str },

    #[error("target frame rate must be at least 1 fps")]
    InvalidFrameRate,

    #[error("world size and density would need more than {max} agents")]
    PopulationTooLarge { max: usize },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = core::result::Result<T, Error>;
