/// Error type shared by the cube display crates
use thiserror::Error;

/// Failures surfaced by the core library and by surface hosts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid surface configuration: {0}")]
    InvalidConfig(String),

    #[error("cube identifier {0} is out of range (expected 1..=3)")]
    InvalidCubeId(u8),

    #[error("unknown page route: {0}")]
    UnknownRoute(String),

    #[error("{0} must stay finite")]
    NonFinite(&'static str),

    #[error("no cube is selected")]
    NothingSelected,

    #[error("upload is not available on the {0} page")]
    UploadUnavailable(&'static str),

    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
