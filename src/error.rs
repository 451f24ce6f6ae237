use std::io;
use thiserror::Error;

/// Errors surfaced by the host-facing parts of the crate.
///
/// The motion tick itself never fails; these come from config I/O and
/// from parsing user-supplied mode names.
#[derive(Error, Debug)]
pub enum MascotError {
    #[error("unknown behavior mode: {0:?}")]
    UnknownMode(String),

    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine a config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, MascotError>;
