use std::io;

use tandem_primitives::Address;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type ParamsResult<T> = Result<T, ParamsError>;

/// Errors from administrative operations.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// Caller is not the owner.
    #[error("{0} is not the owner")]
    Unauthorized(Address),
}

/// Errors loading constructor parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("decode params: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("unit must be non-zero")]
    ZeroUnit,
}
