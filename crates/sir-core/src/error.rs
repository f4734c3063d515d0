//! Model error type.
//!
//! Sub-crates keep their own error enums and wrap `SirError` as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sir-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SirError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parameter file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sir-*` crates.
pub type SirResult<T> = Result<T, SirError>;
