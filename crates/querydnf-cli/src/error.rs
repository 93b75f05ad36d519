use querydnf_core::{config::ConfigError, error::InternalError};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}", .0.display_with_class())]
    Transform(#[from] InternalError),
}
