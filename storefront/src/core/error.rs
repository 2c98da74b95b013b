use thiserror::Error;

use super::config::ConfigError;
use crate::db::RepoError;

/// Errors that stop the server from starting or keep it from serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data store error: {0}")]
    Storage(#[from] RepoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
