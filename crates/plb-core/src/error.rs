use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Unknown parameter: {0}")]
    UnknownName(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
