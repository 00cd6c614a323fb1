use std::io;

pub type FolioResult<T> = Result<T, FolioError>;

#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("remote source error: {0}")]
    Remote(String),

    #[error("settings error: {0}")]
    Settings(String),
}

impl FolioError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
