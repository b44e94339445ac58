use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create window: {0}")]
    Window(#[from] three_d::WindowError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("canvas setup failed: {0}")]
    Canvas(String),
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
