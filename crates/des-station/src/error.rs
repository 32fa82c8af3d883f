use thiserror::Error;

use des_core::DesError;
use des_engine::EngineError;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("station config error: {0}")]
    Config(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DesError> for StationError {
    fn from(e: DesError) -> Self {
        StationError::Engine(EngineError::Des(e))
    }
}

pub type StationResult<T> = Result<T, StationError>;
