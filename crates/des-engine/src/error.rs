use des_core::DesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("environment configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Des(#[from] DesError),
}

impl EngineError {
    /// `true` if the error aborts the whole run rather than only the
    /// process that raised it.
    pub fn is_fatal(&self) -> bool {
        match self {
            EngineError::Config(_) => true,
            EngineError::Des(e)    => e.is_fatal(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
