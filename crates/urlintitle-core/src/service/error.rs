//! Render service errors. Callers treat every one of them as "no update".

use crate::config::OptionsError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("cannot load options: {0}")]
    Options(#[from] OptionsError),
    #[error("render service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed render service message: {0}")]
    Protocol(#[from] serde_json::Error),
}
