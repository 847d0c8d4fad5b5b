use thiserror::Error;

use ua_core::{ActionId, UaError};

use crate::SelectionAlgorithm;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error(transparent)]
    Core(#[from] UaError),

    #[error("brain configuration error: {0}")]
    Config(String),

    #[error("selection algorithm {algorithm:?} (top_n = {top_n}) is not supported")]
    UnsupportedSelection {
        algorithm: SelectionAlgorithm,
        top_n:     usize,
    },

    #[error("{0} is not a live action of this brain")]
    UnknownAction(ActionId),
}

pub type BrainResult<T> = Result<T, BrainError>;
