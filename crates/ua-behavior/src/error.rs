use thiserror::Error;

use ua_core::UaError;

use crate::blackboard::KeyKind;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Core(#[from] UaError),

    #[error("blackboard key {0:?} is not defined")]
    UnknownKey(String),

    #[error("blackboard key {key:?} holds {expected:?}, not {found:?}")]
    KeyTypeMismatch {
        key:      String,
        expected: KeyKind,
        found:    KeyKind,
    },

    #[error("blackboard key {0:?} is defined more than once")]
    DuplicateKey(String),

    #[error("no {kind} type registered under {name:?}")]
    UnknownType {
        kind: &'static str,
        name: String,
    },

    #[error("template parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
