use crate::referral::Link;
use serde::{Deserialize, Serialize};
use std::{
    io,
    num::{ParseFloatError, ParseIntError},
};
use thiserror::Error;

/// Crate-wide error type.
///
/// The opinion algebra never errors (domain validity is enforced upstream);
/// the evaluator errors only on state-machine violations; the solver
/// propagates the first error it observes without retrying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum EbslError {
    /// The expression evaluator hit an illegal state transition. Indicates a
    /// malformed expression tree, never bad input data.
    #[error("trust: invalid expression")]
    InvalidExpression,
    /// Solver configured with a zero epoch cap.
    #[error("solver: epoch must be positive number")]
    EpochMustBePositive,
    /// An expression leaf referenced a direct referral opinion outside the
    /// matrix domain. Indicates a corrupted equation set.
    #[error("direct referral trust not found: {0}")]
    DirectReferralNotFound(Link),
    /// A well-formed evidence line failed to parse.
    #[error("evidence parse error: {0}")]
    Parse(String),
    /// An epoch callback aborted the solve.
    #[error("solve cancelled: {0}")]
    Cancelled(String),
    #[error("file system error: {0}")]
    Io(String),
    #[error("(de)serialization error: {0}")]
    Serialization(String),
}

impl From<io::Error> for EbslError {
    fn from(src: io::Error) -> Self {
        EbslError::Io(format!("{src}"))
    }
}

impl From<ParseIntError> for EbslError {
    fn from(src: ParseIntError) -> Self {
        EbslError::Parse(format!("{src}"))
    }
}

impl From<ParseFloatError> for EbslError {
    fn from(src: ParseFloatError) -> Self {
        EbslError::Parse(format!("{src}"))
    }
}

impl From<toml::de::Error> for EbslError {
    fn from(src: toml::de::Error) -> Self {
        EbslError::Serialization(format!("Toml deserialization error: {src}"))
    }
}
