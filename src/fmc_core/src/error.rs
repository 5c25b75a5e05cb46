use cube_sim::NotationError;
use thiserror::Error;

use crate::{accounting::MoveCount, chain::SubmissionId, phase::Phase};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid notation: {0}")]
    InvalidNotation(#[from] NotationError),
    #[error("Accounting invariant violated: {0}")]
    AccountingInvariantViolation(#[from] InvariantViolation),
    #[error("The boundary rule is only defined for EO, DR and HTR, not for {0}")]
    UnsupportedChainState(Phase),
    #[error("Cannot insert at move {place} of a skeleton with {len} moves")]
    InsertPlaceOutOfRange { place: usize, len: usize },
    #[error("There is no submission with id {0}")]
    UnknownSubmission(SubmissionId),
    #[error("Could not read the configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// A computed figure that cannot come out of a well formed chain. These point
/// at a defect in the engine rather than in the submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("cancellation removed {cancel} moves")]
    NegativeCancel { cancel: MoveCount },
    #[error("turn metrics out of order: QTM {qtm}, HTM {htm}, STM {stm}, ATM {atm}")]
    MetricBounds {
        htm: usize,
        qtm: usize,
        stm: usize,
        atm: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
