use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("{answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("unknown constitution label: {0}")]
    UnknownLabel(String),
}
