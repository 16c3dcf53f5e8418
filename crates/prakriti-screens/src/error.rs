use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("{answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("no questions loaded")]
    NoQuestions,

    #[error("assessment is not accepting input")]
    NotAnswering,

    #[error("not signed in")]
    NotSignedIn,

    #[error("permission denied")]
    PermissionDenied,

    #[error("no account selected")]
    NoSelection,

    #[error("account {0} is not in the user list")]
    UnknownAccount(uuid::Uuid),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date/time {input:?}: {reason}")]
    InvalidDateTime { input: String, reason: String },

    #[error("scoring error: {0}")]
    Scoring(#[from] prakriti_scoring::error::ScoringError),

    #[error("store error: {0}")]
    Store(#[from] prakriti_store::error::StoreError),
}
