use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown dosha tag: {0}")]
    UnknownDosha(String),

    #[error("unknown follow-up type: {0}")]
    UnknownFollowUpKind(String),
}
