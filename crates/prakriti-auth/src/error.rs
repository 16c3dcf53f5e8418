use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT error: {0}")]
    Jwt(jsonwebtoken::errors::Error),

    #[error("store error: {0}")]
    Store(#[from] prakriti_store::error::StoreError),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::Jwt(e),
        }
    }
}
