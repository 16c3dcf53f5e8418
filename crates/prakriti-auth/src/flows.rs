use tracing::{info, warn};

use prakriti_store::backend::Backend;
use prakriti_store::error::StoreError;
use prakriti_store::rows;

use crate::error::AuthError;
use crate::jwt;
use crate::session::Session;

/// Resolve the session for an access token: read its subject, then load
/// the matching profile. A missing profile yields a session without admin
/// rights rather than an error.
pub async fn establish_session(
    backend: &dyn Backend,
    access_token: &str,
    jwt_secret: Option<&str>,
) -> Result<Session, AuthError> {
    let claims = match jwt_secret {
        Some(secret) => jwt::validate_token(access_token, secret)?,
        None => jwt::decode_unverified(access_token)?,
    };
    info!(user_id = %claims.sub, "establishing session");

    match rows::get_account(backend, claims.sub).await {
        Ok(profile) => Ok(Session::signed_in(profile)),
        Err(StoreError::NotFound { .. }) => {
            warn!(user_id = %claims.sub, "no profile row for user");
            Ok(Session::without_profile(claims.sub))
        }
        Err(e) => Err(e.into()),
    }
}
