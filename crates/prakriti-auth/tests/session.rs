use jsonwebtoken::{encode, EncodingKey, Header};
use prakriti_auth::error::AuthError;
use prakriti_auth::flows::establish_session;
use prakriti_auth::jwt::{decode_unverified, validate_token};
use prakriti_auth::session::{AuthContext, Session};
use prakriti_core::models::account::Account;
use prakriti_core::tables;
use prakriti_store::memory::MemoryBackend;
use uuid::Uuid;

const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

fn token(sub: Uuid, exp_offset_secs: i64, secret: &str) -> String {
    let exp = jiff::Timestamp::now().as_second() + exp_offset_secs;
    let claims = serde_json::json!({
        "sub": sub.to_string(),
        "aud": "authenticated",
        "role": "authenticated",
        "email": "asha@example.com",
        "exp": exp,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn profile(id: Uuid, is_admin: bool) -> Account {
    Account {
        id,
        full_name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        is_admin,
        age: Some(34),
        gender: None,
        height: None,
        weight: None,
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

#[test]
fn valid_token_yields_subject() {
    let sub = Uuid::new_v4();
    let claims = validate_token(&token(sub, 3600, SECRET), SECRET).unwrap();
    assert_eq!(claims.sub, sub);
    assert_eq!(claims.email.as_deref(), Some("asha@example.com"));
}

#[test]
fn wrong_secret_is_rejected_but_unverified_decode_reads_it() {
    let sub = Uuid::new_v4();
    let signed = token(sub, 3600, "another-secret-that-is-also-long-enough!!");
    assert!(matches!(validate_token(&signed, SECRET), Err(AuthError::Jwt(_))));
    assert_eq!(decode_unverified(&signed).unwrap().sub, sub);
}

#[test]
fn expired_token_maps_to_token_expired() {
    let signed = token(Uuid::new_v4(), -3600, SECRET);
    assert!(matches!(validate_token(&signed, SECRET), Err(AuthError::TokenExpired)));
}

#[test]
fn admin_flag_comes_from_profile() {
    let id = Uuid::new_v4();
    assert!(Session::signed_in(profile(id, true)).is_admin());
    assert!(!Session::signed_in(profile(id, false)).is_admin());
    assert!(!Session::without_profile(id).is_admin());
    assert_eq!(Session::without_profile(id).user_id(), Some(id));
    assert!(Session::anonymous().user_id().is_none());
}

#[tokio::test]
async fn session_loads_profile_for_subject() {
    let id = Uuid::new_v4();
    let store = MemoryBackend::new();
    store.seed(tables::PROFILES, &[profile(id, true)]).unwrap();

    let session = establish_session(&store, &token(id, 3600, SECRET), Some(SECRET))
        .await
        .unwrap();
    assert_eq!(session.user_id(), Some(id));
    assert!(session.is_admin());
}

#[tokio::test]
async fn missing_profile_gives_plain_session() {
    let id = Uuid::new_v4();
    let store = MemoryBackend::new();

    let session = establish_session(&store, &token(id, 3600, SECRET), None)
        .await
        .unwrap();
    assert_eq!(session.user_id(), Some(id));
    assert!(session.profile().is_none());
    assert!(!session.is_admin());
}
