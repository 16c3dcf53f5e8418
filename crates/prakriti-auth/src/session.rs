use uuid::Uuid;

use prakriti_core::models::account::Account;

/// Who is using the application. Screens receive this at construction and
/// never manage its lifecycle.
pub trait AuthContext: Send + Sync {
    /// The signed-in auth user, if any.
    fn user_id(&self) -> Option<Uuid>;

    /// The signed-in user's profile row, once loaded.
    fn profile(&self) -> Option<&Account>;

    fn is_admin(&self) -> bool {
        self.profile().is_some_and(|p| p.is_admin)
    }
}

/// A resolved session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user_id: Option<Uuid>,
    profile: Option<Account>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A user whose profile row is loaded.
    pub fn signed_in(profile: Account) -> Self {
        Self {
            user_id: Some(profile.id),
            profile: Some(profile),
        }
    }

    /// A user without a profile row yet (signup still in flight).
    pub fn without_profile(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            profile: None,
        }
    }
}

impl AuthContext for Session {
    fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    fn profile(&self) -> Option<&Account> {
        self.profile.as_ref()
    }
}
