//! The administrator's panel: accounts, their details, and their
//! follow-ups.
//!
//! Every follow-up fetch is tagged with the selection generation it was
//! issued for. [`AdminScreen::apply`] drops a response whose generation is
//! no longer current, so a slow reply for an earlier selection can never
//! overwrite the list of a later one.

use std::future::Future;
use std::sync::Arc;

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use tracing::{debug, info, warn};
use uuid::Uuid;

use prakriti_auth::session::AuthContext;
use prakriti_core::models::account::Account;
use prakriti_core::models::follow_up::{FollowUp, FollowUpKind, NewFollowUp};
use prakriti_store::backend::Backend;
use prakriti_store::error::StoreError;
use prakriti_store::rows;

use crate::confirm::Confirm;
use crate::error::ScreenError;
use crate::load::LoadState;

pub const PERMISSION_DENIED: &str = "You do not have permission to access the admin panel.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this follow-up?";
pub const NO_USERS: &str = "No users found.";
pub const NO_FOLLOW_UPS: &str =
    "No follow-ups scheduled for this user. Click \"Add Follow-up\" to create one.";
pub const SELECT_USER: &str = "Select a User";

const NOT_AVAILABLE: &str = "N/A";

/// Format for a follow-up's scheduled time in the viewer's zone.
const SCHEDULED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The create form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowUpForm {
    pub title: String,
    pub description: String,
    pub kind: FollowUpKind,
    /// `YYYY-MM-DDTHH:MM` in the viewer's zone.
    pub scheduled: String,
}

impl FollowUpForm {
    /// Validate the form and build the insert payload.
    pub fn to_new(
        &self,
        account_id: Uuid,
        admin_id: Uuid,
        tz: &TimeZone,
    ) -> Result<NewFollowUp, ScreenError> {
        if self.title.is_empty() {
            return Err(ScreenError::MissingField("title"));
        }
        if self.scheduled.is_empty() {
            return Err(ScreenError::MissingField("scheduled_date"));
        }
        let invalid = |e: jiff::Error| ScreenError::InvalidDateTime {
            input: self.scheduled.clone(),
            reason: e.to_string(),
        };
        let local: DateTime = self.scheduled.parse().map_err(invalid)?;
        let scheduled_date = local.to_zoned(tz.clone()).map_err(invalid)?.timestamp();

        Ok(NewFollowUp {
            user_id: account_id,
            title: self.title.clone(),
            description: self.description.clone(),
            follow_up_type: self.kind,
            scheduled_date,
            created_by: admin_id,
        })
    }
}

/// A follow-up fetch issued for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpRequest {
    pub account_id: Uuid,
    pub generation: u64,
}

#[derive(Debug)]
pub struct FollowUpResponse {
    pub request: FollowUpRequest,
    pub result: Result<Vec<FollowUp>, StoreError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    pub full_name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
}

impl AccountDetails {
    pub fn from_account(account: &Account) -> Self {
        let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            age: or_na(account.age.filter(|&a| a > 0).map(|a| a.to_string())),
            gender: or_na(account.gender.clone().filter(|g| !g.is_empty())),
            height: or_na(account.height.filter(|&h| h > 0.0).map(|h| format!("{h} cm"))),
            weight: or_na(account.weight.filter(|&w| w > 0.0).map(|w| format!("{w} kg"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpRow {
    pub id: Uuid,
    pub title: String,
    pub kind: FollowUpKind,
    /// Completed rows render muted with a "Completed" badge.
    pub completed: bool,
    pub scheduled: String,
    pub description: Option<String>,
}

pub struct AdminScreen {
    backend: Arc<dyn Backend>,
    auth: Arc<dyn AuthContext>,
    tz: TimeZone,
    accounts: LoadState<Vec<Account>>,
    selected: Option<Uuid>,
    generation: u64,
    follow_ups: Vec<FollowUp>,
    form: FollowUpForm,
    form_visible: bool,
}

impl AdminScreen {
    pub fn new(backend: Arc<dyn Backend>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            backend,
            auth,
            tz: TimeZone::system(),
            accounts: LoadState::Loading,
            selected: None,
            generation: 0,
            follow_ups: Vec::new(),
            form: FollowUpForm::default(),
            form_visible: false,
        }
    }

    /// Zone used to read the form's date/time and to show scheduled times.
    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    pub fn access(&self) -> Result<(), ScreenError> {
        if self.auth.is_admin() {
            Ok(())
        } else {
            Err(ScreenError::PermissionDenied)
        }
    }

    /// List non-admin accounts. Does nothing for non-administrators.
    pub async fn load(&mut self) {
        if self.access().is_err() {
            debug!("admin load skipped: not an administrator");
            return;
        }
        self.accounts = match rows::list_accounts(&*self.backend).await {
            Ok(accounts) => LoadState::Ready(accounts),
            Err(e) => {
                warn!(error = %e, "failed to load accounts");
                LoadState::Failed
            }
        };
    }

    pub fn accounts(&self) -> &LoadState<Vec<Account>> {
        &self.accounts
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_account(&self) -> Option<&Account> {
        let id = self.selected?;
        self.accounts.rows().iter().find(|a| a.id == id)
    }

    pub fn follow_ups(&self) -> &[FollowUp] {
        &self.follow_ups
    }

    /// Make `account_id` the selection and issue a fetch for it. Only
    /// accounts in the loaded list can be selected. Switching to a different
    /// account clears the shown follow-ups.
    pub fn begin_select(&mut self, account_id: Uuid) -> Result<FollowUpRequest, ScreenError> {
        self.access()?;
        if !self.accounts.rows().iter().any(|a| a.id == account_id) {
            return Err(ScreenError::UnknownAccount(account_id));
        }
        if self.selected != Some(account_id) {
            self.follow_ups.clear();
        }
        self.selected = Some(account_id);
        Ok(self.next_request(account_id))
    }

    fn next_request(&mut self, account_id: Uuid) -> FollowUpRequest {
        self.generation += 1;
        FollowUpRequest {
            account_id,
            generation: self.generation,
        }
    }

    /// Run a follow-up fetch without borrowing the screen.
    pub fn fetch(
        &self,
        request: FollowUpRequest,
    ) -> impl Future<Output = FollowUpResponse> + Send + 'static {
        let backend = Arc::clone(&self.backend);
        async move {
            let result = rows::list_follow_ups(&*backend, request.account_id).await;
            FollowUpResponse { request, result }
        }
    }

    /// Take a fetch result. Returns `false` when it was issued for a
    /// selection that has since changed.
    pub fn apply(&mut self, response: FollowUpResponse) -> bool {
        let FollowUpResponse { request, result } = response;
        if request.generation != self.generation || self.selected != Some(request.account_id) {
            debug!(
                account_id = %request.account_id,
                generation = request.generation,
                current = self.generation,
                "discarding stale follow-up response"
            );
            return false;
        }
        match result {
            Ok(follow_ups) => self.follow_ups = follow_ups,
            Err(e) => {
                warn!(error = %e, account_id = %request.account_id, "failed to load follow-ups")
            }
        }
        true
    }

    pub async fn select(&mut self, account_id: Uuid) -> Result<(), ScreenError> {
        let request = self.begin_select(account_id)?;
        let response = self.fetch(request).await;
        self.apply(response);
        Ok(())
    }

    /// Re-fetch the selected account's follow-ups.
    pub async fn refresh(&mut self) {
        let Some(account_id) = self.selected else {
            return;
        };
        let request = self.next_request(account_id);
        let response = self.fetch(request).await;
        self.apply(response);
    }

    pub fn form(&self) -> &FollowUpForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FollowUpForm {
        &mut self.form
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    /// "Add Follow-up".
    pub fn toggle_form(&mut self) {
        self.form_visible = !self.form_visible;
    }

    /// "Cancel". Keeps what was typed.
    pub fn hide_form(&mut self) {
        self.form_visible = false;
    }

    /// Store the form as a follow-up of the selected account, authored by
    /// the signed-in administrator.
    pub async fn create_follow_up(&mut self) -> Result<FollowUp, ScreenError> {
        self.access()?;
        let admin_id = self
            .auth
            .profile()
            .map(|p| p.id)
            .ok_or(ScreenError::NotSignedIn)?;
        let account_id = self.selected.ok_or(ScreenError::NoSelection)?;
        let new = self.form.to_new(account_id, admin_id, &self.tz)?;

        let stored = match rows::insert_follow_up(&*self.backend, &new).await {
            Ok(stored) => stored,
            Err(e) if e.write_committed() => {
                warn!(error = %e, account_id = %account_id, "follow-up stored but not read back");
                self.reset_form();
                self.refresh().await;
                return Err(e.into());
            }
            Err(e) => {
                warn!(error = %e, account_id = %account_id, "failed to create follow-up");
                return Err(e.into());
            }
        };
        info!(
            follow_up_id = %stored.id,
            account_id = %account_id,
            kind = %stored.follow_up_type,
            "follow-up created"
        );

        self.reset_form();
        self.refresh().await;
        Ok(stored)
    }

    fn reset_form(&mut self) {
        self.form = FollowUpForm::default();
        self.form_visible = false;
    }

    /// Delete one follow-up after a yes from `confirm`.
    pub async fn delete_follow_up(
        &mut self,
        id: Uuid,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, ScreenError> {
        self.access()?;
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }
        if let Err(e) = rows::delete_follow_up(&*self.backend, id).await {
            warn!(error = %e, follow_up_id = %id, "failed to delete follow-up");
            return Err(e.into());
        }
        info!(follow_up_id = %id, "follow-up deleted");
        self.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    pub fn account_rows(&self) -> Vec<AccountRow> {
        self.accounts
            .rows()
            .iter()
            .map(|a| AccountRow {
                id: a.id,
                full_name: a.full_name.clone(),
                email: a.email.clone(),
                selected: self.selected == Some(a.id),
            })
            .collect()
    }

    pub fn details(&self) -> Option<AccountDetails> {
        self.selected_account().map(AccountDetails::from_account)
    }

    pub fn follow_up_rows(&self) -> Vec<FollowUpRow> {
        self.follow_ups
            .iter()
            .map(|f| FollowUpRow {
                id: f.id,
                title: f.title.clone(),
                kind: f.follow_up_type,
                completed: f.completed,
                scheduled: f
                    .scheduled_date
                    .to_zoned(self.tz.clone())
                    .strftime(SCHEDULED_FORMAT)
                    .to_string(),
                description: f.description.clone().filter(|d| !d.is_empty()),
            })
            .collect()
    }
}
