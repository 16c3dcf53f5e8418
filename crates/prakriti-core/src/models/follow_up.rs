use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpKind {
    #[default]
    Reminder,
    CheckIn,
    Assessment,
}

impl FollowUpKind {
    pub const ALL: [FollowUpKind; 3] = [
        FollowUpKind::Reminder,
        FollowUpKind::CheckIn,
        FollowUpKind::Assessment,
    ];

    /// Stored value of `follow_up_type`.
    pub fn tag(self) -> &'static str {
        match self {
            FollowUpKind::Reminder => "reminder",
            FollowUpKind::CheckIn => "check_in",
            FollowUpKind::Assessment => "assessment",
        }
    }

    /// Label shown in the type selector.
    pub fn label(self) -> &'static str {
        match self {
            FollowUpKind::Reminder => "Reminder",
            FollowUpKind::CheckIn => "Check-in",
            FollowUpKind::Assessment => "Assessment",
        }
    }
}

impl fmt::Display for FollowUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FollowUpKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FollowUpKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| CoreError::UnknownFollowUpKind(s.to_string()))
    }
}

/// A row of `follow_ups`. Authored by an administrator for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub follow_up_type: FollowUpKind,
    pub scheduled_date: jiff::Timestamp,
    #[serde(default)]
    pub completed: bool,
    pub created_by: Uuid,
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

/// Insert payload for `follow_ups`. The store assigns `id`, `completed`
/// and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFollowUp {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub follow_up_type: FollowUpKind,
    pub scheduled_date: jiff::Timestamp,
    pub created_by: Uuid,
}
