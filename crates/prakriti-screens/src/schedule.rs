//! The personalized daily schedule.

use std::sync::Arc;

use tracing::{debug, warn};

use prakriti_auth::session::AuthContext;
use prakriti_core::models::assessment::AssessmentResult;
use prakriti_core::models::schedule::ScheduleEntry;
use prakriti_scoring::constitution::primary_key;
use prakriti_store::backend::Backend;
use prakriti_store::rows;

use crate::theme::{Palette, Theme, dosha_palette, time_of_day_theme};

pub const TITLE: &str = "Your Daily Routine";

pub const NEEDS_ASSESSMENT: &str =
    "Please complete your Prakriti assessment first to view your personalized daily schedule.";

pub const TIPS_TITLE: &str = "Tips for Success";

pub const TIPS: [&str; 5] = [
    "Consistency is key - try to maintain regular timing each day",
    "Start with one or two activities and gradually build your routine",
    "Adjust based on seasons and your personal schedule",
    "Listen to your body and modify as needed",
    "Set reminders to help establish new habits",
];

/// Entries sharing one `time_of_day`, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleGroup {
    pub time_of_day: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Group entries by `time_of_day`. Groups appear in the order their first
/// entry does.
pub fn group_by_time_of_day(entries: Vec<ScheduleEntry>) -> Vec<ScheduleGroup> {
    let mut groups: Vec<ScheduleGroup> = Vec::new();
    for entry in entries {
        match groups
            .iter_mut()
            .find(|g| g.time_of_day == entry.time_of_day)
        {
            Some(group) => group.entries.push(entry),
            None => groups.push(ScheduleGroup {
                time_of_day: entry.time_of_day.clone(),
                entries: vec![entry],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub result: AssessmentResult,
    /// Dosha key the templates were fetched for.
    pub primary: String,
    pub groups: Vec<ScheduleGroup>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScheduleState {
    #[default]
    Loading,
    /// The account has no stored assessment.
    NeedsAssessment,
    Ready(Schedule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub title: &'static str,
    pub subtitle: String,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub activity: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub benefits: Option<String>,
}

impl ActivityView {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            activity: entry.activity.clone(),
            duration: entry
                .duration_minutes
                .filter(|&m| m > 0)
                .map(|m| format!("{m} min")),
            description: non_empty(entry.description.as_deref()),
            benefits: non_empty(entry.benefits.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub title: String,
    pub theme: Theme,
    pub activities: Vec<ActivityView>,
}

/// "morning" -> "Morning".
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct ScheduleScreen {
    backend: Arc<dyn Backend>,
    auth: Arc<dyn AuthContext>,
    state: ScheduleState,
}

impl ScheduleScreen {
    pub fn new(backend: Arc<dyn Backend>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            backend,
            auth,
            state: ScheduleState::Loading,
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    /// Fetch the newest result, then the templates for its primary dosha.
    /// Without a signed-in user nothing is fetched.
    pub async fn load(&mut self) {
        let Some(user_id) = self.auth.user_id() else {
            debug!("schedule load skipped: not signed in");
            return;
        };

        let result = match rows::latest_result(&*self.backend, user_id).await {
            Ok(Some(result)) => result,
            Ok(None) => {
                self.state = ScheduleState::NeedsAssessment;
                return;
            }
            Err(e) => {
                warn!(error = %e, user_id = %user_id, "failed to load latest assessment");
                self.state = ScheduleState::NeedsAssessment;
                return;
            }
        };

        let primary = primary_key(&result.dominant_dosha).to_string();
        let entries = rows::list_schedule_entries(&*self.backend, &primary)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, dosha_type = %primary, "failed to load schedule entries");
                Vec::new()
            });
        debug!(dosha_type = %primary, count = entries.len(), "loaded schedule");

        self.state = ScheduleState::Ready(Schedule {
            result,
            primary,
            groups: group_by_time_of_day(entries),
        });
    }

    pub fn header(&self) -> Option<HeaderView> {
        let ScheduleState::Ready(schedule) = &self.state else {
            return None;
        };
        Some(HeaderView {
            title: TITLE,
            subtitle: format!(
                "Personalized schedule for {} constitution",
                schedule.result.dominant_dosha
            ),
            palette: dosha_palette(&schedule.primary),
        })
    }

    pub fn groups(&self) -> Vec<GroupView> {
        let ScheduleState::Ready(schedule) = &self.state else {
            return Vec::new();
        };
        schedule
            .groups
            .iter()
            .map(|group| GroupView {
                title: capitalize(&group.time_of_day),
                theme: time_of_day_theme(&group.time_of_day),
                activities: group.entries.iter().map(ActivityView::from_entry).collect(),
            })
            .collect()
    }
}
