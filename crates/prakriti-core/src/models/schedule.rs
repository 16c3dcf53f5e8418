use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of `daily_schedule_templates`. Static reference data keyed by the
/// capitalized dosha name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub dosha_type: String,
    /// Usually one of morning, afternoon, evening or night.
    pub time_of_day: String,
    pub display_order: i32,
    pub activity: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub benefits: Option<String>,
}
