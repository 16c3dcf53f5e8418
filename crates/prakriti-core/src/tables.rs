//! Table and column conventions of the hosted store.
//!
//! Pure string constants with no network dependency. These define the canonical
//! names every query in the workspace is built from.

pub const PROFILES: &str = "profiles";

pub const FOLLOW_UPS: &str = "follow_ups";

pub const QUESTIONS: &str = "prakriti_questions";

pub const ASSESSMENTS: &str = "prakriti_assessments";

pub const SCHEDULE_TEMPLATES: &str = "daily_schedule_templates";

pub const ALL: [&str; 5] = [
    PROFILES,
    FOLLOW_UPS,
    QUESTIONS,
    ASSESSMENTS,
    SCHEDULE_TEMPLATES,
];

pub mod columns {
    pub const ID: &str = "id";
    pub const IS_ADMIN: &str = "is_admin";
    pub const CREATED_AT: &str = "created_at";
    pub const USER_ID: &str = "user_id";
    pub const SCHEDULED_DATE: &str = "scheduled_date";
    pub const COMPLETED: &str = "completed";
    pub const DISPLAY_ORDER: &str = "display_order";
    pub const ASSESSED_AT: &str = "assessed_at";
    pub const DOSHA_TYPE: &str = "dosha_type";
}

/// The timestamp column the store stamps on insert, if the table has one.
pub fn insert_timestamp_column(table: &str) -> Option<&'static str> {
    match table {
        ASSESSMENTS => Some(columns::ASSESSED_AT),
        FOLLOW_UPS | PROFILES => Some(columns::CREATED_AT),
        _ => None,
    }
}
