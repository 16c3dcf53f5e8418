//! prakriti-screens
//!
//! The three screens of the application as controllers over the store:
//! the Prakriti questionnaire, the personalized daily schedule, and the
//! administrator's follow-up panel. Each screen owns its state, receives
//! the store and the session at construction, and exposes view models for
//! whatever host draws it.

pub mod admin;
pub mod assessment;
pub mod confirm;
pub mod error;
pub mod load;
pub mod schedule;
pub mod shell;
pub mod theme;
