use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dosha::Dosha;

/// Question id → chosen dosha. Held in memory until submission, then
/// persisted whole as `assessment_data`.
pub type AnswerSet = BTreeMap<Uuid, Dosha>;

/// A row of `prakriti_assessments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vata_score: u32,
    pub pitta_score: u32,
    pub kapha_score: u32,
    pub dominant_dosha: String,
    #[serde(default)]
    pub assessment_data: AnswerSet,
    pub assessed_at: jiff::Timestamp,
}

/// Insert payload for `prakriti_assessments`. The store assigns `id` and
/// `assessed_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessmentResult {
    pub user_id: Uuid,
    pub vata_score: u32,
    pub pitta_score: u32,
    pub kapha_score: u32,
    pub dominant_dosha: String,
    pub assessment_data: AnswerSet,
}
