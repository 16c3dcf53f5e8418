use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dosha::Dosha;

/// A row of `prakriti_questions`. Static reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub display_order: i32,
    pub category: String,
    pub question: String,
    pub vata_option: String,
    pub pitta_option: String,
    pub kapha_option: String,
}

impl Question {
    pub fn option_text(&self, dosha: Dosha) -> &str {
        match dosha {
            Dosha::Vata => &self.vata_option,
            Dosha::Pitta => &self.pitta_option,
            Dosha::Kapha => &self.kapha_option,
        }
    }
}
