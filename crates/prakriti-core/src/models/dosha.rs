use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the three constitution types. Quiz answers are tagged with the
/// lowercase form; labels and schedule keys use the capitalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// Fixed presentation order of the answer options.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// The answer tag stored in `assessment_data` (e.g. "vata").
    pub fn tag(self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    /// The display name, also used as the `dosha_type` schedule key.
    pub fn name(self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dosha {
    type Err = CoreError;

    /// Accepts both the answer tag and the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vata" | "Vata" => Ok(Dosha::Vata),
            "pitta" | "Pitta" => Ok(Dosha::Pitta),
            "kapha" | "Kapha" => Ok(Dosha::Kapha),
            other => Err(CoreError::UnknownDosha(other.to_string())),
        }
    }
}
