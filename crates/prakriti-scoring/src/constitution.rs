use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::scoring::DoshaScores;

/// Label stored when all three scores are equal.
pub const TRIDOSHA_LABEL: &str = "Tri-Dosha";

/// The dominant constitution derived from a score triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constitution {
    Vata,
    Pitta,
    Kapha,
    VataPitta,
    VataKapha,
    PittaKapha,
    Tridosha,
}

impl Constitution {
    /// Derive the label from scores.
    ///
    /// A single maximum picks Vata by default, then Pitta, then Kapha. A
    /// two-way tie above the third score overrides it, checked in the order
    /// Vata-Pitta, Vata-Kapha, Pitta-Kapha, and a three-way tie yields
    /// Tri-Dosha.
    pub fn from_scores(scores: DoshaScores) -> Self {
        let DoshaScores { vata, pitta, kapha } = scores;
        let max = scores.max();

        let mut dominant = Constitution::Vata;
        if pitta == max {
            dominant = Constitution::Pitta;
        } else if kapha == max {
            dominant = Constitution::Kapha;
        }

        if vata == pitta && vata > kapha {
            dominant = Constitution::VataPitta;
        } else if vata == kapha && vata > pitta {
            dominant = Constitution::VataKapha;
        } else if pitta == kapha && pitta > vata {
            dominant = Constitution::PittaKapha;
        } else if vata == pitta && pitta == kapha {
            dominant = Constitution::Tridosha;
        }

        dominant
    }

    pub fn label(self) -> &'static str {
        match self {
            Constitution::Vata => "Vata",
            Constitution::Pitta => "Pitta",
            Constitution::Kapha => "Kapha",
            Constitution::VataPitta => "Vata-Pitta",
            Constitution::VataKapha => "Vata-Kapha",
            Constitution::PittaKapha => "Pitta-Kapha",
            Constitution::Tridosha => TRIDOSHA_LABEL,
        }
    }
}

impl fmt::Display for Constitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Constitution {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Constitution::Vata,
            Constitution::Pitta,
            Constitution::Kapha,
            Constitution::VataPitta,
            Constitution::VataKapha,
            Constitution::PittaKapha,
            Constitution::Tridosha,
        ]
        .into_iter()
        .find(|c| c.label() == s)
        .ok_or_else(|| ScoringError::UnknownLabel(s.to_string()))
    }
}

/// Schedule lookup key for a stored label: everything before the first `-`.
///
/// "Vata-Pitta" resolves to "Vata"; a label without a hyphen resolves to
/// itself. "Tri-Dosha" resolves to "Tri", which matches no template.
pub fn primary_key(label: &str) -> &str {
    label.split_once('-').map_or(label, |(head, _)| head)
}
