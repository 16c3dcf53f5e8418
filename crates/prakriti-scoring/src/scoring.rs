use serde::{Deserialize, Serialize};

use prakriti_core::models::dosha::Dosha;

use crate::constitution::Constitution;

/// Number of answers of each dosha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaScores {
    pub fn new(vata: u32, pitta: u32, kapha: u32) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn tally<'a>(answers: impl IntoIterator<Item = &'a Dosha>) -> Self {
        let mut scores = Self::default();
        for dosha in answers {
            match dosha {
                Dosha::Vata => scores.vata += 1,
                Dosha::Pitta => scores.pitta += 1,
                Dosha::Kapha => scores.kapha += 1,
            }
        }
        scores
    }

    pub fn total(&self) -> u32 {
        self.vata + self.pitta + self.kapha
    }

    pub fn max(&self) -> u32 {
        self.vata.max(self.pitta).max(self.kapha)
    }

    pub fn constitution(&self) -> Constitution {
        Constitution::from_scores(*self)
    }
}
