//! prakriti-scoring
//!
//! Constitution scoring for the Prakriti questionnaire. Pure functions, no
//! store dependency. Tallies answers, derives the dominant label and the
//! primary dosha used to look up schedule templates.

pub mod constitution;
pub mod error;
pub mod scoring;

use prakriti_core::models::assessment::AnswerSet;
use prakriti_core::models::question::Question;

use constitution::Constitution;
use error::ScoringError;
use scoring::DoshaScores;

/// A fully answered questionnaire, ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredAssessment {
    pub scores: DoshaScores,
    pub constitution: Constitution,
}

/// Score a questionnaire. Every question must carry an answer.
pub fn score_answers(
    questions: &[Question],
    answers: &AnswerSet,
) -> Result<ScoredAssessment, ScoringError> {
    let answered = questions
        .iter()
        .filter(|q| answers.contains_key(&q.id))
        .count();
    if answered < questions.len() {
        return Err(ScoringError::Incomplete {
            answered,
            total: questions.len(),
        });
    }

    let scores = DoshaScores::tally(questions.iter().filter_map(|q| answers.get(&q.id)));
    Ok(ScoredAssessment {
        scores,
        constitution: scores.constitution(),
    })
}

/// Share of answered questions as a percentage. Rounding is left to the
/// display. An empty questionnaire reports 0.
pub fn progress_percent(answered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    answered as f64 / total as f64 * 100.0
}
