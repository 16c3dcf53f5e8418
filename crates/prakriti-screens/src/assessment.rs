//! The Prakriti questionnaire.
//!
//! Questions are shown one at a time. Navigation, answering and submission
//! run through [`AssessmentPhase`]; a successful submission stores one
//! result row and fires the completion callback.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use prakriti_auth::session::AuthContext;
use prakriti_core::models::assessment::{AnswerSet, AssessmentResult, NewAssessmentResult};
use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::question::Question;
use prakriti_scoring::error::ScoringError;
use prakriti_scoring::{progress_percent, score_answers};
use prakriti_store::backend::Backend;
use prakriti_store::rows;

use crate::error::ScreenError;
use crate::load::LoadState;

/// Where the questionnaire stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentPhase {
    /// Showing the question at `index`.
    Answering { index: usize },
    /// The result insert is in flight; `index` is restored on failure.
    Submitting { index: usize },
    /// The result is stored. Terminal.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentEvent {
    Previous,
    Next,
    SelectDot(usize),
    Submit,
    SubmitSucceeded,
    SubmitFailed,
}

impl Default for AssessmentPhase {
    fn default() -> Self {
        AssessmentPhase::Answering { index: 0 }
    }
}

impl AssessmentPhase {
    /// The next phase for `event` with `count` questions loaded. Events that
    /// do not apply to the current phase leave it unchanged.
    pub fn apply(self, event: AssessmentEvent, count: usize) -> Self {
        let last = count.saturating_sub(1);
        match (self, event) {
            (AssessmentPhase::Answering { index }, AssessmentEvent::Previous) => {
                AssessmentPhase::Answering {
                    index: index.saturating_sub(1),
                }
            }
            (AssessmentPhase::Answering { index }, AssessmentEvent::Next) => {
                AssessmentPhase::Answering {
                    index: (index + 1).min(last),
                }
            }
            (AssessmentPhase::Answering { .. }, AssessmentEvent::SelectDot(target))
                if target < count =>
            {
                AssessmentPhase::Answering { index: target }
            }
            (AssessmentPhase::Answering { index }, AssessmentEvent::Submit) => {
                AssessmentPhase::Submitting { index }
            }
            (AssessmentPhase::Submitting { .. }, AssessmentEvent::SubmitSucceeded) => {
                AssessmentPhase::Complete
            }
            (AssessmentPhase::Submitting { index }, AssessmentEvent::SubmitFailed) => {
                AssessmentPhase::Answering { index }
            }
            (phase, _) => phase,
        }
    }
}

/// A message the user must acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AnswerAllQuestions,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::AnswerAllQuestions => "Please answer all questions",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub dosha: Dosha,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub question_id: Uuid,
    /// One-based.
    pub number: usize,
    pub total: usize,
    pub category: String,
    pub prompt: String,
    pub options: Vec<OptionView>,
}

/// The forward button: "Next" before the last question, "Submit" on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardAction {
    Next,
    Submit { enabled: bool, submitting: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Current,
    Answered,
    Unanswered,
}

pub type CompletionCallback = Box<dyn FnMut() + Send>;

pub struct AssessmentScreen {
    backend: Arc<dyn Backend>,
    auth: Arc<dyn AuthContext>,
    questions: LoadState<Vec<Question>>,
    answers: AnswerSet,
    phase: AssessmentPhase,
    notice: Option<Notice>,
    on_complete: Option<CompletionCallback>,
}

impl AssessmentScreen {
    pub fn new(backend: Arc<dyn Backend>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            backend,
            auth,
            questions: LoadState::Loading,
            answers: AnswerSet::new(),
            phase: AssessmentPhase::default(),
            notice: None,
            on_complete: None,
        }
    }

    /// Run `callback` once the result is stored.
    pub fn on_complete(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Fetch the questionnaire. A failed fetch leaves no questions.
    pub async fn load(&mut self) {
        self.questions = match rows::list_questions(&*self.backend).await {
            Ok(questions) => {
                debug!(count = questions.len(), "loaded questions");
                LoadState::Ready(questions)
            }
            Err(e) => {
                warn!(error = %e, "failed to load questions");
                LoadState::Failed
            }
        };
    }

    pub fn questions(&self) -> &LoadState<Vec<Question>> {
        &self.questions
    }

    pub fn phase(&self) -> AssessmentPhase {
        self.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_loading(&self) -> bool {
        self.questions.is_loading()
    }

    pub fn total(&self) -> usize {
        self.questions.rows().len()
    }

    /// Loaded questions that have an answer.
    pub fn answered_count(&self) -> usize {
        self.questions
            .rows()
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// Answered share as an unrounded percentage.
    pub fn progress(&self) -> f64 {
        progress_percent(self.answered_count(), self.total())
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            AssessmentPhase::Answering { index } | AssessmentPhase::Submitting { index } => {
                Some(index)
            }
            AssessmentPhase::Complete => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index()
            .and_then(|index| self.questions.rows().get(index))
    }

    pub fn previous(&mut self) {
        self.transition(AssessmentEvent::Previous);
    }

    pub fn next(&mut self) {
        self.transition(AssessmentEvent::Next);
    }

    pub fn select_dot(&mut self, index: usize) {
        self.transition(AssessmentEvent::SelectDot(index));
    }

    fn transition(&mut self, event: AssessmentEvent) {
        self.phase = self.phase.apply(event, self.total());
    }

    /// Record `dosha` for a question, replacing any earlier choice.
    /// Ignored unless answering, and for ids not in the questionnaire.
    pub fn answer(&mut self, question_id: Uuid, dosha: Dosha) {
        let listed = self.questions.rows().iter().any(|q| q.id == question_id);
        if listed && matches!(self.phase, AssessmentPhase::Answering { .. }) {
            self.answers.insert(question_id, dosha);
        }
    }

    /// Answer the question currently shown.
    pub fn choose(&mut self, dosha: Dosha) {
        if let Some(id) = self.current_question().map(|q| q.id) {
            self.answer(id, dosha);
        }
    }

    pub fn is_complete(&self) -> bool {
        let questions = self.questions.rows();
        !questions.is_empty() && questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// The pending notice, cleared once taken.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Score and store the answers.
    ///
    /// An incomplete questionnaire raises [`Notice::AnswerAllQuestions`] and
    /// writes nothing. On a store failure the screen returns to the question
    /// it was on; nothing is retried. A result that was written but could not
    /// be read back still completes the questionnaire, and the error is
    /// returned.
    pub async fn submit(&mut self) -> Result<AssessmentResult, ScreenError> {
        if !matches!(self.phase, AssessmentPhase::Answering { .. }) {
            return Err(ScreenError::NotAnswering);
        }
        let questions = self.questions.rows();
        if questions.is_empty() {
            return Err(ScreenError::NoQuestions);
        }

        let scored = match score_answers(questions, &self.answers) {
            Ok(scored) => scored,
            Err(ScoringError::Incomplete { answered, total }) => {
                info!(answered, total, "submission rejected: unanswered questions");
                self.notice = Some(Notice::AnswerAllQuestions);
                return Err(ScreenError::Incomplete { answered, total });
            }
            Err(e) => return Err(e.into()),
        };
        let user_id = self.auth.user_id().ok_or(ScreenError::NotSignedIn)?;

        let record = NewAssessmentResult {
            user_id,
            vata_score: scored.scores.vata,
            pitta_score: scored.scores.pitta,
            kapha_score: scored.scores.kapha,
            dominant_dosha: scored.constitution.label().to_string(),
            assessment_data: self.answers.clone(),
        };

        self.transition(AssessmentEvent::Submit);
        match rows::insert_result(&*self.backend, &record).await {
            Ok(stored) => {
                self.transition(AssessmentEvent::SubmitSucceeded);
                info!(
                    user_id = %user_id,
                    dominant = %record.dominant_dosha,
                    "assessment stored"
                );
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
                Ok(stored)
            }
            Err(e) if e.write_committed() => {
                warn!(error = %e, user_id = %user_id, "assessment stored but not read back");
                self.transition(AssessmentEvent::SubmitSucceeded);
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
                Err(e.into())
            }
            Err(e) => {
                warn!(error = %e, "failed to store assessment");
                self.transition(AssessmentEvent::SubmitFailed);
                Err(e.into())
            }
        }
    }

    pub fn question_view(&self) -> Option<QuestionView> {
        let index = self.current_index()?;
        let question = self.questions.rows().get(index)?;
        let chosen = self.answers.get(&question.id);
        Some(QuestionView {
            question_id: question.id,
            number: index + 1,
            total: self.total(),
            category: question.category.clone(),
            prompt: question.question.clone(),
            options: Dosha::ALL
                .into_iter()
                .map(|dosha| OptionView {
                    dosha,
                    text: question.option_text(dosha).to_string(),
                    selected: chosen == Some(&dosha),
                })
                .collect(),
        })
    }

    pub fn previous_enabled(&self) -> bool {
        matches!(self.phase, AssessmentPhase::Answering { index } if index > 0)
    }

    pub fn forward_action(&self) -> ForwardAction {
        let index = self.current_index().unwrap_or(0);
        if index + 1 < self.total() {
            ForwardAction::Next
        } else {
            let submitting = matches!(self.phase, AssessmentPhase::Submitting { .. });
            ForwardAction::Submit {
                enabled: !submitting && self.is_complete(),
                submitting,
            }
        }
    }

    pub fn dots(&self) -> Vec<DotState> {
        let current = self.current_index();
        self.questions
            .rows()
            .iter()
            .enumerate()
            .map(|(i, q)| {
                if Some(i) == current {
                    DotState::Current
                } else if self.answers.contains_key(&q.id) {
                    DotState::Answered
                } else {
                    DotState::Unanswered
                }
            })
            .collect()
    }
}
