use crate::answer;
use crate::bank::{Question, QuestionBank};
use crate::history::{AttemptRecord, HistoryStore};
use crate::select::{self, EmptyBankError, Mode};
use crate::summary::{self, Summaries};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    EmptyBank(#[from] EmptyBankError),
    #[error("no question is currently displayed")]
    InvalidState,
    #[error("no option was selected")]
    NoSelection,
}

/// Where the session is in its ask/answer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoQuestion,
    QuestionDisplayed,
    AnswerRevealed,
}

/// Result of a submitted answer, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_correct: bool,
    pub correct_option_text: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableActions {
    pub can_request_all: bool,
    pub can_request_mistakes: bool,
}

/// Single-user quiz session: owns the selection mode, the question on
/// display, and the attempt history. One instance per user; the bank
/// itself is immutable and could back any number of sessions.
#[derive(Debug)]
pub struct Session {
    bank: QuestionBank,
    mode: Mode,
    phase: Phase,
    current: Option<Question>,
    history: HistoryStore,
}

impl Session {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            mode: Mode::All,
            phase: Phase::NoQuestion,
            current: None,
            history: HistoryStore::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// The mistakes action only makes sense once something has been missed.
    pub fn available_actions(&self) -> AvailableActions {
        AvailableActions {
            can_request_all: true,
            can_request_mistakes: self.history.has_mistakes(),
        }
    }

    /// Draws a new question in the given mode. Allowed from any phase.
    ///
    /// `Ok(None)` means mistakes mode had nothing to revisit; the previous
    /// question is cleared and the session returns to `NoQuestion` so the
    /// shell can show a notice on an otherwise empty screen.
    pub fn request_question(&mut self, mode: Mode) -> Result<Option<&Question>, SessionError> {
        self.mode = mode;
        let picked = select::select_random(&self.bank, mode, &self.history)?.cloned();
        match picked {
            Some(question) => {
                self.current = Some(question);
                self.phase = Phase::QuestionDisplayed;
            }
            None => {
                self.current = None;
                self.phase = Phase::NoQuestion;
            }
        }
        Ok(self.current.as_ref())
    }

    /// Evaluates the selection against the displayed question, records the
    /// attempt, and reveals the answer.
    ///
    /// Fails with `InvalidState` outside `QuestionDisplayed` and with
    /// `NoSelection` when nothing was picked; neither failure touches the
    /// history or the displayed question.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<Verdict, SessionError> {
        if self.phase != Phase::QuestionDisplayed {
            return Err(SessionError::InvalidState);
        }
        let question = self.current.as_ref().ok_or(SessionError::InvalidState)?;
        let selected = selected.ok_or(SessionError::NoSelection)?;

        let is_correct = answer::evaluate(question, selected);
        let verdict = Verdict {
            is_correct,
            correct_option_text: answer::correct_option_text(question).to_string(),
            explanation: question.explanation.clone(),
        };

        self.history.append(AttemptRecord {
            question_id: question.id.clone(),
            category: question.category.clone(),
            period: question.period.clone(),
            was_correct: is_correct,
        });
        self.phase = Phase::AnswerRevealed;
        Ok(verdict)
    }

    pub fn summaries(&self) -> Summaries {
        summary::summarize(self.history.all())
    }
}
