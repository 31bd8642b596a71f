use crate::bank::{Question, QuestionBank};
use crate::history::HistoryStore;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Question selection strategy: anything from the bank, or only questions
/// previously answered incorrectly in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    All,
    #[strum(serialize = "mistakes")]
    MistakesOnly,
}

#[derive(Debug, Error, PartialEq)]
#[error("the question bank contains no questions")]
pub struct EmptyBankError;

/// Draws uniformly at random, independently on every call; immediate
/// repeats are allowed.
///
/// In `MistakesOnly` mode the draw is restricted to questions whose id
/// appears in `history` with an incorrect answer. `Ok(None)` means there
/// are no mistakes to revisit yet, which callers surface as a notice, not
/// an error, and must not treat as a reason to switch modes.
pub fn select_random<'a>(
    bank: &'a QuestionBank,
    mode: Mode,
    history: &HistoryStore,
) -> Result<Option<&'a Question>, EmptyBankError> {
    let mut rng = rand::thread_rng();
    match mode {
        Mode::All => {
            if bank.is_empty() {
                return Err(EmptyBankError);
            }
            Ok(bank.questions().choose(&mut rng))
        }
        Mode::MistakesOnly => {
            let mistakes = history.mistake_ids();
            let candidates: Vec<&Question> = bank
                .questions()
                .iter()
                .filter(|q| mistakes.contains(q.id.as_str()))
                .collect();
            Ok(candidates.choose(&mut rng).copied())
        }
    }
}
