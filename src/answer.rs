use crate::bank::Question;

/// The option text the dataset marks as correct.
pub fn correct_option_text(question: &Question) -> &str {
    &question.options[question.correct_index as usize - 1]
}

/// Exact string comparison against the correct option. Pure: no state is
/// touched; recording the outcome is the caller's job. Callers reject a
/// missing selection before ever reaching this point.
pub fn evaluate(question: &Question, selected: &str) -> bool {
    selected == correct_option_text(question)
}
