use crate::bank::QuestionBank;
use crate::select::Mode;
use crate::session::{Phase, Session, SessionError, Verdict};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Quiz,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// UI-facing state wrapped around the quiz session: the highlighted option,
/// the last verdict for the reveal screen, and transient notices.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub bank_label: String,
    pub selected: Option<usize>,
    pub last_verdict: Option<Verdict>,
    pub notice: Option<String>,
}

impl App {
    pub fn new(bank: QuestionBank, bank_label: impl Into<String>) -> Self {
        Self {
            session: Session::new(bank),
            state: AppState::Quiz,
            bank_label: bank_label.into(),
            selected: None,
            last_verdict: None,
            notice: None,
        }
    }

    /// Draws the next question in `mode` and resets per-question UI state.
    /// Mistakes mode with nothing to revisit leaves a notice instead of a
    /// question; the empty-bank error is fatal and bubbles up.
    pub fn request(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.selected = None;
        self.last_verdict = None;
        self.notice = None;
        if self.session.request_question(mode)?.is_none() {
            self.notice = Some("no mistakes yet: answer a few questions first".to_string());
        }
        Ok(())
    }

    fn move_selection_down(&mut self) {
        self.selected = Some(match self.selected {
            Some(i) if i < 3 => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    fn move_selection_up(&mut self) {
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            Some(_) => 0,
            None => 3,
        });
    }

    fn submit(&mut self) -> Result<(), SessionError> {
        let selected_text = self.selected.and_then(|i| {
            self.session
                .current_question()
                .map(|q| q.options[i].clone())
        });
        match self.session.submit_answer(selected_text.as_deref()) {
            Ok(verdict) => {
                self.last_verdict = Some(verdict);
                self.notice = None;
                Ok(())
            }
            Err(SessionError::NoSelection) => {
                self.notice = Some("pick an option (1-4 or arrows) before answering".to_string());
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Applies one key press. `Quit` leaves teardown to the caller.
    pub fn on_key(&mut self, key: KeyEvent) -> Result<KeyOutcome, SessionError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(KeyOutcome::Quit);
        }
        if key.code == KeyCode::Esc {
            return Ok(KeyOutcome::Quit);
        }

        match self.state {
            AppState::Summary => match key.code {
                KeyCode::Char('b') | KeyCode::Backspace => {
                    self.state = AppState::Quiz;
                }
                _ => {}
            },
            AppState::Quiz => match key.code {
                KeyCode::Char('a') => self.request(Mode::All)?,
                KeyCode::Char('m') => self.request(Mode::MistakesOnly)?,
                KeyCode::Char('s') => {
                    self.state = AppState::Summary;
                }
                KeyCode::Down => {
                    if self.session.phase() == Phase::QuestionDisplayed {
                        self.move_selection_down();
                    }
                }
                KeyCode::Up => {
                    if self.session.phase() == Phase::QuestionDisplayed {
                        self.move_selection_up();
                    }
                }
                KeyCode::Char(c @ '1'..='4') => {
                    if self.session.phase() == Phase::QuestionDisplayed {
                        self.selected = Some(c as usize - '1' as usize);
                    }
                }
                KeyCode::Enter => match self.session.phase() {
                    Phase::QuestionDisplayed => self.submit()?,
                    Phase::AnswerRevealed => self.request(self.session.mode())?,
                    Phase::NoQuestion => {}
                },
                KeyCode::Char('n') => {
                    if self.session.phase() == Phase::AnswerRevealed {
                        self.request(self.session.mode())?;
                    }
                }
                _ => {}
            },
        }
        Ok(KeyOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let data = "period,id,text,option_1,option_2,option_3,option_4,correct,category,explanation\n\
                    2021,Q1,What is 2+2?,3,4,5,6,2,arithmetic,Two plus two is four.";
        let bank = QuestionBank::load_from_reader(data.as_bytes()).unwrap();
        App::new(bank, "test")
    }

    #[test]
    fn starts_on_the_quiz_screen_with_nothing_selected() {
        let app = test_app();
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.selected.is_none());
        assert!(app.last_verdict.is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn a_requests_a_question() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.session.phase(), Phase::QuestionDisplayed);
        assert!(app.selected.is_none());
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let mut app = test_app();
        assert_eq!(app.on_key(key(KeyCode::Esc)).unwrap(), KeyOutcome::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            KeyOutcome::Quit
        );
    }

    #[test]
    fn digits_pick_an_option_directly() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        app.on_key(key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.selected, Some(2));
    }

    #[test]
    fn arrows_move_the_highlight_within_bounds() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();

        app.on_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected, Some(0));
        app.on_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected, Some(1));
        app.on_key(key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected, Some(0));
        app.on_key(key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected, Some(0));

        for _ in 0..6 {
            app.on_key(key(KeyCode::Down)).unwrap();
        }
        assert_eq!(app.selected, Some(3));
    }

    #[test]
    fn enter_without_a_selection_shows_a_notice_not_an_error() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        app.on_key(key(KeyCode::Enter)).unwrap();

        assert!(app.notice.is_some());
        assert_eq!(app.session.phase(), Phase::QuestionDisplayed);
        assert!(app.session.history().is_empty());
    }

    #[test]
    fn enter_submits_the_highlighted_option() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        app.on_key(key(KeyCode::Char('2'))).unwrap();
        app.on_key(key(KeyCode::Enter)).unwrap();

        let verdict = app.last_verdict.as_ref().unwrap();
        assert!(verdict.is_correct);
        assert_eq!(app.session.phase(), Phase::AnswerRevealed);
        assert_eq!(app.session.history().len(), 1);
    }

    #[test]
    fn enter_after_reveal_draws_the_next_question() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        app.on_key(key(KeyCode::Char('2'))).unwrap();
        app.on_key(key(KeyCode::Enter)).unwrap();
        app.on_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.session.phase(), Phase::QuestionDisplayed);
        assert!(app.last_verdict.is_none());
        assert!(app.selected.is_none());
    }

    #[test]
    fn mistakes_request_without_mistakes_leaves_a_notice() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('m'))).unwrap();

        assert_eq!(app.session.phase(), Phase::NoQuestion);
        assert!(app.session.current_question().is_none());
        assert!(app.notice.as_ref().unwrap().contains("no mistakes"));
    }

    #[test]
    fn summary_screen_toggles_with_s_and_b() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.state, AppState::Summary);

        // Quiz keys are inert while the summary is up.
        app.on_key(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.session.phase(), Phase::NoQuestion);

        app.on_key(key(KeyCode::Char('b'))).unwrap();
        assert_eq!(app.state, AppState::Quiz);
    }

    #[test]
    fn selection_keys_are_inert_without_a_question() {
        let mut app = test_app();
        app.on_key(key(KeyCode::Char('2'))).unwrap();
        app.on_key(key(KeyCode::Down)).unwrap();
        assert!(app.selected.is_none());

        app.on_key(key(KeyCode::Enter)).unwrap();
        assert!(app.session.history().is_empty());
    }
}
