//! Client-side orchestration of a quiz run.
//!
//! [`QuizController`] is driven by discrete events: a menu pick, an option
//! pick, a question arriving, a grade arriving, a feedback delay running out.
//! Every network request carries a [`RequestTag`]; a response whose tag no
//! longer matches the controller's current generation is dropped untouched.
use crate::client::{ApiError, QuizApi};
use crate::libarena::locale::Translations;
use crate::libarena::question::PublicQuestion;
use crate::libarena::session::GameSession;
use log::{debug, error, info};
use std::time::Duration;

pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
pub const INCORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Idle,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Loading,
    Question,
    ConnectionError,
    Victory,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleLanguage,
    ExitAr,
}

const MENU_ACTIONS: [MenuAction; 3] = [
    MenuAction::StartGame,
    MenuAction::ToggleLanguage,
    MenuAction::ExitAr,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSubmission {
    pub tag: RequestTag,
    pub question_id: i64,
    pub selected_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// An answer should be sent for grading.
    Submit(AnswerSubmission),
    /// A new game started; a question should be fetched.
    Load(RequestTag),
    Menu,
    ToggleLanguage,
    Exit,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Shown,
    ConnectionError,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Correct,
    Incorrect,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    LoadNext(RequestTag),
    ShowVictory,
    ShowGameOver,
    Wait,
}

#[derive(Debug)]
pub struct QuizController {
    session: GameSession,
    screen: Screen,
    question: Option<PublicQuestion>,
    feedback: Vec<Feedback>,
    answer_in_flight: bool,
    generation: u64,
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new(GameSession::new())
    }
}

impl QuizController {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            screen: Screen::Menu,
            question: None,
            feedback: Vec::new(),
            answer_in_flight: false,
            generation: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn question(&self) -> Option<&PublicQuestion> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn is_answer_in_flight(&self) -> bool {
        self.answer_in_flight
    }

    fn current_tag(&self) -> RequestTag {
        RequestTag(self.generation)
    }

    fn bump(&mut self) -> RequestTag {
        self.generation += 1;
        self.current_tag()
    }

    pub fn show_main_menu(&mut self) {
        self.bump();
        self.screen = Screen::Menu;
        self.question = None;
        self.feedback.clear();
    }

    pub fn handle_menu_action(&mut self, action: MenuAction) -> Selection {
        match action {
            MenuAction::StartGame => Selection::Load(self.start_new_game()),
            MenuAction::ToggleLanguage => Selection::ToggleLanguage,
            MenuAction::ExitAr => {
                self.show_main_menu();
                Selection::Exit
            }
        }
    }

    pub fn start_new_game(&mut self) -> RequestTag {
        info!("[Quiz] Starting a new game");
        self.session.start_new_game();
        self.answer_in_flight = false;
        self.begin_load()
    }

    /// Clears the current question so nothing is selectable while loading.
    pub fn begin_load(&mut self) -> RequestTag {
        self.screen = Screen::Loading;
        self.question = None;
        self.feedback.clear();
        self.bump()
    }

    pub fn finish_load(
        &mut self,
        tag: RequestTag,
        result: Result<PublicQuestion, ApiError>,
    ) -> LoadOutcome {
        if tag != self.current_tag() || self.screen != Screen::Loading {
            debug!("[Quiz] Dropping stale question response");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(question) => {
                debug!("[Quiz] Showing question {}", question.id);
                self.feedback = vec![Feedback::Idle; question.options.len()];
                self.question = Some(question);
                self.screen = Screen::Question;
                self.answer_in_flight = false;
                LoadOutcome::Shown
            }
            Err(err) => {
                error!("[Quiz] Loading error: {err}");
                self.screen = Screen::ConnectionError;
                LoadOutcome::ConnectionError
            }
        }
    }

    /// Labels the player can currently pick from, in selection order.
    pub fn choices(&self, text: &Translations) -> Vec<String> {
        match self.screen {
            Screen::Menu => vec![
                text.menu.start_game.to_string(),
                text.menu.language.to_string(),
                text.menu.exit_ar.to_string(),
            ],
            Screen::Question => self
                .question
                .as_ref()
                .map(|q| q.options.clone())
                .unwrap_or_default(),
            Screen::Victory => vec![
                text.game.new_game.to_string(),
                text.game.main_menu.to_string(),
            ],
            Screen::GameOver => vec![
                text.game.restart.to_string(),
                text.game.main_menu.to_string(),
            ],
            Screen::ConnectionError => vec![text.game.main_menu.to_string()],
            Screen::Loading => Vec::new(),
        }
    }

    pub fn select_option(&mut self, index: usize) -> Selection {
        match self.screen {
            Screen::Menu => match MENU_ACTIONS.get(index) {
                Some(action) => self.handle_menu_action(*action),
                None => Selection::Ignored,
            },
            Screen::Victory | Screen::GameOver => match index {
                0 => Selection::Load(self.start_new_game()),
                1 => {
                    self.show_main_menu();
                    Selection::Menu
                }
                _ => Selection::Ignored,
            },
            Screen::ConnectionError => {
                self.show_main_menu();
                Selection::Menu
            }
            Screen::Loading => Selection::Ignored,
            Screen::Question => self.select_answer(index),
        }
    }

    fn select_answer(&mut self, index: usize) -> Selection {
        if !self.session.is_playing() || self.answer_in_flight {
            return Selection::Ignored;
        }
        let Some(question) = self.question.as_ref() else {
            return Selection::Ignored;
        };
        let Some(answer) = question.options.get(index) else {
            return Selection::Ignored;
        };
        let submission = AnswerSubmission {
            tag: self.current_tag(),
            question_id: question.id,
            selected_answer: answer.clone(),
        };

        self.answer_in_flight = true;
        self.feedback.iter_mut().for_each(|f| *f = Feedback::Idle);
        self.feedback[index] = Feedback::Selected;
        Selection::Submit(submission)
    }

    pub fn finish_check(
        &mut self,
        submission: &AnswerSubmission,
        result: Result<bool, ApiError>,
    ) -> CheckOutcome {
        if submission.tag != self.current_tag() || self.screen != Screen::Question {
            debug!("[Quiz] Dropping stale answer response");
            return CheckOutcome::Stale;
        }
        let index = self
            .feedback
            .iter()
            .position(|f| *f == Feedback::Selected);

        match result {
            Ok(true) => {
                if let Some(i) = index {
                    self.feedback[i] = Feedback::Correct;
                }
                self.session.advance_level();
                CheckOutcome::Correct
            }
            Ok(false) => {
                if let Some(i) = index {
                    self.feedback[i] = Feedback::Incorrect;
                }
                self.session.set_game_over();
                CheckOutcome::Incorrect
            }
            Err(err) => {
                error!("[Quiz] Error checking answer: {err}");
                self.answer_in_flight = false;
                CheckOutcome::Failed
            }
        }
    }

    pub fn feedback_delay(outcome: CheckOutcome) -> Option<Duration> {
        match outcome {
            CheckOutcome::Correct => Some(CORRECT_FEEDBACK_DELAY),
            CheckOutcome::Incorrect => Some(INCORRECT_FEEDBACK_DELAY),
            CheckOutcome::Failed | CheckOutcome::Stale => None,
        }
    }

    /// Runs once the feedback delay for `submission` has elapsed.
    pub fn after_feedback(&mut self, submission: &AnswerSubmission) -> NextStep {
        if submission.tag != self.current_tag() || self.screen != Screen::Question {
            return NextStep::Wait;
        }
        if self.session.is_victory() {
            info!("[Quiz] Victory");
            self.screen = Screen::Victory;
            NextStep::ShowVictory
        } else if self.session.is_game_over() {
            info!(
                "[Quiz] Game over after {} correct answers",
                self.session.current_index()
            );
            self.screen = Screen::GameOver;
            NextStep::ShowGameOver
        } else if self.session.is_playing() {
            NextStep::LoadNext(self.begin_load())
        } else {
            NextStep::Wait
        }
    }
}

pub async fn load_question<A: QuizApi>(
    controller: &mut QuizController,
    api: &A,
    tag: RequestTag,
) -> LoadOutcome {
    let result = api.random_question().await;
    controller.finish_load(tag, result)
}

pub async fn submit_answer<A: QuizApi>(
    controller: &mut QuizController,
    api: &A,
    submission: &AnswerSubmission,
) -> CheckOutcome {
    let result = api
        .check_answer(submission.question_id, &submission.selected_answer)
        .await;
    controller.finish_check(submission, result)
}
