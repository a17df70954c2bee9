pub const TOTAL_QUESTIONS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Victory,
    GameOver,
}

/// One run of up to [`TOTAL_QUESTIONS`] questions. Lives in memory only.
#[derive(Debug, Clone)]
pub struct GameSession {
    current_index: u32,
    total: u32,
    status: GameStatus,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_total(TOTAL_QUESTIONS)
    }

    pub fn with_total(total: u32) -> Self {
        Self {
            current_index: 0,
            total,
            status: GameStatus::Idle,
        }
    }

    pub fn start_new_game(&mut self) {
        self.current_index = 0;
        self.status = GameStatus::Playing;
    }

    /// Moves past a correctly answered question.
    pub fn advance_level(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.current_index += 1;
        if self.current_index >= self.total {
            self.status = GameStatus::Victory;
        }
    }

    pub fn set_game_over(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::GameOver;
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_victory(&self) -> bool {
        self.status == GameStatus::Victory
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn progress_label(&self) -> String {
        self.progress_label_with("Question")
    }

    pub fn progress_label_with(&self, word: &str) -> String {
        format!("{} {}/{}", word, self.current_index + 1, self.total)
    }
}
