//! Player-facing strings in Italian and English.
//!
//! A [`Localization`] is created once and handed to whoever renders text.
//! Components that need to react to a language switch register a callback;
//! callbacks run in registration order.
use log::debug;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    It,
    En,
}

#[derive(Debug, Error, PartialEq)]
#[error("unsupported language `{0}` (expected `it` or `en`)")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    pub fn other(&self) -> Language {
        match self {
            Language::It => Language::En,
            Language::En => Language::It,
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" => Ok(Language::It),
            "en" => Ok(Language::En),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug)]
pub struct MenuText {
    pub start_ar: &'static str,
    pub start_game: &'static str,
    pub exit_ar: &'static str,
    pub language: &'static str,
    pub tagline: &'static str,
}

#[derive(Debug)]
pub struct GameText {
    pub question: &'static str,
    pub game_over: &'static str,
    pub game_over_message: &'static str,
    pub victory: &'static str,
    pub victory_message: &'static str,
    pub restart: &'static str,
    pub new_game: &'static str,
    pub main_menu: &'static str,
}

#[derive(Debug)]
pub struct ErrorText {
    pub connection_error: &'static str,
    pub ar_not_supported: &'static str,
    pub xr_not_supported: &'static str,
}

#[derive(Debug)]
pub struct Translations {
    pub menu: MenuText,
    pub game: GameText,
    pub errors: ErrorText,
}

static ITALIAN: Translations = Translations {
    menu: MenuText {
        start_ar: "Entra in AR",
        start_game: "Inizia Partita",
        exit_ar: "Esci da AR",
        language: "Lingua",
        tagline: "Sfida la tua mente in realtà aumentata",
    },
    game: GameText {
        question: "Domanda",
        game_over: "GAME OVER",
        game_over_message: "Hai risposto in modo errato.\nVuoi riprovare?",
        victory: "COMPLIMENTI!",
        victory_message: "Hai completato tutte le domande!",
        restart: "Riprova",
        new_game: "Nuova Partita",
        main_menu: "Menu Principale",
    },
    errors: ErrorText {
        connection_error: "Errore di connessione.",
        ar_not_supported: "AR non supportata su questo dispositivo",
        xr_not_supported: "WebXR non supportato su questo browser",
    },
};

static ENGLISH: Translations = Translations {
    menu: MenuText {
        start_ar: "Enter AR",
        start_game: "Start Game",
        exit_ar: "Exit AR",
        language: "Language",
        tagline: "Challenge your mind in augmented reality",
    },
    game: GameText {
        question: "Question",
        game_over: "GAME OVER",
        game_over_message: "You answered incorrectly.\nWould you like to try again?",
        victory: "CONGRATULATIONS!",
        victory_message: "You completed all the questions!",
        restart: "Restart",
        new_game: "New Game",
        main_menu: "Main Menu",
    },
    errors: ErrorText {
        connection_error: "Connection error.",
        ar_not_supported: "AR not supported on this device",
        xr_not_supported: "WebXR not supported on this browser",
    },
};

pub fn translations_for(language: Language) -> &'static Translations {
    match language {
        Language::It => &ITALIAN,
        Language::En => &ENGLISH,
    }
}

type Listener = Box<dyn FnMut(Language)>;

#[derive(Default)]
pub struct Localization {
    current: Language,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localization")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Localization {
    pub fn new(language: Language) -> Self {
        Self {
            current: language,
            listeners: Vec::new(),
        }
    }

    pub fn current_language(&self) -> Language {
        self.current
    }

    pub fn translations(&self) -> &'static Translations {
        translations_for(self.current)
    }

    pub fn set_language(&mut self, language: Language) {
        if self.current == language {
            return;
        }
        debug!("[Locale] {} -> {}", self.current, language);
        self.current = language;
        for listener in self.listeners.iter_mut() {
            listener(language);
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.current.other());
    }

    pub fn on_language_change<F>(&mut self, callback: F)
    where
        F: FnMut(Language) + 'static,
    {
        self.listeners.push(Box::new(callback));
    }
}
