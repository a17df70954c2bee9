use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const OPTIONS_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown difficulty `{0}`")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored question, correct answer included. Never sent to a player before grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// What a player gets to see: the question without its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Question {
    pub fn to_public(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id,
            text: self.text.clone(),
            options: self.options.clone(),
            difficulty: self.difficulty,
            image_url: self.image_url.clone(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid question data")]
pub struct InvalidQuestion;

/// Payload for creating a question.
///
/// `options` and `correctAnswer` fall back to empty values when absent so that
/// [`NewQuestion::validate`] gets to reject them, not the JSON layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewQuestion {
    // The correct answer is not required to be one of the options.
    pub fn validate(&self) -> Result<(), InvalidQuestion> {
        if self.options.len() != OPTIONS_COUNT || self.correct_answer.is_empty() {
            return Err(InvalidQuestion);
        }
        Ok(())
    }
}

impl From<&Question> for NewQuestion {
    fn from(question: &Question) -> Self {
        NewQuestion {
            text: question.text.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            difficulty: question.difficulty,
            image_url: question.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswer {
    pub question_id: i64,
    pub selected_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planets() -> NewQuestion {
        NewQuestion {
            text: "Which planet is closest to the Sun?".into(),
            options: vec!["Venus".into(), "Mercury".into(), "Mars".into(), "Earth".into()],
            correct_answer: "Mercury".into(),
            difficulty: Difficulty::Easy,
            image_url: None,
        }
    }

    #[test]
    fn validate_accepts_four_options() {
        assert_eq!(planets().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_wrong_option_count() {
        let mut q = planets();
        q.options.pop();
        assert_eq!(q.validate(), Err(InvalidQuestion));

        q.options.extend(["Pluto".to_string(), "Ceres".to_string()]);
        assert_eq!(q.validate(), Err(InvalidQuestion));
    }

    #[test]
    fn validate_rejects_missing_answer() {
        let q: NewQuestion = serde_json::from_str(
            r#"{"text":"?","options":["a","b","c","d"],"difficulty":"hard"}"#,
        )
        .unwrap();
        assert_eq!(q.correct_answer, "");
        assert_eq!(q.validate(), Err(InvalidQuestion));
    }

    #[test]
    fn validate_allows_answer_outside_options() {
        let mut q = planets();
        q.correct_answer = "Jupiter".into();
        assert_eq!(q.validate(), Ok(()));
    }

    #[test]
    fn public_view_has_no_answer() {
        let q = Question {
            id: 1,
            text: "Which planet is closest to the Sun?".into(),
            options: planets().options,
            correct_answer: "Mercury".into(),
            difficulty: Difficulty::Easy,
            image_url: None,
        };
        let json = serde_json::to_value(q.to_public()).unwrap();
        assert!(json.get("correctAnswer").is_none());
        assert_eq!(json["difficulty"], "easy");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn difficulty_parses_known_labels() {
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
