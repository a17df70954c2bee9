//! Question service: listing, random draw, creation and grading.
//!
//! Independent of HTTP so that both the axum routes and offline play can
//! share it. The connection sits behind a mutex; every call is one short
//! synchronous query.
use crate::libarena::db;
use crate::libarena::question::{
    CheckAnswer, CheckResult, InvalidQuestion, NewQuestion, PublicQuestion, Question,
};
use log::{debug, warn};
use rand::Rng;
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("database connection poisoned")]
    Poisoned,
}

impl From<InvalidQuestion> for ServiceError {
    fn from(err: InvalidQuestion) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

pub struct QuestionService {
    connection: Mutex<Connection>,
}

impl QuestionService {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    pub fn close(self) -> Result<(), ServiceError> {
        let connection = self
            .connection
            .into_inner()
            .map_err(|_| ServiceError::Poisoned)?;
        Ok(db::close_db(connection)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ServiceError> {
        self.connection.lock().map_err(|_| ServiceError::Poisoned)
    }

    pub fn find_all(&self) -> Result<Vec<PublicQuestion>, ServiceError> {
        let conn = self.lock()?;
        let questions = Question::get_all(&conn)?;
        Ok(questions.iter().map(Question::to_public).collect())
    }

    /// Full records, correct answers included. For maintenance tooling only.
    pub fn all_questions(&self) -> Result<Vec<Question>, ServiceError> {
        let conn = self.lock()?;
        Ok(Question::get_all(&conn)?)
    }

    pub fn get_random(&self) -> Result<PublicQuestion, ServiceError> {
        self.get_random_with(&mut rand::rng())
    }

    /// Counts the rows and takes the one at an offset drawn uniformly from `[0, count)`.
    pub fn get_random_with<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<PublicQuestion, ServiceError> {
        let conn = self.lock()?;
        let count = Question::count(&conn)?;
        if count == 0 {
            warn!("[Service] Random question requested from an empty store");
            return Err(ServiceError::NotFound("No questions available".into()));
        }
        let offset = rng.random_range(0..count);
        debug!("[Service] Drawing question at offset {offset} of {count}");

        match Question::get_at_offset(&conn, offset)? {
            Some(question) => Ok(question.to_public()),
            None => Err(ServiceError::NotFound("No questions available".into())),
        }
    }

    pub fn create(&self, new_question: NewQuestion) -> Result<Question, ServiceError> {
        new_question.validate()?;
        let conn = self.lock()?;
        Ok(Question::insert(&conn, &new_question)?)
    }

    pub fn check_answer(&self, check: &CheckAnswer) -> Result<CheckResult, ServiceError> {
        let conn = self.lock()?;
        let question = Question::get_by_id(&conn, check.question_id)?
            .ok_or_else(|| ServiceError::NotFound("Question not found".into()))?;
        let is_correct = check.selected_answer == question.correct_answer;
        debug!(
            "[Service] Question {} answered {:?}: {}",
            question.id, check.selected_answer, is_correct
        );
        Ok(CheckResult { is_correct })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libarena::question::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn service() -> QuestionService {
        QuestionService::new(db::open_in_memory().unwrap())
    }

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
    fn check_answer_is_exact_match() {
        let service = service();
        let stored = service.create(planets()).unwrap();

        let check = |answer: &str| {
            service
                .check_answer(&CheckAnswer {
                    question_id: stored.id,
                    selected_answer: answer.into(),
                })
                .unwrap()
                .is_correct
        };
        assert!(check("Mercury"));
        assert!(!check("Venus"));
        assert!(!check("mercury"));
        assert!(!check("Mercury "));
    }

    #[test]
    fn check_answer_unknown_id_is_not_found() {
        let err = service()
            .check_answer(&CheckAnswer {
                question_id: 42,
                selected_answer: "Mercury".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Question not found"));
    }

    #[test]
    fn create_rejects_invalid_payload() {
        let mut q = planets();
        q.options.truncate(3);
        let err = service().create(q).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn random_on_empty_store_fails() {
        let err = service().get_random().unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn random_draws_from_stored_set() {
        let service = service();
        let mut ids = Vec::new();
        for i in 0..5 {
            let mut q = planets();
            q.text = format!("question {i}");
            ids.push(service.create(q).unwrap().id);
        }

        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let q = service.get_random_with(&mut rng).unwrap();
            assert!(ids.contains(&q.id));
            seen.insert(q.id);
        }
        assert_eq!(seen.len(), ids.len());
    }

    #[test]
    fn listing_hides_answers() {
        let service = service();
        service.create(planets()).unwrap();
        let listed = serde_json::to_string(&service.find_all().unwrap()).unwrap();
        assert!(!listed.contains("correctAnswer"));
    }
}
