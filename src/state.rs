use crate::config::ServerConfig;
use crate::libarena::db;
use crate::libarena::seed::seed_questions;
use crate::libarena::service::{QuestionService, ServiceError};
use log::info;
use std::sync::Arc;

pub struct AppState {
    pub config: ServerConfig,
    pub questions: QuestionService,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, ServiceError> {
        let connection = db::create_or_open(&config.db_path)?;
        let questions = QuestionService::new(connection);

        if config.seed_if_empty && questions.find_all()?.is_empty() {
            let inserted = seed_questions(&questions);
            info!("[Server] Seeded empty question bank with {inserted} questions");
        }

        Ok(Self::with_service(config, questions))
    }

    pub fn with_service(config: ServerConfig, questions: QuestionService) -> Arc<Self> {
        Arc::new(Self { config, questions })
    }
}
