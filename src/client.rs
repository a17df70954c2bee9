use crate::libarena::question::{CheckAnswer, CheckResult, PublicQuestion};
use crate::libarena::service::{QuestionService, ServiceError};
use log::{debug, error};
use reqwest::{Client, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16, message: String },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// The two calls a quiz run makes against the question service.
#[allow(async_fn_in_trait)]
pub trait QuizApi {
    async fn random_question(&self) -> Result<PublicQuestion, ApiError>;

    async fn check_answer(&self, question_id: i64, selected_answer: &str)
        -> Result<bool, ApiError>;
}

pub struct HttpQuizApi {
    client: Client,
    base_url: String,
}

impl HttpQuizApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ok_or_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        error!("[Client] HTTP error! status: {status} {message}");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl QuizApi for HttpQuizApi {
    async fn random_question(&self) -> Result<PublicQuestion, ApiError> {
        let url = format!("{}/questions/random", self.base_url);
        debug!("[Client] GET {url}");
        let response = self.client.get(&url).send().await?;
        let response = Self::ok_or_status(response).await?;
        Ok(response.json::<PublicQuestion>().await?)
    }

    async fn check_answer(
        &self,
        question_id: i64,
        selected_answer: &str,
    ) -> Result<bool, ApiError> {
        let url = format!("{}/questions/check", self.base_url);
        debug!("[Client] POST {url} (question {question_id})");
        let payload = CheckAnswer {
            question_id,
            selected_answer: selected_answer.to_string(),
        };
        let response = self.client.post(&url).json(&payload).send().await?;
        let response = Self::ok_or_status(response).await?;
        Ok(response.json::<CheckResult>().await?.is_correct)
    }
}

/// Offline play straight against a local question bank.
impl QuizApi for QuestionService {
    async fn random_question(&self) -> Result<PublicQuestion, ApiError> {
        Ok(self.get_random()?)
    }

    async fn check_answer(
        &self,
        question_id: i64,
        selected_answer: &str,
    ) -> Result<bool, ApiError> {
        let result = QuestionService::check_answer(
            self,
            &CheckAnswer {
                question_id,
                selected_answer: selected_answer.to_string(),
            },
        )?;
        Ok(result.is_correct)
    }
}
