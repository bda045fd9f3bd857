use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use quiz_core::model::{AnswerMap, QuestionList, QuizId, ScoreResult};

use super::QuizApi;
use super::wire::{ErrorPayload, QuestionsPayload, ScorePayload, SubmitPayload};
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct HttpQuizConfig {
    pub base_url: Url,
}

impl HttpQuizConfig {
    /// Parse the server root, e.g. `https://quiz.example.com` or `http://host/prefix/`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if `raw` is not an absolute hierarchical URL.
    pub fn new(raw: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(raw.trim()).map_err(|_| ApiError::InvalidBaseUrl(raw.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(raw.to_string()));
        }
        Ok(Self { base_url })
    }

    /// `{base}/api/quiz/{quiz_id}/{action}` with the quiz id as one encoded segment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base cannot take path segments.
    pub fn endpoint(&self, quiz_id: &QuizId, action: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["api", "quiz", quiz_id.as_str(), action]);
        }
        Ok(url)
    }
}

/// `QuizApi` backed by the quiz server's JSON endpoints.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: HttpQuizConfig,
}

impl HttpQuizApi {
    #[must_use]
    pub fn new(config: HttpQuizConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn load_questions(&self, quiz_id: &QuizId) -> Result<QuestionList, ApiError> {
        let url = self.config.endpoint(quiz_id, "data")?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let payload: QuestionsPayload = read_json(response).await?;
        let questions = payload.into_question_list()?;

        info!("loaded {} questions for quiz {quiz_id}", questions.len());
        Ok(questions)
    }

    async fn submit_answers(
        &self,
        quiz_id: &QuizId,
        answers: &AnswerMap,
    ) -> Result<ScoreResult, ApiError> {
        let url = self.config.endpoint(quiz_id, "submit")?;
        debug!("POST {url} ({} answers)", answers.len());

        let response = self
            .client
            .post(url)
            .json(&SubmitPayload { answers })
            .send()
            .await?;
        let payload: ScorePayload = read_json(response).await?;
        let result = payload.into_score_result()?;

        info!(
            "quiz {quiz_id} scored {} / {}",
            result.score(),
            result.total()
        );
        Ok(result)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorPayload>(&body)
            .ok()
            .map(|payload| payload.error);
        return Err(ApiError::HttpStatus { status, message });
    }

    serde_json::from_slice(&body).map_err(ApiError::Malformed)
}
