//! HTTP client for the question diagram endpoint.
//!
//! Out-of-process consumers (embedding sites, smoke checks) fetch the
//! stored diagram over HTTP and get back a validated [`QuestionGraph`].

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::model::{DiagramPayload, GraphError, QuestionGraph};

#[derive(Debug, Error)]
pub enum QuizClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no question diagram is stored")]
    NotFound,

    #[error("graph endpoint returned {0}")]
    Server(StatusCode),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Client for the public questions API.
#[derive(Debug, Clone)]
pub struct QuizClient {
    base_url: String,
    client: Client,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Fetch the stored diagram and build a validated graph from it.
    pub async fn fetch_graph(&self) -> Result<QuestionGraph, QuizClientError> {
        let url = format!("{}/api/v1/questions/fetch", self.base_url);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let payload: DiagramPayload = response.json().await?;
                Ok(QuestionGraph::from_payload(&payload)?)
            }
            StatusCode::NOT_FOUND => Err(QuizClientError::NotFound),
            status => Err(QuizClientError::Server(status)),
        }
    }
}
