//! `reqwest` implementation of the board backend port.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::dto::{
    ErrorPayload, StatusUpdateBody, TaskPayload, TeamPayload, TeamSummaryPayload, convert_all,
};
use crate::board::{
    domain::{BoardDomainError, Task, TaskId, TaskStatus, TeamId, TeamMember, TeamSummary},
    ports::{ApiError, ApiResult, BoardApi, CredentialProvider},
};
use crate::config::ClientConfig;

/// Board backend reached over HTTP with bearer-token authentication.
#[derive(Debug, Clone)]
pub struct HttpBoardApi<P>
where
    P: CredentialProvider,
{
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<P>,
}

impl<P> HttpBoardApi<P>
where
    P: CredentialProvider,
{
    /// Creates a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, credentials: Arc<P>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send<T>(&self, request: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(ApiError::MissingCredentials)?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "backend returned error status");
            return Err(error_from_response(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Maps a non-success response onto [`ApiError`].
///
/// The message is taken from an `{"error": ...}` body when present, then
/// from the raw body, then from the status reason phrase.
#[must_use]
pub fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorPayload>(body).map_or_else(
        |_| {
            let raw = String::from_utf8_lossy(body).trim().to_owned();
            if raw.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_owned()
            } else {
                raw
            }
        },
        |payload| payload.error,
    );

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn decoded<T>(result: Result<T, BoardDomainError>) -> ApiResult<T> {
    result.map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl<P> BoardApi for HttpBoardApi<P>
where
    P: CredentialProvider + 'static,
{
    async fn list_tasks(&self, team_id: TeamId) -> ApiResult<Vec<Task>> {
        let request = self
            .client
            .get(self.endpoint("tasks"))
            .query(&[("team_id", team_id.value())]);
        let payloads: Option<Vec<TaskPayload>> = self.send(request).await?;
        decoded(convert_all(payloads))
    }

    async fn team_members(&self, team_id: TeamId) -> ApiResult<Vec<TeamMember>> {
        let request = self.client.get(self.endpoint(&format!("teams/{team_id}")));
        let team: TeamPayload = self.send(request).await?;
        decoded(convert_all(team.members))
    }

    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ApiResult<Task> {
        let request = self
            .client
            .put(self.endpoint(&format!("tasks/{task_id}")))
            .json(&StatusUpdateBody { status });
        let payload: TaskPayload = self.send(request).await?;
        decoded(Task::try_from(payload))
    }

    async fn available_teams(&self) -> ApiResult<Vec<TeamSummary>> {
        let request = self.client.get(self.endpoint("teamsIn"));
        let payloads: Option<Vec<TeamSummaryPayload>> = self.send(request).await?;
        decoded(convert_all(payloads))
    }
}
