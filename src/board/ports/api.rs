//! Port for the REST backend that owns task and team records.

use crate::board::domain::{Task, TaskId, TaskStatus, TeamId, TeamMember, TeamSummary};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend contract used by the task board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Lists every task belonging to `team_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the payload does not
    /// decode into valid tasks.
    async fn list_tasks(&self, team_id: TeamId) -> ApiResult<Vec<Task>>;

    /// Lists the members of `team_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or the payload does not
    /// decode into valid members.
    async fn team_members(&self, team_id: TeamId) -> ApiResult<Vec<TeamMember>>;

    /// Sets the status of `task_id` and returns the backend's copy.
    ///
    /// The write sets a definite value, so repeating it is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the backend rejects or never receives the
    /// write.
    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ApiResult<Task>;

    /// Lists the teams whose boards the current user may open.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails.
    async fn available_teams(&self) -> ApiResult<Vec<TeamSummary>>;
}

/// Errors returned by backend implementations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No bearer token is available for the request.
    #[error("no credentials available")]
    MissingCredentials,

    /// The backend refused the credentials (HTTP 401 or 403).
    #[error("not authorised (status {status}): {message}")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The requested record does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend answered with another non-success status.
    #[error("backend rejected request (status {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The response body could not be decoded into domain records.
    #[error("invalid response payload: {0}")]
    Decode(String),

    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// Wraps a transport-level error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns whether the error belongs to the session collaborator.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::Unauthorized { .. })
    }
}
