//! Wire records exchanged with the REST backend.
//!
//! Every field is optional on the way in so that a malformed record turns
//! into a [`BoardDomainError`] naming the missing field instead of an opaque
//! decoding failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::domain::{
    AssigneeSummary, BoardDomainError, Task, TaskData, TaskId, TaskPriority, TaskStatus,
    TeamId, TeamMember, TeamSummary, UserId,
};

/// Task record as returned by `GET /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPayload {
    /// Task identifier.
    pub id: Option<u64>,
    /// Task title.
    pub title: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Priority string; blank means the default priority.
    pub priority: Option<String>,
    /// Status string.
    pub status: Option<String>,
    /// Assigned user.
    pub assignee_id: Option<u64>,
    /// Preloaded assignee record.
    pub assignee: Option<AssigneePayload>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning team.
    pub team_id: Option<u64>,
}

/// Preloaded assignee record embedded in a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssigneePayload {
    /// Assignee's full name.
    pub full_name: Option<String>,
    /// Assignee's avatar path.
    pub avatar_url: Option<String>,
}

/// Team record as returned by `GET /teams/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPayload {
    /// Team members; absent for a team without members.
    pub members: Option<Vec<MemberPayload>>,
}

/// Member entry of a team record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberPayload {
    /// User identifier.
    pub id: Option<u64>,
    /// Full name.
    pub full_name: Option<String>,
    /// Avatar path.
    pub avatar_url: Option<String>,
}

/// Entry of `GET /teamsIn`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamSummaryPayload {
    /// Team identifier.
    pub id: Option<u64>,
    /// Team name.
    pub name: Option<String>,
}

/// Error body of a non-success response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    /// Error message.
    pub error: String,
}

/// Body of `PUT /tasks/{id}` for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdateBody {
    /// New status.
    pub status: TaskStatus,
}

fn require<T>(
    value: Option<T>,
    record: &'static str,
    field: &'static str,
) -> Result<T, BoardDomainError> {
    value.ok_or(BoardDomainError::MissingField { record, field })
}

fn parse_priority(raw: Option<&str>) -> Result<TaskPriority, BoardDomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(TaskPriority::default()),
        Some(value) => Ok(TaskPriority::try_from(value)?),
    }
}

impl TryFrom<TaskPayload> for Task {
    type Error = BoardDomainError;

    fn try_from(payload: TaskPayload) -> Result<Self, Self::Error> {
        let id = require(payload.id, "task", "id")?;
        let title = require(payload.title, "task", "title")?;
        let raw_status = require(payload.status, "task", "status")?;
        let team_id = require(payload.team_id, "task", "team_id")?;

        let status = TaskStatus::try_from(raw_status.as_str())?;
        let priority = parse_priority(payload.priority.as_deref())?;
        let assignee = payload.assignee.and_then(|embedded| {
            embedded.full_name.map(|full_name| AssigneeSummary {
                full_name,
                avatar_url: embedded.avatar_url.filter(|url| !url.trim().is_empty()),
            })
        });

        Ok(Self::new(TaskData {
            id: TaskId::new(id),
            title,
            description: payload.description.unwrap_or_default(),
            priority,
            status,
            assignee_id: payload.assignee_id.map(UserId::new),
            assignee,
            due_date: payload.due_date,
            team_id: TeamId::new(team_id),
        }))
    }
}

impl TryFrom<MemberPayload> for TeamMember {
    type Error = BoardDomainError;

    fn try_from(payload: MemberPayload) -> Result<Self, Self::Error> {
        let id = require(payload.id, "member", "id")?;
        let full_name = require(payload.full_name, "member", "full_name")?;
        Ok(Self::new(UserId::new(id), full_name, payload.avatar_url))
    }
}

impl TryFrom<TeamSummaryPayload> for TeamSummary {
    type Error = BoardDomainError;

    fn try_from(payload: TeamSummaryPayload) -> Result<Self, Self::Error> {
        let id = require(payload.id, "team", "id")?;
        Ok(Self {
            id: TeamId::new(id),
            name: payload.name.unwrap_or_default(),
        })
    }
}

/// Converts a list of wire records, failing on the first invalid one.
///
/// # Errors
///
/// Returns the [`BoardDomainError`] of the first record that fails to
/// convert.
pub fn convert_all<P, T>(payloads: Option<Vec<P>>) -> Result<Vec<T>, BoardDomainError>
where
    T: TryFrom<P, Error = BoardDomainError>,
{
    payloads
        .unwrap_or_default()
        .into_iter()
        .map(T::try_from)
        .collect()
}
