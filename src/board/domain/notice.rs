//! Transient, user-visible notices raised by the board.

use super::{TaskId, TaskStatus, TeamId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeKind {
    /// Loading the board for a team failed; the board is shown empty.
    LoadFailed {
        /// Team whose board could not be loaded.
        team_id: TeamId,
    },
    /// A drag-and-drop move was rejected and the card returned to its column.
    MoveReverted {
        /// Task that was moved.
        task_id: TaskId,
        /// Column the user dropped the card into.
        attempted: TaskStatus,
        /// Column the card was returned to.
        restored: TaskStatus,
    },
}

/// A notice with its message and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardNotice {
    /// What went wrong.
    pub kind: NoticeKind,
    /// Human-readable cause.
    pub message: String,
    /// When the board raised the notice.
    pub raised_at: DateTime<Utc>,
}
