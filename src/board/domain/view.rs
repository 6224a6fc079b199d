//! Filter projection of the authoritative task list into board columns.

use super::{Task, TaskStatus, UserId};
use serde::Serialize;

/// One status column of a projected board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tasks in the column, in authoritative list order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of cards in the column.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the column holds no cards.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Columns of a board after the assignee filter has been applied.
///
/// A view owns copies of the tasks it shows and is never written back into
/// the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    assignee_filter: Option<UserId>,
    columns: Vec<BoardColumn>,
}

impl BoardView {
    /// Projects `tasks` into columns keeping only those assigned to
    /// `assignee_filter`, or every task when the filter is `None`.
    #[must_use]
    pub fn project(tasks: &[Task], assignee_filter: Option<UserId>) -> Self {
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: tasks
                    .iter()
                    .filter(|task| task.status() == status)
                    .filter(|task| assignee_filter.is_none_or(|user_id| task.is_assigned_to(user_id)))
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            assignee_filter,
            columns,
        }
    }

    /// Returns the filter this view was projected with.
    #[must_use]
    pub const fn assignee_filter(&self) -> Option<UserId> {
        self.assignee_filter
    }

    /// Returns all columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Returns every visible task across all columns.
    #[must_use]
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|column| column.tasks.iter())
    }

    /// Returns the number of visible tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }

    /// Returns whether no task is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(BoardColumn::is_empty)
    }
}
