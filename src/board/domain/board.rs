//! Board aggregate: the authoritative task list of one team.
//!
//! The aggregate is synchronous and free of I/O. It records optimistic moves,
//! tracks which persists are outstanding, and decides on each persist result
//! whether to send a follow-up, keep the move, or restore the confirmed
//! status. The controller drives the network calls around it.

use super::{BoardView, Task, TaskId, TaskStatus, TeamId, TeamMember, UserId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Progress of the most recent board load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A load is outstanding.
    Loading,
    /// The latest load succeeded.
    Ready,
    /// The latest load failed and the board is empty.
    Failed,
}

/// Token identifying one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    team_id: TeamId,
    generation: u64,
}

impl LoadTicket {
    /// Returns the team being loaded.
    #[must_use]
    pub const fn team_id(self) -> TeamId {
        self.team_id
    }

    /// Returns the monotonic generation of the request.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Result of applying a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplication {
    /// The response replaced the board.
    Applied {
        /// Tasks dropped because they belong to another team.
        foreign_tasks: usize,
    },
    /// A newer load was issued; the response was ignored.
    Stale,
}

/// What the caller must do after a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStart {
    /// No task with that identifier is on the board.
    UnknownTask,
    /// The card was dropped back onto its own column.
    SameColumn,
    /// A persist for the task is already outstanding; the new status is
    /// queued behind it.
    Coalesced,
    /// The caller must persist `target`.
    Persist {
        /// List version the move was applied to.
        list_version: u64,
        /// Status to send.
        target: TaskStatus,
    },
}

/// What the caller must do after a persist completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStep<E> {
    /// A newer status was queued; persist it next.
    Send(TaskStatus),
    /// The board and the backend agree on the final status.
    Persisted,
    /// The final persist failed and the confirmed status was restored.
    Reverted {
        /// Status the user asked for last.
        attempted: TaskStatus,
        /// Status the card was returned to.
        restored: TaskStatus,
        /// Failure reported by the backend.
        error: E,
    },
    /// The board switched to another team, or a reload no longer lists the
    /// task, while the persist was outstanding.
    Discarded,
}

#[derive(Debug, Clone, Copy)]
struct PendingPersist {
    confirmed: TaskStatus,
    in_flight: TaskStatus,
    queued: Option<TaskStatus>,
}

/// The authoritative board state for the selected team.
#[derive(Debug, Clone, Default)]
pub struct Board {
    team_id: Option<TeamId>,
    contents_team: Option<TeamId>,
    tasks: Vec<Task>,
    members: Vec<TeamMember>,
    assignee_filter: Option<UserId>,
    load_status: LoadStatus,
    generation: u64,
    list_version: u64,
    pending: HashMap<TaskId, PendingPersist>,
}

impl Board {
    /// Creates an empty board with no team selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns the authoritative task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the member snapshot of the selected team.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Returns the assignee filter.
    #[must_use]
    pub const fn assignee_filter(&self) -> Option<UserId> {
        self.assignee_filter
    }

    /// Returns the progress of the latest load.
    #[must_use]
    pub const fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// Finds a task on the board.
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns whether a persist for `task_id` is outstanding.
    #[must_use]
    pub fn has_pending_persist(&self, task_id: TaskId) -> bool {
        self.pending.contains_key(&task_id)
    }

    /// Projects the board through the current assignee filter.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::project(&self.tasks, self.assignee_filter)
    }

    /// Switches to `team_id` and clears the assignee filter.
    ///
    /// Cards and members of another team are removed at once, so nothing of
    /// the previous team can be shown or moved while the new board loads.
    pub fn select_team(&mut self, team_id: TeamId) {
        self.team_id = Some(team_id);
        self.assignee_filter = None;
        if self.contents_team != Some(team_id) {
            self.clear_contents();
        }
    }

    /// Sets the client-only assignee filter.
    pub const fn set_assignee_filter(&mut self, assignee: Option<UserId>) {
        self.assignee_filter = assignee;
    }

    /// Issues a ticket for a new load of `team_id`, superseding older ones.
    pub const fn begin_load(&mut self, team_id: TeamId) -> LoadTicket {
        self.generation += 1;
        self.load_status = LoadStatus::Loading;
        LoadTicket {
            team_id,
            generation: self.generation,
        }
    }

    /// Returns whether `ticket` is the latest issued.
    #[must_use]
    pub const fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Replaces tasks and members together with a load response.
    ///
    /// A reload of the team already shown keeps outstanding persists: their
    /// cards keep the status the user dropped them on, and the reloaded
    /// status becomes the one restored if the write fails.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        mut tasks: Vec<Task>,
        members: Vec<TeamMember>,
    ) -> LoadApplication {
        if !self.is_current(ticket) {
            return LoadApplication::Stale;
        }

        let received = tasks.len();
        tasks.retain(|task| task.team_id() == ticket.team_id);
        let foreign_tasks = received - tasks.len();

        if self.contents_team == Some(ticket.team_id) {
            self.carry_pending(&mut tasks);
        } else {
            self.clear_contents();
        }
        self.team_id = Some(ticket.team_id);
        self.contents_team = Some(ticket.team_id);
        self.tasks = tasks;
        self.members = members;
        self.load_status = LoadStatus::Ready;
        LoadApplication::Applied { foreign_tasks }
    }

    /// Empties the board after a failed load. Returns `false` for a stale
    /// ticket, in which case nothing changes.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.clear_contents();
        self.team_id = Some(ticket.team_id);
        self.contents_team = Some(ticket.team_id);
        self.load_status = LoadStatus::Failed;
        true
    }

    fn clear_contents(&mut self) {
        self.tasks.clear();
        self.members.clear();
        self.pending.clear();
        self.contents_team = None;
        self.list_version += 1;
    }

    /// Re-applies outstanding moves over a reloaded list. Persists whose task
    /// is gone are dropped and settle as discarded.
    fn carry_pending(&mut self, tasks: &mut [Task]) {
        self.pending.retain(|task_id, pending| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == *task_id) else {
                return false;
            };
            pending.confirmed = task.status();
            task.set_status(pending.queued.unwrap_or(pending.in_flight));
            true
        });
    }

    /// Applies a drop of `task_id` onto `destination` optimistically.
    pub fn begin_move(&mut self, task_id: TaskId, destination: TaskStatus) -> MoveStart {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) else {
            return MoveStart::UnknownTask;
        };
        let current = task.status();
        if current == destination {
            return MoveStart::SameColumn;
        }
        task.set_status(destination);

        match self.pending.entry(task_id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().queued = Some(destination);
                MoveStart::Coalesced
            }
            Entry::Vacant(entry) => {
                entry.insert(PendingPersist {
                    confirmed: current,
                    in_flight: destination,
                    queued: None,
                });
                MoveStart::Persist {
                    list_version: self.list_version,
                    target: destination,
                }
            }
        }
    }

    /// Records the result of the outstanding persist for `task_id`.
    ///
    /// `result` carries the backend's copy of the task on success.
    pub fn settle<E>(
        &mut self,
        list_version: u64,
        task_id: TaskId,
        result: Result<Task, E>,
    ) -> PersistStep<E> {
        if list_version != self.list_version {
            return PersistStep::Discarded;
        }
        let Some(pending) = self.pending.get_mut(&task_id) else {
            return PersistStep::Discarded;
        };

        let sent = pending.in_flight;
        let (server_copy, failure) = match result {
            Ok(server_task) => {
                pending.confirmed = server_task.status();
                (Some(server_task), None)
            }
            Err(error) => (None, Some(error)),
        };

        let queued = pending.queued.take();
        match queued {
            Some(next) if next != pending.confirmed => {
                pending.in_flight = next;
                return PersistStep::Send(next);
            }
            _ => {}
        }

        let confirmed = pending.confirmed;
        self.pending.remove(&task_id);

        match (failure, queued) {
            (Some(error), None) => {
                self.restore_status(task_id, confirmed);
                PersistStep::Reverted {
                    attempted: sent,
                    restored: confirmed,
                    error,
                }
            }
            (None, None) => {
                if let Some(server_task) = server_copy {
                    self.accept_server_copy(server_task, confirmed);
                }
                PersistStep::Persisted
            }
            (_, Some(_)) => {
                self.restore_status(task_id, confirmed);
                PersistStep::Persisted
            }
        }
    }

    fn restore_status(&mut self, task_id: TaskId, status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == task_id) {
            task.set_status(status);
        }
    }

    fn accept_server_copy(&mut self, server_task: Task, confirmed: TaskStatus) {
        let task_id = server_task.id();
        let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == task_id) else {
            return;
        };
        if server_task.team_id() == slot.team_id() {
            *slot = server_task;
        } else {
            slot.set_status(confirmed);
        }
    }
}
