//! Task board controller: loads boards, applies drag-and-drop moves, and
//! reconciles them with the backend.

use crate::board::{
    domain::{
        Board, BoardNotice, BoardView, LoadApplication, LoadStatus, MoveStart, NoticeKind,
        PersistStep, Task, TaskId, TaskStatus, TeamId, TeamMember, TeamSummary, UserId,
    },
    ports::{ApiError, BoardApi, NoticeSink},
};
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The task list or member list of a team could not be fetched.
    #[error("failed to load board for team {team_id}: {source}")]
    Load {
        /// Team whose board failed to load.
        team_id: TeamId,
        /// Backend failure.
        #[source]
        source: ApiError,
    },

    /// A status change was rejected; the card was returned to `restored`.
    #[error("failed to move task {task_id}, restored to {restored}: {source}")]
    Persist {
        /// Task that was moved.
        task_id: TaskId,
        /// Column the card was returned to.
        restored: TaskStatus,
        /// Backend failure.
        #[source]
        source: ApiError,
    },

    /// The list of accessible teams could not be fetched.
    #[error("failed to list available teams: {0}")]
    Teams(#[source] ApiError),

    /// The backend refused the session; left to the session collaborator.
    #[error(transparent)]
    Auth(ApiError),

    /// The operation needs a selected team.
    #[error("no team selected")]
    NoTeamSelected,
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Result of a board load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The board now shows the loaded team.
    Loaded {
        /// Number of tasks on the board.
        tasks: usize,
        /// Number of team members in the filter snapshot.
        members: usize,
    },
    /// A newer load was issued before this one completed; its response was
    /// dropped.
    Superseded,
}

/// Why a drop did not start a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredMove {
    /// The task is no longer on the board.
    UnknownTask,
    /// The card was dropped onto its own column.
    SameColumn,
}

/// Result of a drag-and-drop move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The backend holds the final status of the task.
    Persisted,
    /// The move was applied locally and will be sent by the persist already
    /// outstanding for the task.
    Coalesced,
    /// Nothing changed.
    Ignored(IgnoredMove),
    /// The board switched team, or the task left the board, before the
    /// backend answered.
    Discarded,
}

/// Controller owning the authoritative board of the selected team.
///
/// All collaborators are passed in explicitly. The board lock is never held
/// across an `.await`, so moves on different cards and a team switch can be
/// outstanding at the same time.
pub struct TaskBoardController<A, N, C>
where
    A: BoardApi,
    N: NoticeSink,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    notices: Arc<N>,
    clock: Arc<C>,
    board: Mutex<Board>,
}

impl<A, N, C> TaskBoardController<A, N, C>
where
    A: BoardApi,
    N: NoticeSink,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty board and no team selected.
    #[must_use]
    pub fn new(api: Arc<A>, notices: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            api,
            notices,
            clock,
            board: Mutex::new(Board::new()),
        }
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches tasks and members of `team_id` and replaces the board with
    /// them.
    ///
    /// Returns [`LoadOutcome::Superseded`] when another load was issued while
    /// this one was outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Load`] when either fetch fails, after emptying
    /// the board, or [`BoardError::Auth`] when the backend refuses the
    /// session.
    pub async fn load_board(&self, team_id: TeamId) -> BoardResult<LoadOutcome> {
        let ticket = self.board().begin_load(team_id);
        tracing::debug!(%team_id, generation = ticket.generation(), "loading board");

        let fetched = tokio::try_join!(
            self.api.list_tasks(team_id),
            self.api.team_members(team_id)
        );

        let (tasks, members) = match fetched {
            Ok(pair) => pair,
            Err(error) => {
                let emptied = self.board().fail_load(ticket);
                if !emptied {
                    tracing::debug!(%team_id, "ignoring failure of superseded board load");
                    return Ok(LoadOutcome::Superseded);
                }
                tracing::warn!(%team_id, %error, "board load failed");
                if error.is_auth() {
                    return Err(BoardError::Auth(error));
                }
                self.publish(NoticeKind::LoadFailed { team_id }, error.to_string());
                return Err(BoardError::Load {
                    team_id,
                    source: error,
                });
            }
        };

        let (applied, task_count, member_count) = {
            let mut board = self.board();
            let applied = board.apply_load(ticket, tasks, members);
            (applied, board.tasks().len(), board.members().len())
        };

        match applied {
            LoadApplication::Stale => {
                tracing::debug!(%team_id, "discarding superseded board load");
                Ok(LoadOutcome::Superseded)
            }
            LoadApplication::Applied { foreign_tasks } => {
                if foreign_tasks > 0 {
                    tracing::warn!(%team_id, foreign_tasks, "dropped tasks owned by another team");
                }
                tracing::info!(%team_id, tasks = task_count, members = member_count, "board loaded");
                Ok(LoadOutcome::Loaded {
                    tasks: task_count,
                    members: member_count,
                })
            }
        }
    }

    /// Switches the board to `team_id`, clears the assignee filter, and loads
    /// the team's board. Cards of the previous team are removed before the
    /// request is sent.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::load_board`].
    pub async fn select_team(&self, team_id: TeamId) -> BoardResult<LoadOutcome> {
        self.board().select_team(team_id);
        self.load_board(team_id).await
    }

    /// Reloads the board of the selected team.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoTeamSelected`] when no team is active and
    /// otherwise propagates the errors of [`Self::load_board`].
    pub async fn refresh(&self) -> BoardResult<LoadOutcome> {
        let team_id = self.board().team_id().ok_or(BoardError::NoTeamSelected)?;
        self.load_board(team_id).await
    }

    /// Lists the teams whose boards the user may open.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Teams`], or [`BoardError::Auth`] when the backend
    /// refuses the session.
    pub async fn available_teams(&self) -> BoardResult<Vec<TeamSummary>> {
        self.api.available_teams().await.map_err(|error| {
            if error.is_auth() {
                BoardError::Auth(error)
            } else {
                BoardError::Teams(error)
            }
        })
    }

    /// Opens the starting board: the user's own team when known, otherwise
    /// the first accessible team.
    ///
    /// Returns `Ok(None)` when the user can open no board at all.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::available_teams`] and
    /// [`Self::select_team`].
    pub async fn open(&self, own_team: Option<TeamId>) -> BoardResult<Option<LoadOutcome>> {
        let available = match own_team {
            Some(_) => Vec::new(),
            None => self.available_teams().await?,
        };
        let Some(team_id) = choose_initial_team(own_team, &available) else {
            return Ok(None);
        };
        self.select_team(team_id).await.map(Some)
    }

    /// Moves `task_id` to the `destination` column.
    ///
    /// The card moves immediately; the backend write follows. When a write
    /// for the same card is already outstanding the move is queued behind
    /// it and only the final column is sent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] after restoring the card when the
    /// final write fails, or [`BoardError::Auth`] (also after restoring) when
    /// the backend refuses the session.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        destination: TaskStatus,
    ) -> BoardResult<MoveOutcome> {
        let start = self.board().begin_move(task_id, destination);
        match start {
            MoveStart::UnknownTask => {
                tracing::debug!(%task_id, "ignoring drop of unknown task");
                Ok(MoveOutcome::Ignored(IgnoredMove::UnknownTask))
            }
            MoveStart::SameColumn => Ok(MoveOutcome::Ignored(IgnoredMove::SameColumn)),
            MoveStart::Coalesced => {
                tracing::debug!(%task_id, status = %destination, "queued move behind outstanding write");
                Ok(MoveOutcome::Coalesced)
            }
            MoveStart::Persist {
                list_version,
                target,
            } => {
                tracing::debug!(%task_id, status = %target, "applied move optimistically");
                self.persist_move(task_id, list_version, target).await
            }
        }
    }

    async fn persist_move(
        &self,
        task_id: TaskId,
        list_version: u64,
        first_target: TaskStatus,
    ) -> BoardResult<MoveOutcome> {
        let mut target = first_target;
        loop {
            let result = self.api.update_task_status(task_id, target).await;
            if let Err(error) = &result {
                tracing::warn!(%task_id, status = %target, %error, "status write failed");
            }

            let step = self.board().settle(list_version, task_id, result);
            match step {
                PersistStep::Send(next) => {
                    tracing::debug!(%task_id, status = %next, "sending queued status");
                    target = next;
                }
                PersistStep::Persisted => return Ok(MoveOutcome::Persisted),
                PersistStep::Discarded => {
                    tracing::debug!(%task_id, "task left the board before write completed");
                    return Ok(MoveOutcome::Discarded);
                }
                PersistStep::Reverted {
                    attempted,
                    restored,
                    error,
                } => {
                    tracing::warn!(%task_id, %attempted, %restored, "move reverted");
                    if error.is_auth() {
                        return Err(BoardError::Auth(error));
                    }
                    self.publish(
                        NoticeKind::MoveReverted {
                            task_id,
                            attempted,
                            restored,
                        },
                        error.to_string(),
                    );
                    return Err(BoardError::Persist {
                        task_id,
                        restored,
                        source: error,
                    });
                }
            }
        }
    }

    /// Sets the client-only assignee filter; `None` shows every task.
    pub fn filter_by_assignee(&self, assignee: Option<UserId>) {
        self.board().set_assignee_filter(assignee);
    }

    /// Projects the board through the current filter into status columns.
    #[must_use]
    pub fn visible_tasks(&self) -> BoardView {
        self.board().view()
    }

    /// Returns a copy of the authoritative task list.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.board().tasks().to_vec()
    }

    /// Returns a copy of the member snapshot.
    #[must_use]
    pub fn members(&self) -> Vec<TeamMember> {
        self.board().members().to_vec()
    }

    /// Returns a copy of one task.
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<Task> {
        self.board().find_task(task_id).cloned()
    }

    /// Returns the selected team.
    #[must_use]
    pub fn active_team(&self) -> Option<TeamId> {
        self.board().team_id()
    }

    /// Returns the assignee filter.
    #[must_use]
    pub fn assignee_filter(&self) -> Option<UserId> {
        self.board().assignee_filter()
    }

    /// Returns the progress of the latest load.
    #[must_use]
    pub fn load_status(&self) -> LoadStatus {
        self.board().load_status()
    }

    /// Returns whether a write for `task_id` is outstanding.
    #[must_use]
    pub fn has_pending_persist(&self, task_id: TaskId) -> bool {
        self.board().has_pending_persist(task_id)
    }

    fn publish(&self, kind: NoticeKind, message: String) {
        self.notices.publish(BoardNotice {
            kind,
            message,
            raised_at: self.clock.utc(),
        });
    }
}

/// Chooses the team whose board opens first.
///
/// The user's own team wins; otherwise the first accessible team is used.
#[must_use]
pub fn choose_initial_team(own_team: Option<TeamId>, available: &[TeamSummary]) -> Option<TeamId> {
    own_team.or_else(|| available.first().map(|team| team.id))
}
