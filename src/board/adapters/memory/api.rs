//! In-memory backend for board tests and demos.
//!
//! Besides storing tasks and members, the backend can hold responses behind a
//! gate until released and fail requests on demand, so callers can reproduce
//! slow networks and rejected writes deterministically.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::Semaphore;

use crate::board::{
    domain::{Task, TaskId, TaskStatus, TeamId, TeamMember, TeamSummary},
    ports::{ApiError, ApiResult, BoardApi},
};

/// Thread-safe in-memory board backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardApi {
    state: Arc<RwLock<InMemoryBoardState>>,
    gates: Arc<Mutex<Gates>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    teams: Vec<TeamSummary>,
    tasks: Vec<Task>,
    members: HashMap<TeamId, Vec<TeamMember>>,
    load_failures: HashMap<TeamId, ApiError>,
    status_failures: VecDeque<ApiError>,
    status_updates: Vec<(TaskId, TaskStatus)>,
    task_list_requests: Vec<TeamId>,
}

#[derive(Debug, Default)]
struct Gates {
    team_loads: HashMap<TeamId, Arc<Semaphore>>,
    status_updates: Option<Arc<Semaphore>>,
}

fn poisoned(err: impl std::fmt::Display) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

/// Waits until `gate` is released. A closed semaphore marks a released gate.
async fn pass(gate: Option<Arc<Semaphore>>) {
    if let Some(semaphore) = gate {
        let _released = semaphore.acquire().await;
    }
}

impl InMemoryBoardApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(poisoned)
    }

    fn read_state(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(poisoned)
    }

    /// Registers a team with its members.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn add_team(
        &self,
        team: TeamSummary,
        members: impl IntoIterator<Item = TeamMember>,
    ) -> ApiResult<()> {
        let mut state = self.write_state()?;
        state.members.insert(team.id, members.into_iter().collect());
        state.teams.retain(|existing| existing.id != team.id);
        state.teams.push(team);
        Ok(())
    }

    /// Stores tasks, replacing any with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn add_tasks(&self, tasks: impl IntoIterator<Item = Task>) -> ApiResult<()> {
        let mut state = self.write_state()?;
        for task in tasks {
            state.tasks.retain(|existing| existing.id() != task.id());
            state.tasks.push(task);
        }
        Ok(())
    }

    /// Makes every load of `team_id` fail with `error` until cleared. Both
    /// the task listing and the member listing fail.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn fail_loads_for(&self, team_id: TeamId, error: ApiError) -> ApiResult<()> {
        self.write_state()?.load_failures.insert(team_id, error);
        Ok(())
    }

    /// Lets loads of `team_id` succeed again.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn clear_load_failure(&self, team_id: TeamId) -> ApiResult<()> {
        self.write_state()?.load_failures.remove(&team_id);
        Ok(())
    }

    /// Makes the next status write fail with `error`. Failures queue up in
    /// call order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn fail_next_status_update(&self, error: ApiError) -> ApiResult<()> {
        self.write_state()?.status_failures.push_back(error);
        Ok(())
    }

    /// Holds task listings of `team_id` until [`Self::release_team_loads`].
    pub fn hold_team_loads(&self, team_id: TeamId) {
        if let Ok(mut gates) = self.gates.lock() {
            gates
                .team_loads
                .insert(team_id, Arc::new(Semaphore::new(0)));
        }
    }

    /// Releases held task listings of `team_id`.
    pub fn release_team_loads(&self, team_id: TeamId) {
        if let Ok(mut gates) = self.gates.lock() {
            if let Some(gate) = gates.team_loads.remove(&team_id) {
                gate.close();
            }
        }
    }

    /// Holds status writes until [`Self::release_status_updates`].
    pub fn hold_status_updates(&self) {
        if let Ok(mut gates) = self.gates.lock() {
            gates.status_updates = Some(Arc::new(Semaphore::new(0)));
        }
    }

    /// Releases held status writes.
    pub fn release_status_updates(&self) {
        if let Ok(mut gates) = self.gates.lock() {
            if let Some(gate) = gates.status_updates.take() {
                gate.close();
            }
        }
    }

    fn team_gate(&self, team_id: TeamId) -> Option<Arc<Semaphore>> {
        self.gates
            .lock()
            .ok()
            .and_then(|gates| gates.team_loads.get(&team_id).cloned())
    }

    fn status_gate(&self) -> Option<Arc<Semaphore>> {
        self.gates
            .lock()
            .ok()
            .and_then(|gates| gates.status_updates.clone())
    }

    /// Returns every status write received, in arrival order.
    #[must_use]
    pub fn status_updates(&self) -> Vec<(TaskId, TaskStatus)> {
        self.read_state()
            .map(|state| state.status_updates.clone())
            .unwrap_or_default()
    }

    /// Returns the team of every task listing received, in arrival order.
    #[must_use]
    pub fn task_list_requests(&self) -> Vec<TeamId> {
        self.read_state()
            .map(|state| state.task_list_requests.clone())
            .unwrap_or_default()
    }

    /// Returns the stored copy of a task.
    #[must_use]
    pub fn stored_task(&self, task_id: TaskId) -> Option<Task> {
        self.read_state()
            .ok()
            .and_then(|state| state.tasks.iter().find(|task| task.id() == task_id).cloned())
    }
}

#[async_trait]
impl BoardApi for InMemoryBoardApi {
    async fn list_tasks(&self, team_id: TeamId) -> ApiResult<Vec<Task>> {
        self.write_state()?.task_list_requests.push(team_id);
        pass(self.team_gate(team_id)).await;

        let state = self.read_state()?;
        if let Some(error) = state.load_failures.get(&team_id) {
            return Err(error.clone());
        }
        if !state.members.contains_key(&team_id) {
            return Err(ApiError::NotFound(format!("team {team_id}")));
        }
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.team_id() == team_id)
            .cloned()
            .collect())
    }

    async fn team_members(&self, team_id: TeamId) -> ApiResult<Vec<TeamMember>> {
        let state = self.read_state()?;
        if let Some(error) = state.load_failures.get(&team_id) {
            return Err(error.clone());
        }
        state
            .members
            .get(&team_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("team {team_id}")))
    }

    async fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ApiResult<Task> {
        pass(self.status_gate()).await;

        let mut state = self.write_state()?;
        state.status_updates.push((task_id, status));
        if let Some(error) = state.status_failures.pop_front() {
            return Err(error);
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| ApiError::NotFound(format!("task {task_id}")))?;
        task.set_status(status);
        Ok(task.clone())
    }

    async fn available_teams(&self) -> ApiResult<Vec<TeamSummary>> {
        Ok(self.read_state()?.teams.clone())
    }
}
