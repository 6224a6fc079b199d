//! Domain model for the team task board.
//!
//! The board domain models tasks, their status columns, the team member
//! snapshot, and the board aggregate that applies optimistic moves and
//! reconciles them with backend results. All network concerns stay outside
//! the domain boundary.

mod board;
mod error;
mod ids;
mod member;
mod notice;
mod task;
mod view;

pub use board::{Board, LoadApplication, LoadStatus, LoadTicket, MoveStart, PersistStep};
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{TaskId, TeamId, UserId};
pub use member::{TeamMember, TeamSummary, resolve_asset_url};
pub use notice::{BoardNotice, NoticeKind};
pub use task::{AssigneeSummary, Task, TaskData, TaskPriority, TaskStatus};
pub use view::{BoardColumn, BoardView};
