//! Port for surfacing transient board notices to the user.

use crate::board::domain::BoardNotice;

/// Receiver of user-visible board notices.
#[cfg_attr(test, mockall::automock)]
pub trait NoticeSink: Send + Sync {
    /// Publishes a notice. Must not block.
    fn publish(&self, notice: BoardNotice);
}
