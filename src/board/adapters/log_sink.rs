//! Notice sink that forwards notices to `tracing`.

use crate::board::{
    domain::{BoardNotice, NoticeKind},
    ports::NoticeSink,
};

/// Writes each notice as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn publish(&self, notice: BoardNotice) {
        match notice.kind {
            NoticeKind::LoadFailed { team_id } => {
                tracing::warn!(%team_id, raised_at = %notice.raised_at, "board unavailable: {}", notice.message);
            }
            NoticeKind::MoveReverted {
                task_id,
                attempted,
                restored,
            } => {
                tracing::warn!(
                    %task_id,
                    %attempted,
                    %restored,
                    raised_at = %notice.raised_at,
                    "move reverted: {}",
                    notice.message
                );
            }
        }
    }
}
