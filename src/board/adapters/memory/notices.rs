//! Notice sink that keeps every notice for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use crate::board::{domain::BoardNotice, ports::NoticeSink};

/// Thread-safe notice recorder.
#[derive(Debug, Clone, Default)]
pub struct RecordingNoticeSink {
    notices: Arc<Mutex<Vec<BoardNotice>>>,
}

impl RecordingNoticeSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices published so far.
    #[must_use]
    pub fn notices(&self) -> Vec<BoardNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the notices published so far.
    #[must_use]
    pub fn drain(&self) -> Vec<BoardNotice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NoticeSink for RecordingNoticeSink {
    fn publish(&self, notice: BoardNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
