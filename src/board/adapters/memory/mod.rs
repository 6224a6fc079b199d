//! In-memory adapters for board tests and demos.

mod api;
mod notices;

pub use api::InMemoryBoardApi;
pub use notices::RecordingNoticeSink;
