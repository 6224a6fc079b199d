//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod api;
pub mod credentials;
pub mod notices;

pub use api::{ApiError, ApiResult, BoardApi};
pub use credentials::CredentialProvider;
pub use notices::NoticeSink;

#[cfg(test)]
pub use api::MockBoardApi;
#[cfg(test)]
pub use notices::MockNoticeSink;
