//! HTTP adapter for the REST backend.

mod client;
pub mod dto;

pub use client::{HttpBoardApi, error_from_response};
