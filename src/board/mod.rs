//! Team task board.
//!
//! This module keeps the authoritative task list of the selected team,
//! applies drag-and-drop status moves optimistically, persists them through
//! the backend port, and restores the confirmed status when a write fails.
//! Filtering by assignee is a projection over the list and never changes it.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
