//! Taskboard: the task board core of a team collaboration portal.
//!
//! This crate keeps the board of one selected team in memory, applies
//! drag-and-drop status changes before the backend confirms them, and
//! reconciles the board when a write fails or a newer load overtakes an
//! older one.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend, session and
//!   notifications
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory,
//!   tracing)
//!
//! # Modules
//!
//! - [`board`]: Task board domain, ports, adapters and controller
//! - [`config`]: Backend client configuration

pub mod board;
pub mod config;
