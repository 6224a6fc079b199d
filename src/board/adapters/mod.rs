//! Adapter implementations for board ports.

pub mod credentials;
pub mod http;
pub mod log_sink;
pub mod memory;
