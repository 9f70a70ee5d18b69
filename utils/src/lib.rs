//! Shared utilities for the Agora governance core.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, init_tracing_for_tests, init_tracing_json};
pub use time::format_ticks;
