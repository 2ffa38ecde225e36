//! Process bootstrap: config, tracing and dependency wiring.

pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use runtime::HostRuntime;
pub use wiring::{initial_projection_state, wire_dependencies};
