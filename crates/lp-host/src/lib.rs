//! LiveProjector process host
//!
//! Everything between the operating system and the application layer:
//! configuration, tracing, command dispatch, push events and the IPC server
//! through which the control UI and the display windows talk to the runtime.

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod events;
pub mod ipc;

pub use bootstrap::HostRuntime;
