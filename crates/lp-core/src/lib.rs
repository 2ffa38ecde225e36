//! # lp-core
//!
//! Core domain models and ports for LiveProjector.
//!
//! This crate contains the pure projection domain (surfaces, projection state,
//! mirror configuration, live navigation state, plans and songs) without any
//! infrastructure dependencies. Collaborators the core talks to (library store,
//! display windows, Bible text source, clock) are described as ports.

pub mod bible;
pub mod config;
pub mod ids;
pub mod live;
pub mod mirror;
pub mod outcome;
pub mod plan;
pub mod ports;
pub mod projection;
pub mod surface;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::{BlockId, PlanId, PlanItemId, SongId};
pub use live::{LivePatch, LiveState, LockedScreens};
pub use mirror::{MirrorConfigError, MirrorMode};
pub use outcome::{MutationOutcome, RefusalReason};
pub use plan::{Plan, PlanItem, PlanItemKind, Song, SongBlock};
pub use projection::{
    AppearancePatch, MediaPayload, MediaType, ProjectionContent, ProjectionMode, ProjectionPatch,
    ProjectionState, SongMeta, TextPayload,
};
pub use surface::{SurfaceKey, SurfaceKeyError};
