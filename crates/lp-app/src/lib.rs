//! LiveProjector application layer
//!
//! Projection use cases and the live runtime: per-surface state, mirroring,
//! routing, the live cursor, observer fan-out and plan navigation.

pub mod app;
pub mod broadcast;
pub mod deps;
pub mod live;
pub mod mirror;
pub mod navigation;
pub mod plan_item;
pub mod router;
pub mod runtime;
pub mod screen_state;

pub use app::App;
pub use broadcast::{BroadcastHub, ProjectionEvent, Subscription, WindowRole};
pub use deps::AppDeps;
pub use live::LiveCursor;
pub use mirror::MirrorRegistry;
pub use navigation::{LiveNavigation, NavigationOutcome};
pub use plan_item::{PlanItemProjector, ProjectionPayload};
pub use router::{RouteDecision, RoutePolicy};
pub use runtime::{ProjectionRuntime, SurfaceInfo};
pub use screen_state::ScreenStateStore;
