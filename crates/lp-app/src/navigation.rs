//! Plan navigation: moving the live cursor and putting the item under it on
//! the live target.
//!
//! 节目单导航：移动直播游标并将当前条目投到直播目标画面。

use std::sync::Arc;

use anyhow::{Context, Result};
use lp_core::ports::LibraryPort;
use lp_core::{LivePatch, LiveState, MutationOutcome, PlanId, PlanItem, SurfaceKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::plan_item::PlanItemProjector;
use crate::runtime::ProjectionRuntime;

/// Live state after a navigation step, plus what happened on screen.
///
/// `projection` is `None` when nothing was projected: live is disabled, no
/// plan is active, or the plan is gone or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOutcome {
    pub live: LiveState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<MutationOutcome>,
}

impl NavigationOutcome {
    fn live_only(live: LiveState) -> Self {
        Self {
            live,
            projection: None,
        }
    }
}

pub struct LiveNavigation {
    runtime: Arc<ProjectionRuntime>,
    library: Arc<dyn LibraryPort>,
    projector: PlanItemProjector,
}

impl LiveNavigation {
    pub fn new(
        runtime: Arc<ProjectionRuntime>,
        library: Arc<dyn LibraryPort>,
        projector: PlanItemProjector,
    ) -> Self {
        Self {
            runtime,
            library,
            projector,
        }
    }

    /// Enable live on `plan_id`, starting at `cursor` (default 0).
    pub async fn go_live(&self, plan_id: PlanId, cursor: Option<i64>) -> Result<NavigationOutcome> {
        let live = self.runtime.merge_live(LivePatch {
            enabled: Some(true),
            plan_id: Some(Some(plan_id)),
            cursor: Some(cursor.unwrap_or(0)),
            ..LivePatch::default()
        });
        self.project_cursor(live).await
    }

    pub async fn next(&self) -> Result<NavigationOutcome> {
        let live = self.runtime.next();
        self.project_cursor(live).await
    }

    pub async fn prev(&self) -> Result<NavigationOutcome> {
        let live = self.runtime.prev();
        self.project_cursor(live).await
    }

    pub async fn set_cursor(&self, cursor: i64) -> Result<NavigationOutcome> {
        let live = self.runtime.set_cursor(cursor);
        self.project_cursor(live).await
    }

    /// Project one item directly, outside the cursor.
    pub async fn project_item(&self, target: SurfaceKey, item: &PlanItem) -> MutationOutcome {
        let payload = self.projector.resolve(item).await;
        self.runtime.project(target, payload).await
    }

    async fn project_cursor(&self, live: LiveState) -> Result<NavigationOutcome> {
        if !live.enabled {
            return Ok(NavigationOutcome::live_only(live));
        }
        let Some(plan_id) = live.plan_id.clone() else {
            debug!("live enabled without an active plan");
            return Ok(NavigationOutcome::live_only(live));
        };

        let plan = self
            .library
            .get_plan(&plan_id)
            .await
            .with_context(|| format!("failed to load plan {plan_id}"))?;
        let Some(plan) = plan else {
            warn!(plan = %plan_id, "live plan not found");
            return Ok(NavigationOutcome::live_only(live));
        };

        let items = plan.ordered_items();
        let Some(last) = items.len().checked_sub(1) else {
            warn!(plan = %plan_id, "live plan has no items");
            return Ok(NavigationOutcome::live_only(live));
        };
        let last = last as i64;

        let live = if live.cursor > last {
            debug!(cursor = live.cursor, last, "clamping cursor to last plan item");
            self.runtime.merge_live(LivePatch::cursor(last))
        } else {
            live
        };

        let index = live.cursor.clamp(0, last) as usize;
        let Some(item) = items.get(index) else {
            return Ok(NavigationOutcome::live_only(live));
        };

        let projection = self.project_item(live.target, item).await;
        debug!(
            cursor = live.cursor,
            item = %item.id,
            ok = projection.ok,
            "live item projected"
        );
        Ok(NavigationOutcome {
            live,
            projection: Some(projection),
        })
    }
}
