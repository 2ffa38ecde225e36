use anyhow::Result;
use async_trait::async_trait;

use crate::ids::{PlanId, SongId};
use crate::plan::{Plan, Song};

/// Read-only access to songs and plans.
///
/// 歌曲与服务计划的只读访问。
///
/// Conventions:
/// - `Ok(None)` means the reference is stale (deleted or never existed);
///   callers degrade gracefully.
/// - `Err` means the store itself failed (unreachable, corrupt file).
#[async_trait]
pub trait LibraryPort: Send + Sync {
    async fn get_plan(&self, plan_id: &PlanId) -> Result<Option<Plan>>;

    async fn get_song(&self, song_id: &SongId) -> Result<Option<Song>>;
}
