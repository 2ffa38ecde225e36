use anyhow::Result;
use async_trait::async_trait;

use crate::bible::BibleVerse;

#[async_trait]
pub trait BibleTextPort: Send + Sync {
    /// Resolve a human reference (`John 3:16-18`). `Ok(None)` when nothing
    /// matches.
    async fn lookup(&self, reference: &str) -> Result<Option<Vec<BibleVerse>>>;
}
