use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lp_core::bible::{BibleReference, BibleVerse};
use lp_core::ports::BibleTextPort;
use tokio::fs;
use tracing::{debug, info, warn};

/// Local Bible text, loaded once into memory.
///
/// 本地圣经数据集（JSON 数组，每项为一节经文）。
pub struct JsonBibleDataset {
    verses: Vec<BibleVerse>,
}

impl JsonBibleDataset {
    pub fn new(verses: Vec<BibleVerse>) -> Self {
        Self { verses }
    }

    /// Load `path`. A missing dataset yields an empty one: Bible items then
    /// project their own content only.
    pub async fn open(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "bible dataset missing, lookups will find nothing");
                return Ok(Self::new(Vec::new()));
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read bible dataset failed: {}", path.display()))
            }
        };

        let verses: Vec<BibleVerse> = serde_json::from_str(&content)
            .with_context(|| format!("parse bible dataset failed: {}", path.display()))?;
        info!(path = %path.display(), verses = verses.len(), "bible dataset loaded");
        Ok(Self::new(verses))
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

#[async_trait]
impl BibleTextPort for JsonBibleDataset {
    async fn lookup(&self, reference: &str) -> Result<Option<Vec<BibleVerse>>> {
        let Some(parsed) = BibleReference::parse(reference) else {
            debug!(reference, "unparseable bible reference");
            return Ok(None);
        };

        let mut found: Vec<BibleVerse> = self
            .verses
            .iter()
            .filter(|verse| parsed.contains(verse))
            .cloned()
            .collect();
        found.sort_by_key(|verse| verse.verse);

        Ok((!found.is_empty()).then_some(found))
    }
}
