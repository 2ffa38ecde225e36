use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use lp_core::ports::LibraryPort;
use lp_core::{Plan, PlanId, Song, SongId};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

/// On-disk layout of the library file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryFile {
    pub songs: Vec<Song>,
    pub plans: Vec<Plan>,
}

/// Read-only library backed by a single JSON file.
///
/// The file is re-read on every lookup so edits made by the library editor
/// show up on the next navigation step without a restart. A missing file is an
/// empty library.
pub struct JsonLibraryStore {
    path: PathBuf,
}

impl JsonLibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<LibraryFile> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "library file missing, treating as empty");
                return Ok(LibraryFile::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read library failed: {}", self.path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse library failed: {}", self.path.display()))
    }
}

#[async_trait]
impl LibraryPort for JsonLibraryStore {
    async fn get_plan(&self, plan_id: &PlanId) -> Result<Option<Plan>> {
        let library = self.load().await?;
        Ok(library.plans.into_iter().find(|plan| &plan.id == plan_id))
    }

    async fn get_song(&self, song_id: &SongId) -> Result<Option<Song>> {
        let library = self.load().await?;
        Ok(library.songs.into_iter().find(|song| &song.id == song_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn write_library(dir: &TempDir, value: serde_json::Value) -> JsonLibraryStore {
        let path = dir.path().join("library.json");
        fs::write(&path, value.to_string()).await.unwrap();
        JsonLibraryStore::new(path)
    }

    #[tokio::test]
    async fn finds_plans_and_songs_by_id() {
        let dir = TempDir::new().unwrap();
        let store = write_library(
            &dir,
            json!({
                "songs": [{
                    "id": "grace",
                    "title": "Amazing Grace",
                    "blocks": [{ "id": "v1", "order": 1, "title": "Verse 1", "content": "..." }]
                }],
                "plans": [{
                    "id": "sunday",
                    "title": "Sunday",
                    "items": [{ "id": "i1", "order": 1, "kind": "SONG_BLOCK", "refId": "grace" }]
                }]
            }),
        )
        .await;

        let plan = store.get_plan(&PlanId::from("sunday")).await.unwrap().unwrap();
        assert_eq!(plan.items.len(), 1);
        let song = store.get_song(&SongId::from("grace")).await.unwrap().unwrap();
        assert_eq!(song.title, "Amazing Grace");
        assert!(store.get_song(&SongId::from("other")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_file_is_empty_library() {
        let dir = TempDir::new().unwrap();
        let store = JsonLibraryStore::new(dir.path().join("nope.json"));

        assert!(store.get_plan(&PlanId::from("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{ not json").await.unwrap();
        let store = JsonLibraryStore::new(&path);

        let err = store.get_plan(&PlanId::from("x")).await.unwrap_err();
        assert!(err.to_string().contains("parse library failed"));
    }

    #[tokio::test]
    async fn edits_are_seen_without_reopening() {
        let dir = TempDir::new().unwrap();
        let store = write_library(&dir, json!({ "plans": [] })).await;
        assert!(store.get_plan(&PlanId::from("p")).await.unwrap().is_none());

        fs::write(
            store.path(),
            json!({ "plans": [{ "id": "p", "title": "P", "items": [] }] }).to_string(),
        )
        .await
        .unwrap();

        assert!(store.get_plan(&PlanId::from("p")).await.unwrap().is_some());
    }
}
