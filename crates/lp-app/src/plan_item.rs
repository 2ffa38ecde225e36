//! Plan item → projection payload.
//!
//! Navigation must never get stuck on one stale item: a missing song or block,
//! a store failure or an unknown item kind all degrade to a text projection.

use std::sync::Arc;

use lp_core::bible::BibleVerse;
use lp_core::ports::{BibleTextPort, LibraryPort};
use lp_core::{MediaPayload, MediaType, PlanItem, PlanItemKind, SongId, SongMeta, TextPayload};
use tracing::warn;

pub const MISSING_SONG_BODY: &str = "This song is no longer available in the library.";
pub const MISSING_MEDIA_BODY: &str = "This item has no media file attached.";

/// What a plan item turns into on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionPayload {
    Text(TextPayload),
    Media(MediaPayload),
}

pub struct PlanItemProjector {
    library: Arc<dyn LibraryPort>,
    bible: Arc<dyn BibleTextPort>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn generic_text(item: &PlanItem) -> ProjectionPayload {
    ProjectionPayload::Text(TextPayload::new(
        trimmed(item.title.as_deref()),
        item.content.as_deref().unwrap_or("").trim(),
    ))
}

fn render_verses(verses: &[BibleVerse]) -> String {
    verses
        .iter()
        .map(|verse| format!("{} {}", verse.verse, verse.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl PlanItemProjector {
    pub fn new(library: Arc<dyn LibraryPort>, bible: Arc<dyn BibleTextPort>) -> Self {
        Self { library, bible }
    }

    pub async fn resolve(&self, item: &PlanItem) -> ProjectionPayload {
        match &item.kind {
            PlanItemKind::SongBlock => self.resolve_song_block(item).await,
            PlanItemKind::AnnouncementImage => Self::resolve_media(item, MediaType::Image),
            PlanItemKind::AnnouncementPdf => Self::resolve_media(item, MediaType::Pdf),
            PlanItemKind::BibleVerse | PlanItemKind::BiblePassage => {
                self.resolve_bible(item).await
            }
            PlanItemKind::AnnouncementText | PlanItemKind::VerseManual | PlanItemKind::Other(_) => {
                generic_text(item)
            }
        }
    }

    fn resolve_media(item: &PlanItem, media_type: MediaType) -> ProjectionPayload {
        match trimmed(item.media_path.as_deref()) {
            Some(media_path) => ProjectionPayload::Media(MediaPayload {
                title: trimmed(item.title.as_deref()),
                media_path,
                media_type,
            }),
            None => {
                warn!(item = %item.id, kind = item.kind.as_str(), "media item without a path");
                ProjectionPayload::Text(TextPayload::new(
                    trimmed(item.title.as_deref()),
                    MISSING_MEDIA_BODY,
                ))
            }
        }
    }

    async fn resolve_song_block(&self, item: &PlanItem) -> ProjectionPayload {
        let placeholder = || {
            ProjectionPayload::Text(TextPayload::new(
                trimmed(item.title.as_deref()).or_else(|| Some("Missing song".to_string())),
                MISSING_SONG_BODY,
            ))
        };

        let Some(song_id) = trimmed(item.ref_id.as_deref()).map(SongId::from) else {
            warn!(item = %item.id, "song block item without a song reference");
            return placeholder();
        };

        let song = match self.library.get_song(&song_id).await {
            Ok(Some(song)) => song,
            Ok(None) => {
                warn!(item = %item.id, song = %song_id, "referenced song not found");
                return placeholder();
            }
            Err(err) => {
                warn!(item = %item.id, song = %song_id, error = %err, "song lookup failed");
                return placeholder();
            }
        };

        let Some(block) = song.block_or_first(item.ref_sub_id.as_deref()) else {
            warn!(item = %item.id, song = %song_id, "song has no blocks");
            return placeholder();
        };

        let block_title = trimmed(Some(block.title.as_str()));
        let title = match &block_title {
            Some(block_title) => format!("{} — {}", song.title, block_title),
            None => song.title.clone(),
        };

        ProjectionPayload::Text(TextPayload {
            title: Some(title),
            body: block.content.trim().to_string(),
            meta_song: Some(SongMeta {
                song_id: song.id.clone(),
                song_title: song.title.clone(),
                block_id: Some(block.id.clone()),
                block_title,
            }),
        })
    }

    async fn resolve_bible(&self, item: &PlanItem) -> ProjectionPayload {
        if trimmed(item.content.as_deref()).is_some() {
            return generic_text(item);
        }

        let Some(reference) =
            trimmed(item.ref_id.as_deref()).or_else(|| trimmed(item.title.as_deref()))
        else {
            return generic_text(item);
        };

        match self.bible.lookup(&reference).await {
            Ok(Some(verses)) if !verses.is_empty() => ProjectionPayload::Text(TextPayload::new(
                trimmed(item.title.as_deref()).or(Some(reference)),
                render_verses(&verses),
            )),
            Ok(_) => {
                warn!(item = %item.id, reference = %reference, "no verses found for reference");
                generic_text(item)
            }
            Err(err) => {
                warn!(item = %item.id, reference = %reference, error = %err, "bible lookup failed");
                generic_text(item)
            }
        }
    }
}
