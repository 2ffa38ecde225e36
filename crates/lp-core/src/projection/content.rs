use serde::{Deserialize, Serialize};

use crate::ids::{BlockId, SongId};

/// Kind of media a surface can render from a file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Pdf,
}

/// Song provenance attached to text projected from a song block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMeta {
    pub song_id: SongId,
    pub song_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_title: Option<String>,
}

/// Content currently shown on a surface.
///
/// Content is always replaced as a whole, never merged field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionContent {
    Empty,
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta_song: Option<SongMeta>,
    },
    #[serde(rename_all = "camelCase")]
    Media {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        media_path: String,
        media_type: MediaType,
    },
}

impl Default for ProjectionContent {
    fn default() -> Self {
        ProjectionContent::Empty
    }
}

/// Text content request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub meta_song: Option<SongMeta>,
}

impl TextPayload {
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
            meta_song: None,
        }
    }
}

impl From<TextPayload> for ProjectionContent {
    fn from(payload: TextPayload) -> Self {
        ProjectionContent::Text {
            title: payload.title,
            body: payload.body,
            meta_song: payload.meta_song,
        }
    }
}

/// Media content request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    #[serde(default)]
    pub title: Option<String>,
    pub media_path: String,
    pub media_type: MediaType,
}

impl From<MediaPayload> for ProjectionContent {
    fn from(payload: MediaPayload) -> Self {
        ProjectionContent::Media {
            title: payload.title,
            media_path: payload.media_path,
            media_type: payload.media_type,
        }
    }
}
