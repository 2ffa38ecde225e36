//! Plans and songs as read from the library store.
//!
//! The core only reads these; ordering and uniqueness of `order` values are
//! guaranteed by the store.

use serde::{Deserialize, Serialize};

use crate::ids::{BlockId, PlanId, PlanItemId, SongId};

/// Kind of a plan item.
///
/// The store keeps kinds as free-form strings; anything not recognised here
/// becomes [`PlanItemKind::Other`] and is projected as generic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanItemKind {
    SongBlock,
    AnnouncementText,
    AnnouncementImage,
    AnnouncementPdf,
    VerseManual,
    BibleVerse,
    BiblePassage,
    Other(String),
}

impl PlanItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            PlanItemKind::SongBlock => "SONG_BLOCK",
            PlanItemKind::AnnouncementText => "ANNOUNCEMENT_TEXT",
            PlanItemKind::AnnouncementImage => "ANNOUNCEMENT_IMAGE",
            PlanItemKind::AnnouncementPdf => "ANNOUNCEMENT_PDF",
            PlanItemKind::VerseManual => "VERSE_MANUAL",
            PlanItemKind::BibleVerse => "BIBLE_VERSE",
            PlanItemKind::BiblePassage => "BIBLE_PASSAGE",
            PlanItemKind::Other(raw) => raw,
        }
    }
}

impl From<&str> for PlanItemKind {
    fn from(raw: &str) -> Self {
        match raw {
            "SONG_BLOCK" => PlanItemKind::SongBlock,
            "ANNOUNCEMENT_TEXT" => PlanItemKind::AnnouncementText,
            "ANNOUNCEMENT_IMAGE" => PlanItemKind::AnnouncementImage,
            "ANNOUNCEMENT_PDF" => PlanItemKind::AnnouncementPdf,
            "VERSE_MANUAL" => PlanItemKind::VerseManual,
            "BIBLE_VERSE" => PlanItemKind::BibleVerse,
            "BIBLE_PASSAGE" => PlanItemKind::BiblePassage,
            other => PlanItemKind::Other(other.to_string()),
        }
    }
}

impl Serialize for PlanItemKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlanItemKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PlanItemKind::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: PlanItemId,
    pub order: i64,
    pub kind: PlanItemKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Song id for `SONG_BLOCK`, free reference otherwise.
    #[serde(default)]
    pub ref_id: Option<String>,
    /// Block id for `SONG_BLOCK`.
    #[serde(default)]
    pub ref_sub_id: Option<String>,
    #[serde(default)]
    pub media_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<PlanItem>,
}

impl Plan {
    /// Items in presentation order.
    pub fn ordered_items(&self) -> Vec<&PlanItem> {
        let mut items: Vec<&PlanItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.order);
        items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongBlock {
    pub id: BlockId,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<SongBlock>,
}

impl Song {
    /// Block by id, falling back to the first block in order.
    pub fn block_or_first(&self, block_id: Option<&str>) -> Option<&SongBlock> {
        block_id
            .and_then(|id| self.blocks.iter().find(|block| block.id.as_str() == id))
            .or_else(|| self.blocks.iter().min_by_key(|block| block.order))
    }
}
