//! Bible references and verses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVerse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Parsed reference such as `John 3:16`, `1 John 1:8-10` or `Psalm 23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibleReference {
    pub book: String,
    pub chapter: u32,
    /// Inclusive verse range; `None` means the whole chapter.
    pub verses: Option<(u32, u32)>,
}

impl BibleReference {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let split = raw.rfind(' ')?;
        let (book, location) = (raw[..split].trim(), raw[split + 1..].trim());
        if book.is_empty() || location.is_empty() {
            return None;
        }

        let (chapter, verses) = match location.split_once(':') {
            None => (location.parse::<u32>().ok()?, None),
            Some((chapter, range)) => {
                let chapter = chapter.parse::<u32>().ok()?;
                let (start, end): (u32, u32) = match range.split_once('-') {
                    Some((start, end)) => (start.trim().parse().ok()?, end.trim().parse().ok()?),
                    None => {
                        let verse = range.trim().parse().ok()?;
                        (verse, verse)
                    }
                };
                if end < start {
                    return None;
                }
                (chapter, Some((start, end)))
            }
        };

        Some(Self {
            book: book.to_string(),
            chapter,
            verses,
        })
    }

    pub fn contains(&self, verse: &BibleVerse) -> bool {
        if !verse.book.eq_ignore_ascii_case(&self.book) || verse.chapter != self.chapter {
            return false;
        }
        match self.verses {
            None => true,
            Some((start, end)) => (start..=end).contains(&verse.verse),
        }
    }
}
