//! Search token to record predicate.
//!
//! Pure and stateless: applying the filter before or after the store's
//! ordering step gives identical results.

use crate::infrastructure::storage::db::models::clip_record::DbClipRecord;
use crate::payload::ClipKind;

/// Reserved token that filters by content kind instead of substring.
const IMAGE_TOKEN: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// Empty/whitespace token: match everything.
    All,
    /// The reserved "image" token (case-insensitive).
    ImagesOnly,
    /// Case-insensitive substring over text payload, display name and tags.
    Substring(String),
}

impl SearchFilter {
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            SearchFilter::All
        } else if trimmed.eq_ignore_ascii_case(IMAGE_TOKEN) {
            SearchFilter::ImagesOnly
        } else {
            SearchFilter::Substring(trimmed.to_lowercase())
        }
    }

    pub fn matches(&self, record: &DbClipRecord) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::ImagesOnly => record.clip_kind() == Some(ClipKind::Image),
            SearchFilter::Substring(needle) => {
                // Image rows keep the encoded bitmap in `content`; only the
                // text payload of text rows participates in substring search.
                if record.clip_kind() == Some(ClipKind::Text)
                    && record.content.to_lowercase().contains(needle)
                {
                    return true;
                }
                if let Some(name) = &record.display_name {
                    if name.to_lowercase().contains(needle) {
                        return true;
                    }
                }
                record.joined_tags().to_lowercase().contains(needle)
            }
        }
    }
}
