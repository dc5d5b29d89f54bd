use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    #[default]
    Unknown,
}

impl SeriesStatus {
    /// Map free-form status text from a source page onto the closed set.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "ongoing" | "publishing" | "releasing" => SeriesStatus::Ongoing,
            "completed" | "complete" | "finished" => SeriesStatus::Completed,
            "hiatus" | "on hold" | "on-hold" => SeriesStatus::Hiatus,
            "cancelled" | "canceled" | "dropped" | "discontinued" => SeriesStatus::Cancelled,
            _ => SeriesStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSection {
    pub id: String,
    pub label: String,
    pub tags: Vec<Tag>,
}

/// Every searchable tag group a source exposes, in page order.
pub type TagTaxonomy = Vec<TagSection>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDetail {
    pub id: String,
    pub title: String,
    pub alt_titles: Vec<String>,
    pub description: String,
    pub cover_url: Option<String>,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub status: SeriesStatus,
    pub tags: Vec<TagSection>,
    pub share_url: String,
}

/// Lightweight card used by homepage feeds, listings and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: String,
    pub series_id: String,
    pub name: String,
    pub chapter_number: f32,
    pub volume: Option<f32>,
    pub published_at: DateTime<Utc>,
    pub lang_code: String,
    /// Position of the row on the source page. Hosts sort by this, never by date.
    pub sorting_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterImagePage {
    pub index: usize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDetails {
    pub id: String,
    pub series_id: String,
    pub pages: Vec<ChapterImagePage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSectionFeed {
    pub id: String,
    pub title: String,
    pub items: Vec<SeriesSummary>,
    /// Whether the host may ask for more of this section through a listing call.
    pub view_more: bool,
}

/// One page of cards as extracted from markup, before cursor bookkeeping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingPage {
    pub results: Vec<SeriesSummary>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    pub page: u32,
}

impl PaginationCursor {
    pub fn first() -> Self { Self { page: 1 } }

    /// Cursor for the following page, or `None` when the current one was the last.
    pub fn advance(self, has_next_page: bool) -> Option<Self> {
        let page = self.page.checked_add(1)?;
        has_next_page.then_some(Self { page })
    }
}

impl Default for PaginationCursor {
    fn default() -> Self { Self::first() }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResults {
    pub results: Vec<SeriesSummary>,
    pub metadata: Option<PaginationCursor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    #[serde(default)]
    pub included_tags: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentRating {
    Everyone,
    Mature,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceIntents {
    pub manga_chapters: bool,
    pub homepage_sections: bool,
    pub cloudflare_bypass_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub website_base_url: String,
    pub content_rating: ContentRating,
    pub intents: SourceIntents,
}
