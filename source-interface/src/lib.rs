//! Host schema for manga source adapters.
//!
//! The host owns these shapes: adapters only ever produce values for them.
//! The transport seam lives here too so that a host can hand an adapter its
//! own scheduler, rate limiter and interceptor.

pub mod model;
pub mod transport;

pub use model::{
    ChapterDetails, ChapterImagePage, ChapterSummary, ContentRating, HomeSectionFeed, ListingPage,
    PagedResults, PaginationCursor, SearchQuery, SeriesDetail, SeriesStatus, SeriesSummary,
    SourceInfo, SourceIntents, Tag, TagSection, TagTaxonomy,
};
pub use transport::{Cookie, Interceptor, Request, Response, Transport, TransportConfig, TransportError};

// Common utilities and helper functions
pub mod utils {
    /// Collapse runs of whitespace into single spaces and trim both ends.
    pub fn squash_whitespace(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Lowercase slug with every run of non-alphanumerics replaced by `_`.
    pub fn slugify(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut pending = false;
        for c in s.trim().chars() {
            if c.is_alphanumeric() {
                if pending && !out.is_empty() {
                    out.push('_');
                }
                pending = false;
                out.extend(c.to_lowercase());
            } else {
                pending = true;
            }
        }
        out
    }

}
