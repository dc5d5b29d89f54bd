pub mod cancel;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod parser;
pub mod source;
pub mod transport;
pub mod urls;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::cancel::cancellable;
    pub use crate::error::{Error, Result};
    pub use crate::interceptor::SiteInterceptor;
    pub use crate::source::WeebCentral;
    pub use crate::transport::HttpTransport;
    pub use crate::urls::ListingKind;
    pub use source_interface::{
        ChapterDetails, ChapterImagePage, ChapterSummary, HomeSectionFeed, ListingPage, PagedResults,
        PaginationCursor, SearchQuery, SeriesDetail, SeriesStatus, SeriesSummary, Tag, TagSection,
        TagTaxonomy, Transport, TransportConfig,
    };
}

pub use error::{Error, Result};
pub use source::WeebCentral;
pub use source_interface;
