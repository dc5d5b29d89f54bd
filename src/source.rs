use std::sync::Arc;

use scraper::Html;
use source_interface::{
    ChapterDetails, ChapterSummary, ContentRating, HomeSectionFeed, PagedResults, PaginationCursor,
    Request, Response, SearchQuery, SeriesDetail, SourceInfo, SourceIntents, TagTaxonomy, Transport,
    TransportConfig,
};

use crate::error::{Error, Result};
use crate::interceptor::SiteInterceptor;
use crate::parser;
use crate::transport::HttpTransport;
use crate::urls::{self, ListingKind, BASE_URL};

const CHALLENGE_MARKERS: &[&str] = &["cf-browser-verification", "challenge-platform", "cf_chl_opt", "<title>Just a moment"];

/// Site adapter. Every public operation issues exactly one GET and runs one
/// extraction pass over the answer; paging further is the caller's job.
pub struct WeebCentral<T = HttpTransport> {
    transport: T,
}

impl WeebCentral<HttpTransport> {
    /// Adapter over the default reqwest transport with the site interceptor installed.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let interceptor = Arc::new(SiteInterceptor::new(config.user_agent.clone()));
        let transport = HttpTransport::new(config)?.with_interceptor(interceptor);
        Ok(Self { transport })
    }
}

impl<T: Transport> WeebCentral<T> {
    /// Adapter over a host-supplied transport. The host is expected to run
    /// [`SiteInterceptor`] (or an equivalent) itself.
    pub fn with_transport(transport: T) -> Self { Self { transport } }

    pub fn transport(&self) -> &T { &self.transport }

    pub fn source_info(&self) -> SourceInfo {
        SourceInfo {
            name: "WeebCentral".into(),
            version: "3.0.5".into(),
            author: "Plancktron".into(),
            description: "Extension that pulls manga from weebcentral.com".into(),
            website_base_url: BASE_URL.into(),
            content_rating: ContentRating::Mature,
            intents: SourceIntents {
                manga_chapters: true,
                homepage_sections: true,
                cloudflare_bypass_required: true,
            },
        }
    }

    pub fn share_url(&self, series_id: &str) -> String { urls::series_url(series_id) }

    /// Request a host should open in a browser view to clear a bot challenge.
    pub fn cloudflare_bypass_request(&self) -> Request { Request::get(format!("{BASE_URL}/")) }

    async fn fetch(&self, url: String) -> Result<Response> {
        let resp = self.transport.schedule(Request::get(url.clone())).await?;
        if matches!(resp.status, 403 | 503) && CHALLENGE_MARKERS.iter().any(|m| resp.body.contains(m)) {
            tracing::warn!(url = %url, status = resp.status, "cloudflare challenge");
            return Err(Error::CloudflareChallenge { url });
        }
        if !resp.is_success() {
            return Err(Error::Fetch { url, reason: format!("HTTP {}", resp.status) });
        }
        Ok(resp)
    }

    pub async fn fetch_series_details(&self, series_id: &str) -> Result<SeriesDetail> {
        let resp = self.fetch(urls::series_url(series_id)).await?;
        parser::parse_manga_details(&Html::parse_document(&resp.body), series_id)
    }

    pub async fn fetch_chapters(&self, series_id: &str) -> Result<Vec<ChapterSummary>> {
        let resp = self.fetch(urls::series_url(series_id)).await?;
        parser::parse_chapters(&Html::parse_document(&resp.body), series_id)
    }

    pub async fn fetch_chapter_images(&self, series_id: &str, chapter_id: &str) -> Result<ChapterDetails> {
        let url = urls::chapter_url(series_id, chapter_id);
        let resp = self.fetch(url.clone()).await?;
        // Resolve relative image paths against where we actually landed.
        let base = if resp.url.is_empty() { url } else { resp.url };
        parser::parse_chapter_details(&Html::parse_document(&resp.body), series_id, chapter_id, &base)
    }

    /// Sections reach `on_section` one by one, in page order, before this returns.
    pub async fn fetch_home_sections<F>(&self, on_section: F) -> Result<()>
    where
        F: FnMut(HomeSectionFeed),
    {
        let resp = self.fetch(BASE_URL.to_string()).await?;
        parser::parse_home_sections(&Html::parse_document(&resp.body), on_section)
    }

    /// One page of a "view more" listing. Unknown section ids fail before any request.
    pub async fn fetch_listing(&self, section_id: &str, cursor: Option<PaginationCursor>) -> Result<PagedResults> {
        let kind: ListingKind = section_id.parse()?;
        let cursor = cursor.unwrap_or_default();
        let resp = self.fetch(urls::listing_url(kind, cursor.page)).await?;
        let page = parser::parse_view_more(&Html::parse_document(&resp.body), kind)?;
        Ok(PagedResults { results: page.results, metadata: cursor.advance(page.has_next_page) })
    }

    pub async fn fetch_search_results(
        &self,
        query: &SearchQuery,
        cursor: Option<PaginationCursor>,
    ) -> Result<PagedResults> {
        let cursor = cursor.unwrap_or_default();
        let resp = self.fetch(urls::search_url(query, cursor.page)).await?;
        let page = parser::parse_search(&Html::parse_document(&resp.body))?;
        Ok(PagedResults { results: page.results, metadata: cursor.advance(page.has_next_page) })
    }

    pub async fn fetch_search_tags(&self) -> Result<TagTaxonomy> {
        let resp = self.fetch(urls::tags_url()).await?;
        parser::parse_tags(&Html::parse_document(&resp.body))
    }
}

impl<T> std::fmt::Debug for WeebCentral<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeebCentral").field("base_url", &BASE_URL).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_points_at_the_site() {
        let source = WeebCentral::new(&TransportConfig::default()).unwrap();
        assert_eq!(source.share_url("one_piece"), "https://www.weebcentral.com/manga/one_piece");
        assert_eq!(source.cloudflare_bypass_request().url, "https://www.weebcentral.com/");
        let info = source.source_info();
        assert_eq!(info.website_base_url, BASE_URL);
        assert!(info.intents.cloudflare_bypass_required);
        assert_eq!((info.name.as_str(), info.author.as_str(), info.version.as_str()), ("WeebCentral", "Plancktron", "3.0.5"));
    }
}
