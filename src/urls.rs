//! Outbound URL construction for every endpoint the adapter talks to.

use std::fmt;
use std::str::FromStr;

use source_interface::SearchQuery;
use url::{form_urlencoded, Url};

use crate::error::Error;

pub const BASE_URL: &str = "https://www.weebcentral.com";
pub const HOST: &str = "www.weebcentral.com";

/// Site-curated listings that back the "view more" homepage sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    HotReleases,
    NewSeries,
    LatestUpdates,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] =
        [ListingKind::HotReleases, ListingKind::NewSeries, ListingKind::LatestUpdates];

    pub fn section_id(self) -> &'static str {
        match self {
            ListingKind::HotReleases => "hot_release",
            ListingKind::NewSeries => "new_manga",
            ListingKind::LatestUpdates => "latest_updates",
        }
    }

    /// Path (with leading slash) of the listing page. The hot list is a single page.
    pub fn path(self, page: u32) -> String {
        match self {
            ListingKind::HotReleases => "/hot".to_string(),
            ListingKind::NewSeries => format!("/directory/{page}.html?news"),
            ListingKind::LatestUpdates => format!("/latest/{page}"),
        }
    }
}

impl FromStr for ListingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListingKind::ALL
            .into_iter()
            .find(|k| k.section_id() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown listing section `{s}`")))
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.section_id()) }
}

pub fn series_url(series_id: &str) -> String { format!("{BASE_URL}/manga/{series_id}") }

pub fn chapter_url(series_id: &str, chapter_id: &str) -> String {
    format!("{BASE_URL}/manga/{series_id}/{chapter_id}/1.html")
}

pub fn listing_url(kind: ListingKind, page: u32) -> String { format!("{BASE_URL}{}", kind.path(page)) }

pub fn tags_url() -> String { format!("{BASE_URL}/search?") }

/// `/search?page=..&title=..&genres=..`. `genres` is left out when no tag is included.
pub fn search_url(query: &SearchQuery, page: u32) -> String {
    let title = query.title.as_deref().unwrap_or("").trim();
    let mut url = format!("{BASE_URL}/search?page={page}&title={}", encode(title));
    if !query.included_tags.is_empty() {
        let ids = query.included_tags.iter().map(|t| t.id.as_str()).collect::<Vec<_>>().join(",");
        url.push_str("&genres=");
        url.push_str(&encode(&ids));
    }
    url
}

fn encode(s: &str) -> String { form_urlencoded::byte_serialize(s.as_bytes()).collect() }

/// Resolve `href` against `base`; handles absolute, root-relative and protocol-relative forms.
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() { return None; }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

/// Series id out of any link that points at `/manga/{id}[/...]`.
pub fn series_id_from_href(href: &str) -> Option<String> {
    let path = match Url::parse(href) {
        Ok(u) => u.path().to_string(),
        Err(_) => href.split(['?', '#']).next().unwrap_or("").to_string(),
    };
    let mut segs = path.split('/').filter(|s| !s.is_empty());
    while let Some(seg) = segs.next() {
        if seg == "manga" {
            return segs.next().map(str::to_string);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_interface::Tag;

    #[test]
    fn listing_paths_are_exact() {
        assert_eq!(listing_url(ListingKind::HotReleases, 4), "https://www.weebcentral.com/hot");
        assert_eq!(
            listing_url(ListingKind::NewSeries, 2),
            "https://www.weebcentral.com/directory/2.html?news"
        );
        assert_eq!(listing_url(ListingKind::LatestUpdates, 7), "https://www.weebcentral.com/latest/7");
    }

    #[test]
    fn listing_kind_round_trips_through_section_id() {
        for kind in ListingKind::ALL {
            assert_eq!(kind.section_id().parse::<ListingKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_section_is_invalid_argument() {
        let err = "being_read".parse::<ListingKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn search_url_encodes_title_and_joins_genres() {
        let q = SearchQuery {
            title: Some("One Piece".into()),
            included_tags: vec![
                Tag { id: "1".into(), label: "Action".into() },
                Tag { id: "2".into(), label: "Comedy".into() },
            ],
        };
        let url = search_url(&q, 2);
        assert!(url.contains("page=2"));
        assert!(url.contains("title=One+Piece"));
        assert!(url.contains("genres=1%2C2"));
    }

    #[test]
    fn search_url_tolerates_empty_inputs() {
        let url = search_url(&SearchQuery::default(), 1);
        assert_eq!(url, "https://www.weebcentral.com/search?page=1&title=");
    }

    #[test]
    fn absolutize_handles_protocol_relative() {
        assert_eq!(
            absolutize(BASE_URL, "//cdn.example.net/a.jpg").as_deref(),
            Some("https://cdn.example.net/a.jpg")
        );
        assert_eq!(
            absolutize("https://www.weebcentral.com/manga/x/c001/1.html", "2.jpg").as_deref(),
            Some("https://www.weebcentral.com/manga/x/c001/2.jpg")
        );
        assert_eq!(absolutize(BASE_URL, "  "), None);
    }

    #[test]
    fn series_id_from_relative_and_absolute_links() {
        assert_eq!(series_id_from_href("/manga/one_piece/").as_deref(), Some("one_piece"));
        assert_eq!(
            series_id_from_href("https://www.weebcentral.com/manga/berserk/c001/1.html").as_deref(),
            Some("berserk")
        );
        assert_eq!(series_id_from_href("/search?title=x"), None);
    }
}
