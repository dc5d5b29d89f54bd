//! Markup extraction: pure functions from a parsed page to host model values.
//!
//! Nothing in here touches the network or keeps state between calls. Every
//! extractor tells "the page has no results" (an empty `Ok`) apart from "the
//! page does not look like we expect" (`Error::MissingContent`).

mod chapters;
mod dates;
mod details;
mod home;
mod listing;
mod pages;
mod tags;

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use source_interface::utils::squash_whitespace;
use source_interface::SeriesSummary;

use crate::error::{Error, Result};
use crate::urls::{absolutize, series_id_from_href, BASE_URL};

pub use chapters::parse_chapters;
pub use dates::parse_date;
pub use details::parse_manga_details;
pub use home::{parse_home_sections, section_id_for_title};
pub use listing::{parse_search, parse_view_more};
pub use pages::parse_chapter_details;
pub use tags::parse_tags;

pub(crate) fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector { css, reason: e.to_string() })
}

/// Whitespace-normalised text content of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    squash_whitespace(&el.text().collect::<String>())
}

/// Text of the first match under `scope`, if it is non-empty.
pub(crate) fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(text_of).filter(|t| !t.is_empty())
}

/// First non-empty attribute among `names`, trimmed.
pub(crate) fn attr_any(el: ElementRef<'_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| el.value().attr(n))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// True when the pagination strip is missing or carries no usable "next" link.
pub fn is_last_page(doc: &Html) -> bool {
    let (Ok(pager), Ok(link)) = (Selector::parse("div.pager-list-left"), Selector::parse("a")) else {
        return true;
    };
    let Some(region) = doc.select(&pager).next() else { return true };
    let Some(last) = region.select(&link).last() else { return true };

    let disabled = last.value().classes().any(|c| c == "disabled")
        || last
            .value()
            .attr("href")
            .map(|h| h.trim().is_empty() || h.starts_with("javascript"))
            .unwrap_or(true);
    !(text_of(last).contains('>') && !disabled)
}

pub(crate) struct CardSelectors {
    link: Selector,
    title: Selector,
    image: Selector,
    subtitle: Selector,
}

impl CardSelectors {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            link: selector("a[href]")?,
            title: selector(r#"[class$="-item-title"]"#)?,
            image: selector("img")?,
            subtitle: selector(r#"[class$="-item-subtitle"]"#)?,
        })
    }

    /// One series card (`<li>` in a list grid). `None` when it has no id or title.
    pub(crate) fn parse(&self, card: ElementRef<'_>) -> Option<SeriesSummary> {
        let (link, id) = card
            .select(&self.link)
            .find_map(|a| a.value().attr("href").and_then(series_id_from_href).map(|id| (a, id)))?;

        let title = link
            .value()
            .attr("title")
            .map(squash_whitespace)
            .filter(|t| !t.is_empty())
            .or_else(|| first_text(card, &self.title))
            .or_else(|| Some(text_of(link)).filter(|t| !t.is_empty()))?;

        let cover_url = card
            .select(&self.image)
            .next()
            .and_then(|img| attr_any(img, &["data-original", "data-src", "src"]))
            .and_then(|src| absolutize(BASE_URL, &src));

        Some(SeriesSummary { id, title, cover_url, subtitle: first_text(card, &self.subtitle) })
    }

    /// Parse every card, keeping the first occurrence of each series id.
    pub(crate) fn collect<'a>(&self, cards: impl Iterator<Item = ElementRef<'a>>) -> Vec<SeriesSummary> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for card in cards {
            match self.parse(card) {
                Some(s) if seen.insert(s.id.clone()) => out.push(s),
                Some(s) => tracing::trace!(id = %s.id, "duplicate series card skipped"),
                None => tracing::debug!("series card without id or title skipped"),
            }
        }
        out
    }
}
