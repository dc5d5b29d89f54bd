use scraper::Html;
use source_interface::ListingPage;

use super::{is_last_page, selector, CardSelectors};
use crate::error::{Error, Result};
use crate::urls::ListingKind;

const LIST_CONTAINER: &str = "ul.manga-list-1-list, ul.manga-list-4-list";

fn parse_card_grid(doc: &Html, what: &str) -> Result<ListingPage> {
    let root = doc.root_element();
    let container = selector(LIST_CONTAINER)?;
    let lists: Vec<_> = root.select(&container).collect();
    if lists.is_empty() {
        return Err(Error::missing(format!("{what} result list")));
    }

    let item = selector("li")?;
    let cards = CardSelectors::new()?;
    let results = cards.collect(lists.into_iter().flat_map(|ul| ul.select(&item)));
    let has_next_page = !is_last_page(doc);
    tracing::debug!(what, count = results.len(), has_next_page, "parsed listing");
    Ok(ListingPage { results, has_next_page })
}

/// Search result grid. Zero cards is a valid, empty page.
pub fn parse_search(doc: &Html) -> Result<ListingPage> { parse_card_grid(doc, "search") }

pub fn parse_view_more(doc: &Html, kind: ListingKind) -> Result<ListingPage> {
    parse_card_grid(doc, kind.section_id())
}
