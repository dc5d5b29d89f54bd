use scraper::Html;
use source_interface::utils::slugify;
use source_interface::HomeSectionFeed;

use super::{first_text, selector, CardSelectors};
use crate::error::{Error, Result};
use crate::urls::ListingKind;

const KNOWN_SECTIONS: &[(&str, &str)] = &[
    ("hot manga releases", "hot_release"),
    ("being read right now", "being_read"),
    ("new manga releases", "new_manga"),
    ("latest updates", "latest_updates"),
];

/// Stable section id for a homepage block title.
pub fn section_id_for_title(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    KNOWN_SECTIONS
        .iter()
        .find(|(t, _)| *t == lower)
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| slugify(title))
}

/// Hand every homepage block to `on_section` as soon as it is built, in page order.
pub fn parse_home_sections<F>(doc: &Html, mut on_section: F) -> Result<()>
where
    F: FnMut(HomeSectionFeed),
{
    let root = doc.root_element();
    let blocks = selector("div.manga-list-1, div.manga-list-4")?;
    let heading = selector(".manga-list-1-title, .manga-list-4-title")?;
    let item = selector("li")?;
    let cards = CardSelectors::new()?;

    let mut seen_blocks = 0usize;
    let mut delivered = 0usize;
    for block in root.select(&blocks) {
        seen_blocks += 1;
        let Some(title) = first_text(block, &heading) else {
            tracing::debug!("homepage block without a title skipped");
            continue;
        };
        let id = section_id_for_title(&title);
        let view_more = id.parse::<ListingKind>().is_ok();
        let items = cards.collect(block.select(&item));
        tracing::debug!(section = %id, items = items.len(), "homepage section parsed");
        on_section(HomeSectionFeed { id, title, items, view_more });
        delivered += 1;
    }

    if seen_blocks == 0 {
        return Err(Error::missing("homepage sections"));
    }
    tracing::debug!(delivered, "homepage parsed");
    Ok(())
}
