use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use source_interface::{ChapterDetails, ChapterImagePage};

use super::{attr_any, selector};
use crate::error::{Error, Result};
use crate::urls::absolutize;

static SCRIPT_IMAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var\s+newImgs\s*=\s*\[([^\]]*)\]").expect("hardcoded regex pattern is valid")
});

/// Image URLs from the reader view, in page order.
///
/// Reader `<img>` elements win; the inline `newImgs` array some layouts ship
/// instead is used only when there are none. Relative sources are resolved
/// against `request_url`.
pub fn parse_chapter_details(
    doc: &Html,
    series_id: &str,
    chapter_id: &str,
    request_url: &str,
) -> Result<ChapterDetails> {
    let root = doc.root_element();

    let mut urls: Vec<String> = root
        .select(&selector("div.reader-main img, #viewer img")?)
        .filter_map(|img| attr_any(img, &["data-original", "data-src", "src"]))
        .filter(|src| !src.starts_with("data:"))
        .filter_map(|src| absolutize(request_url, &src))
        .collect();

    if urls.is_empty() {
        urls = root
            .select(&selector("script")?)
            .map(|s| s.text().collect::<String>())
            .find_map(|js| {
                let caps = SCRIPT_IMAGES.captures(&js)?;
                let found: Vec<String> = caps[1]
                    .split(',')
                    .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| absolutize(request_url, s))
                    .collect();
                Some(found)
            })
            .unwrap_or_default();
    }

    if urls.is_empty() {
        return Err(Error::missing(format!("no images for {series_id}/{chapter_id}")));
    }
    tracing::debug!(series_id, chapter_id, pages = urls.len(), "parsed chapter pages");

    Ok(ChapterDetails {
        id: chapter_id.to_string(),
        series_id: series_id.to_string(),
        pages: urls.into_iter().enumerate().map(|(index, url)| ChapterImagePage { index, url }).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.weebcentral.com/manga/berserk/c001/1.html";

    #[test]
    fn images_in_document_order() {
        let html = r#"<html><body><div class="reader-main">
            <img class="reader-main-img" data-original="//zjcdn.wc.net/store/berserk/c001/001.jpg" src="/loading.gif">
            <img class="reader-main-img" src="https://zjcdn.wc.net/store/berserk/c001/002.jpg">
            <img class="reader-main-img" src="003.jpg">
        </div></body></html>"#;
        let d = parse_chapter_details(&Html::parse_document(html), "berserk", "c001", URL).unwrap();
        let urls: Vec<_> = d.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://zjcdn.wc.net/store/berserk/c001/001.jpg",
                "https://zjcdn.wc.net/store/berserk/c001/002.jpg",
                "https://www.weebcentral.com/manga/berserk/c001/003.jpg",
            ]
        );
        assert_eq!(d.pages.iter().map(|p| p.index).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(d.id, "c001");
        assert_eq!(d.series_id, "berserk");
    }

    #[test]
    fn falls_back_to_inline_script_array() {
        let html = r#"<html><body><div class="reader-main"></div>
            <script>var chapter = 1; var newImgs = ['//zjcdn.wc.net/a/1.jpg','//zjcdn.wc.net/a/2.jpg'];</script>
        </body></html>"#;
        let d = parse_chapter_details(&Html::parse_document(html), "s", "c", URL).unwrap();
        assert_eq!(d.pages.len(), 2);
        assert_eq!(d.pages[1].url, "https://zjcdn.wc.net/a/2.jpg");
    }

    #[test]
    fn zero_images_is_missing_content() {
        let html = r#"<html><body><div class="reader-main"><p>This chapter has been removed.</p></div></body></html>"#;
        let err = parse_chapter_details(&Html::parse_document(html), "s", "c", URL).unwrap_err();
        assert!(matches!(err, Error::MissingContent(_)));
    }
}
