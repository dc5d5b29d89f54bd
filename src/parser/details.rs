use scraper::Html;
use source_interface::{SeriesDetail, SeriesStatus, Tag, TagSection};

use super::{attr_any, first_text, selector, text_of};
use crate::error::{Error, Result};
use crate::urls::{absolutize, series_url, BASE_URL};

pub fn parse_manga_details(doc: &Html, series_id: &str) -> Result<SeriesDetail> {
    let root = doc.root_element();

    let title = first_text(root, &selector("span.detail-info-right-title-font")?)
        .ok_or_else(|| Error::missing(format!("series title for {series_id}")))?;

    let alt_titles = first_text(root, &selector("p.detail-info-right-title-alt")?)
        .map(|s| {
            s.split([';', '|'])
                .map(str::trim)
                .filter(|t| !t.is_empty() && *t != title)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    let fallback_description = selector("p.detail-info-right-content")?;
    let description = first_text(root, &selector("p.fullcontent")?)
        .or_else(|| first_text(root, &fallback_description))
        .unwrap_or_default();

    let cover_url = root
        .select(&selector("img.detail-info-cover-img")?)
        .next()
        .and_then(|img| attr_any(img, &["data-original", "src"]))
        .and_then(|src| absolutize(BASE_URL, &src));

    // "Author: A, B" then optionally "Artist: C"
    let mut author = None;
    let mut artist = None;
    let link = selector("a")?;
    for say in root.select(&selector("p.detail-info-right-say")?) {
        let names: Vec<String> = say.select(&link).map(text_of).filter(|n| !n.is_empty()).collect();
        if names.is_empty() { continue; }
        let joined = names.join(", ");
        if text_of(say).to_ascii_lowercase().starts_with("artist") {
            artist = Some(joined);
        } else if author.is_none() {
            author = Some(joined);
        }
    }

    let status = first_text(root, &selector("span.detail-info-right-title-tip")?)
        .map(|s| SeriesStatus::from_label(&s))
        .unwrap_or_default();

    let tags: Vec<Tag> = root
        .select(&selector("p.detail-info-right-tag-list a")?)
        .filter_map(|a| {
            let label = text_of(a);
            let id = a
                .value()
                .attr("href")?
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())?
                .to_string();
            (!label.is_empty()).then_some(Tag { id, label })
        })
        .collect();

    let artist = artist.or_else(|| author.clone());

    Ok(SeriesDetail {
        id: series_id.to_string(),
        title,
        alt_titles,
        description,
        cover_url,
        author,
        artist,
        status,
        tags: vec![TagSection { id: "0".into(), label: "genres".into(), tags }],
        share_url: series_url(series_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
      <div class="detail-info">
        <div class="detail-info-cover"><img class="detail-info-cover-img" src="//fmcdn.wc.net/store/manga/1/cover.jpg"></div>
        <div class="detail-info-right">
          <p class="detail-info-right-title">
            <span class="detail-info-right-title-font">Berserk</span>
            <span class="detail-info-right-title-tip">Ongoing</span>
          </p>
          <p class="detail-info-right-title-alt">Berserk; ベルセルク</p>
          <p class="detail-info-right-say">Author: <a href="/search/author/Miura/" title="Miura">Miura Kentarou</a></p>
          <p class="detail-info-right-tag-list">
            <a href="/directory/action/" title="Action">Action</a>
            <a href="/directory/seinen/" title="Seinen">Seinen</a>
          </p>
          <p class="fullcontent">Guts, a former mercenary.</p>
        </div>
      </div>
    </body></html>"#;

    #[test]
    fn extracts_every_field() {
        let d = parse_manga_details(&Html::parse_document(PAGE), "berserk").unwrap();
        assert_eq!(d.id, "berserk");
        assert_eq!(d.title, "Berserk");
        assert_eq!(d.alt_titles, vec!["ベルセルク".to_string()]);
        assert_eq!(d.description, "Guts, a former mercenary.");
        assert_eq!(d.cover_url.as_deref(), Some("https://fmcdn.wc.net/store/manga/1/cover.jpg"));
        assert_eq!(d.author.as_deref(), Some("Miura Kentarou"));
        assert_eq!(d.artist.as_deref(), Some("Miura Kentarou"));
        assert_eq!(d.status, SeriesStatus::Ongoing);
        assert_eq!(d.share_url, "https://www.weebcentral.com/manga/berserk");
        let ids: Vec<_> = d.tags[0].tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["action", "seinen"]);
    }

    #[test]
    fn unknown_status_maps_to_unknown() {
        let html = PAGE.replace(">Ongoing<", ">Licensed<");
        let d = parse_manga_details(&Html::parse_document(&html), "berserk").unwrap();
        assert_eq!(d.status, SeriesStatus::Unknown);
    }

    #[test]
    fn short_synopsis_used_without_full_content() {
        let html = PAGE.replace(r#"<p class="fullcontent">"#, r#"<p class="detail-info-right-content">"#);
        let d = parse_manga_details(&Html::parse_document(&html), "berserk").unwrap();
        assert_eq!(d.description, "Guts, a former mercenary.");
    }

    #[test]
    fn missing_title_is_missing_content() {
        let html = "<html><body><p class=\"fullcontent\">orphan synopsis</p></body></html>";
        let err = parse_manga_details(&Html::parse_document(html), "x").unwrap_err();
        assert!(matches!(err, Error::MissingContent(_)));
    }
}
