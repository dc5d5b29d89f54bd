use std::collections::HashSet;

use scraper::Html;
use source_interface::utils::slugify;
use source_interface::{Tag, TagSection, TagTaxonomy};

use super::{first_text, selector, text_of};
use crate::error::{Error, Result};

/// Tag groups from the search filter panel. Same-label groups are merged.
pub fn parse_tags(doc: &Html) -> Result<TagTaxonomy> {
    let root = doc.root_element();
    let boxes: Vec<_> = root.select(&selector("div.tag-box")?).collect();
    if boxes.is_empty() {
        return Err(Error::missing("search filter tags"));
    }

    let title = selector(".tag-box-title")?;
    let option = selector("a[data-val]")?;

    let mut sections: Vec<TagSection> = Vec::new();
    let mut seen: Vec<HashSet<String>> = Vec::new();
    for group in boxes {
        let label = group
            .value()
            .attr("data-group")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| first_text(group, &title))
            .unwrap_or_else(|| "genres".to_string());

        let pos = match sections.iter().position(|s| s.label == label) {
            Some(p) => p,
            None => {
                sections.push(TagSection { id: slugify(&label), label, tags: Vec::new() });
                seen.push(HashSet::new());
                sections.len() - 1
            }
        };

        for a in group.select(&option) {
            let id = a.value().attr("data-val").map(str::trim).unwrap_or_default();
            let label = text_of(a);
            if id.is_empty() || label.is_empty() {
                continue;
            }
            if seen[pos].insert(id.to_string()) {
                sections[pos].tags.push(Tag { id: id.to_string(), label });
            }
        }
    }

    tracing::debug!(groups = sections.len(), "parsed search tags");
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_label_in_page_order() {
        let html = r#"<html><body><div class="search-bar">
          <div class="tag-box"><p class="tag-box-title">Genres</p>
            <a data-val="1">Action</a><a data-val="2"> Adventure </a><a data-val="">Broken</a></div>
          <div class="tag-box" data-group="Type">
            <a data-val="manga">Manga</a><a data-val="manhwa">Manhwa</a></div>
          <div class="tag-box"><p class="tag-box-title">Genres</p>
            <a data-val="2">Adventure</a><a data-val="3">Comedy</a></div>
        </div></body></html>"#;
        let groups = parse_tags(&Html::parse_document(html)).unwrap();
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Genres", "Type"]);
        assert_eq!(groups[0].id, "genres");

        let genres: Vec<_> = groups[0].tags.iter().map(|t| (t.id.as_str(), t.label.as_str())).collect();
        assert_eq!(genres, [("1", "Action"), ("2", "Adventure"), ("3", "Comedy")]);
        assert_eq!(groups[1].tags.len(), 2);
    }

    #[test]
    fn unlabelled_group_defaults_to_genres() {
        let html = r#"<html><body><div class="tag-box"><a data-val="9">Drama</a></div></body></html>"#;
        let groups = parse_tags(&Html::parse_document(html)).unwrap();
        assert_eq!(groups[0].label, "genres");
        assert_eq!(groups[0].tags[0].id, "9");
    }

    #[test]
    fn no_filter_panel_is_missing_content() {
        let err = parse_tags(&Html::parse_document("<html><body></body></html>")).unwrap_err();
        assert!(matches!(err, Error::MissingContent(_)));
    }
}
