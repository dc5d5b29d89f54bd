use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::Html;
use source_interface::ChapterSummary;

use super::dates::parse_date;
use super::{first_text, selector};
use crate::error::{Error, Result};

struct Patterns {
    chapter: Regex,
    volume: Regex,
    name_number: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    chapter: Regex::new(r"(?:^|/)c(\d+(?:\.\d+)?)").expect("hardcoded regex pattern is valid"),
    volume: Regex::new(r"(?:^|/)v(\d+(?:\.\d+)?)").expect("hardcoded regex pattern is valid"),
    name_number: Regex::new(r"(?i)ch(?:apter)?\.?\s*(\d+(?:\.\d+)?)").expect("hardcoded regex pattern is valid"),
});

/// Chapter id is everything between the series segment and the trailing `N.html` page.
fn chapter_id_from_href(href: &str, series_id: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or("");
    let mut segs: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .skip_while(|s| *s != series_id)
        .skip(1)
        .collect();
    if segs.last().is_some_and(|s| s.ends_with(".html")) {
        segs.pop();
    }
    (!segs.is_empty()).then(|| segs.join("/"))
}

fn capture_f32(re: &Regex, s: &str) -> Option<f32> {
    re.captures(s).and_then(|c| c[1].parse().ok())
}

pub fn parse_chapters(doc: &Html, series_id: &str) -> Result<Vec<ChapterSummary>> {
    parse_chapters_at(doc, series_id, Utc::now())
}

pub(crate) fn parse_chapters_at(doc: &Html, series_id: &str, now: DateTime<Utc>) -> Result<Vec<ChapterSummary>> {
    let root = doc.root_element();
    let list = root
        .select(&selector("div#chapterlist")?)
        .next()
        .ok_or_else(|| Error::missing(format!("chapter list for {series_id}")))?;
    let pats = &*PATTERNS;

    let row = selector("ul li > a")?;
    let title = selector("p.title3")?;
    let date = selector("p.title2")?;

    let mut chapters = Vec::new();
    for a in list.select(&row) {
        let Some(id) = a.value().attr("href").and_then(|h| chapter_id_from_href(h, series_id)) else {
            tracing::warn!(series_id, "chapter row without a usable link skipped");
            continue;
        };

        let name = first_text(a, &title)
            .or_else(|| a.value().attr("title").map(str::trim).filter(|t| !t.is_empty()).map(str::to_string));
        let chapter_number = capture_f32(&pats.chapter, &id)
            .or_else(|| name.as_deref().and_then(|n| capture_f32(&pats.name_number, n)))
            .unwrap_or(0.0);
        let volume = capture_f32(&pats.volume, &id);

        let published_at = match first_text(a, &date) {
            Some(raw) => parse_date(&raw, now).unwrap_or_else(|| {
                tracing::debug!(raw = %raw, "unparsed chapter date, using now");
                now
            }),
            None => now,
        };

        chapters.push(ChapterSummary {
            name: name.unwrap_or_else(|| format!("Chapter {chapter_number}")),
            id,
            series_id: series_id.to_string(),
            chapter_number,
            volume,
            published_at,
            lang_code: "en".to_string(),
            sorting_index: chapters.len(),
        });
    }

    tracing::debug!(series_id, count = chapters.len(), "parsed chapters");
    Ok(chapters)
}
