use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Summaries longer than this many characters are cut and suffixed with `...`
pub const SUMMARY_MAX_CHARS: usize = 150;

pub const DATE_FORMAT: &str = "%Y年%m月%d日 %H:%M";
pub const DATE_UNKNOWN: &str = "日付不明";
pub const SUMMARY_MISSING: &str = "要約がありません";

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").unwrap());

/// Publication time of an entry, or an explicit marker when the feed
/// omitted it or supplied something the parser could not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAt {
    Known(DateTime<Utc>),
    Unknown,
}

impl From<Option<DateTime<Utc>>> for PublishedAt {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(PublishedAt::Unknown, PublishedAt::Known)
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedAt::Known(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
            PublishedAt::Unknown => f.write_str(DATE_UNKNOWN),
        }
    }
}

/// A feed entry with its text already cleaned for display.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsEntry {
    pub title: String,
    pub link: String,
    pub published: PublishedAt,
    pub summary: String,
}

impl NewsEntry {
    pub fn from_feed_entry(entry: &feed_rs::model::Entry) -> Self {
        let title = entry
            .title
            .as_ref()
            .map(|t| decode_entities(&strip_tags(&t.content)))
            .unwrap_or_default();

        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        let summary = entry
            .summary
            .as_ref()
            .map(|s| decode_entities(&truncate_summary(&strip_tags(&s.content))))
            .unwrap_or_else(|| SUMMARY_MISSING.to_string());

        Self {
            title,
            link,
            published: entry.published.into(),
            summary,
        }
    }
}

pub fn entries_from_feed(feed: &feed_rs::model::Feed) -> Vec<NewsEntry> {
    feed.entries.iter().map(NewsEntry::from_feed_entry).collect()
}

pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Entities such as `&nbsp;` survive tag stripping; the page escapes its
/// text, so they are turned into characters here.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() > SUMMARY_MAX_CHARS {
        let mut cut: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}
