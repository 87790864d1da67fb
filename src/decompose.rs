use anyhow::{Context, Result};
use regex::Regex;

use crate::views::{ViewLocale, ViewParse};

/// One video as read from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub title: String,
    pub hashtags: Vec<String>,
    pub raw_view_text: String,
    pub views: ViewParse,
}

impl VideoEntry {
    pub fn view_count(&self) -> u128 {
        self.views.count()
    }

    /// Hashtags as stored in the report, space separated.
    pub fn hashtag_line(&self) -> String {
        self.hashtags.join(" ")
    }
}

/// Splits a raw fragment into title, hashtags and view phrase.
pub struct Decomposer {
    locale: ViewLocale,
    view_phrase: Regex,
    hashtag: Regex,
}

impl Decomposer {
    pub fn new(locale: &ViewLocale) -> Result<Self> {
        let view_phrase = Regex::new(&locale.phrase_pattern())
            .context("Failed to compile view phrase pattern")?;
        let hashtag = Regex::new(r"#\w+").context("Failed to compile hashtag pattern")?;

        Ok(Self {
            locale: locale.clone(),
            view_phrase,
            hashtag,
        })
    }

    /// `#\w+` tokens of `text`, in order, duplicates kept.
    pub fn hashtags<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.hashtag.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn decompose(&self, fragment: &str) -> VideoEntry {
        let raw_view_text = self
            .view_phrase
            .find(fragment)
            .map(|m| m.as_str())
            .unwrap_or_default();

        let (title, hashtags) = match fragment.find('#') {
            Some(start) => {
                let rest = &fragment[start..];
                let segment = rest.find(',').map_or(rest, |end| &rest[..end]);
                let tags = self.hashtags(segment).into_iter().map(String::from).collect();
                let title = without_views(&fragment[..start], raw_view_text);
                let title = title.trim().trim_end_matches([',', '-']).trim();
                (title.to_string(), tags)
            }
            None => (
                without_views(fragment, raw_view_text).trim().to_string(),
                Vec::new(),
            ),
        };

        VideoEntry {
            title,
            hashtags,
            raw_view_text: raw_view_text.to_string(),
            views: self.locale.parse(raw_view_text),
        }
    }
}

fn without_views(text: &str, raw_view_text: &str) -> String {
    if raw_view_text.is_empty() {
        text.to_string()
    } else {
        text.replace(raw_view_text, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decompose(fragment: &str) -> VideoEntry {
        Decomposer::new(&ViewLocale::default())
            .unwrap()
            .decompose(fragment)
    }

    #[test]
    fn splits_title_hashtags_and_views() {
        let entry = decompose("My Title #foo #bar, 觀看次數：500次");
        assert_eq!(entry.title, "My Title");
        assert_eq!(entry.hashtag_line(), "#foo #bar");
        assert_eq!(entry.raw_view_text, "觀看次數：500次");
        assert_eq!(entry.view_count(), 500);
    }

    #[test]
    fn fragment_without_hashtags() {
        let entry = decompose("Solo Title 觀看次數：10次");
        assert_eq!(entry.title, "Solo Title");
        assert_eq!(entry.hashtag_line(), "");
        assert_eq!(entry.view_count(), 10);
    }

    #[test]
    fn hashtag_segment_runs_to_end_without_comma() {
        let entry = decompose("Cat jumps #cat #funny 觀看次數：3.4萬次");
        assert_eq!(entry.title, "Cat jumps");
        assert_eq!(entry.hashtags, vec!["#cat", "#funny"]);
        assert_eq!(entry.view_count(), 34_000);
    }

    #[test]
    fn view_phrase_removed_from_title_before_hashtag() {
        let entry = decompose("觀看次數：1次 Front loaded - #x");
        assert_eq!(entry.title, "Front loaded");
        assert_eq!(entry.hashtags, vec!["#x"]);
    }

    #[test]
    fn duplicate_hashtags_are_kept() {
        let entry = decompose("Loop #a #a #b, 觀看次數：1次");
        assert_eq!(entry.hashtag_line(), "#a #a #b");
    }

    #[test]
    fn missing_fields_are_empty() {
        let entry = decompose("");
        assert_eq!(entry.title, "");
        assert!(entry.hashtags.is_empty());
        assert_eq!(entry.raw_view_text, "");
        assert_eq!(entry.views, ViewParse::Empty);

        let entry = decompose("Only a title");
        assert_eq!(entry.title, "Only a title");
        assert_eq!(entry.view_count(), 0);
    }

    #[test]
    fn title_without_hashtags_keeps_trailing_punctuation() {
        let entry = decompose("Solo Title, 觀看次數：10次");
        assert_eq!(entry.title, "Solo Title,");
        assert_eq!(entry.raw_view_text, "觀看次數：10次");

        let entry = decompose("  Dash ending - ");
        assert_eq!(entry.title, "Dash ending -");
    }

    #[test]
    fn unicode_titles_and_tags() {
        let entry = decompose("貓咪跳躍 #貓 #可愛, 觀看次數：1.5億次");
        assert_eq!(entry.title, "貓咪跳躍");
        assert_eq!(entry.hashtags, vec!["#貓", "#可愛"]);
        assert_eq!(entry.view_count(), 150_000_000);
    }
}
