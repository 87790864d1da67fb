use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::views::ViewLocale;

pub const UNKNOWN_CHANNEL: &str = "UnknownChannel";

/// One markup shape that yields raw per-video fragments.
///
/// A miss is never an error: an unrecognized document just produces
/// no fragments.
pub trait FragmentExtractor {
    fn name(&self) -> &'static str;
    fn extract(&self, html: &str) -> Vec<String>;
}

/// `"entityId":"…","accessibilityText":"…"` pairs from the embedded page
/// data. The accessibility text already holds title, hashtags and views.
pub struct AccessibilityText {
    pattern: Regex,
}

impl AccessibilityText {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r#""entityId":"[^"]+","accessibilityText":"(.*?)""#)
            .context("Failed to compile accessibility text pattern")?;
        Ok(Self { pattern })
    }
}

impl FragmentExtractor for AccessibilityText {
    fn name(&self) -> &'static str {
        "accessibility_text"
    }

    fn extract(&self, html: &str) -> Vec<String> {
        self.pattern
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Rendered Shorts grid: a heading wrapping a `/shorts/<id>` link with a
/// `title` attribute, followed in the same block by a view phrase. A block
/// ends where the next such heading starts.
pub struct ShortsHeading {
    heading: Regex,
    title: Regex,
    views: Regex,
    home_sentinels: Vec<String>,
}

impl ShortsHeading {
    pub fn new(locale: &ViewLocale, home_sentinels: &[String]) -> Result<Self> {
        let heading = Regex::new(
            r#"(?s)<h[1-6]\b[^>]*>\s*(?:<[^>/][^>]*>\s*)*?<a\s([^>]*\bhref="[^"]*/shorts/[^"]*"[^>]*)>"#,
        )
        .context("Failed to compile shorts heading pattern")?;
        let title = Regex::new(r#"\btitle="([^"]*)""#)
            .context("Failed to compile title attribute pattern")?;
        let views = Regex::new(&locale.phrase_pattern())
            .context("Failed to compile view phrase pattern")?;

        Ok(Self {
            heading,
            title,
            views,
            home_sentinels: home_sentinels.to_vec(),
        })
    }
}

impl FragmentExtractor for ShortsHeading {
    fn name(&self) -> &'static str {
        "shorts_heading"
    }

    fn extract(&self, html: &str) -> Vec<String> {
        let headings: Vec<_> = self.heading.captures_iter(html).collect();
        let mut fragments = Vec::new();

        for (i, caps) in headings.iter().enumerate() {
            let (Some(whole), Some(attrs)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let block_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(html.len(), |next| next.start());

            let Some(views) = self.views.find(&html[whole.end()..block_end]) else {
                continue;
            };
            let Some(title) = self
                .title
                .captures(attrs.as_str())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
            else {
                continue;
            };

            if title.is_empty() || self.home_sentinels.iter().any(|s| s == title) {
                debug!(action = "skip", component = "shorts_heading", title, "Skipping navigation heading");
                continue;
            }

            fragments.push(format!("{} {}", title, views.as_str()));
        }

        fragments
    }
}

/// Runs every registered shape over a document and concatenates the
/// results, in registration order.
pub struct Extractor {
    strategies: Vec<Box<dyn FragmentExtractor>>,
    channel: Regex,
}

impl Extractor {
    /// An extractor with no shapes registered.
    pub fn empty() -> Result<Self> {
        let channel = Regex::new(r#""originalUrl":"https://www\.youtube\.com/(@[^"/]+)"#)
            .context("Failed to compile channel pattern")?;
        Ok(Self {
            strategies: Vec::new(),
            channel,
        })
    }

    /// Both known shapes: accessibility text first, then rendered headings.
    pub fn new(locale: &ViewLocale, home_sentinels: &[String]) -> Result<Self> {
        Ok(Self::empty()?
            .with_strategy(AccessibilityText::new()?)
            .with_strategy(ShortsHeading::new(locale, home_sentinels)?))
    }

    pub fn with_strategy(mut self, strategy: impl FragmentExtractor + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn fragments(&self, html: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.extract(html);
            debug!(
                action = "extract",
                component = strategy.name(),
                fragment_count = found.len(),
                "Extracted fragments"
            );
            fragments.extend(found);
        }
        fragments
    }

    pub fn channel_handle(&self, html: &str) -> String {
        self.channel
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string())
    }
}
