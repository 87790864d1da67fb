use std::collections::HashSet;
use std::time::Instant;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::decompose::Decomposer;
use crate::stats::{FrequencyTable, Report, ViewHistogram};
use crate::views::ViewLocale;

/// Turns raw fragments into a sorted, summarized [`Report`].
pub struct Aggregator {
    decomposer: Decomposer,
    word: Regex,
    stopwords: HashSet<String>,
}

impl Aggregator {
    pub fn new(locale: &ViewLocale, stopwords: &[String]) -> Result<Self> {
        let word = Regex::new(r"\b\w+\b").context("Failed to compile word pattern")?;
        Ok(Self {
            decomposer: Decomposer::new(locale)?,
            word,
            stopwords: stopwords.iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    /// Lowercased title words minus stopwords.
    pub fn keywords(&self, title: &str) -> Vec<String> {
        let lowered = title.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(*w))
            .map(String::from)
            .collect()
    }

    pub fn aggregate<S: AsRef<str>>(&self, fragments: &[S]) -> Report {
        let start_time = Instant::now();

        let mut keywords = FrequencyTable::new();
        let mut hashtags = FrequencyTable::new();
        let mut entries = Vec::with_capacity(fragments.len());

        for fragment in fragments {
            let entry = self.decomposer.decompose(fragment.as_ref());
            for word in self.keywords(&entry.title) {
                keywords.add(&word);
            }
            for tag in self.decomposer.hashtags(&entry.hashtag_line()) {
                hashtags.add(tag);
            }
            entries.push(entry);
        }

        // Stable: equal counts keep extraction order.
        entries.sort_by(|a, b| b.view_count().cmp(&a.view_count()));

        let mut histogram = ViewHistogram::default();
        for entry in &entries {
            histogram.record(entry.view_count());
        }

        info!(
            action = "complete",
            component = "aggregation",
            entry_count = entries.len(),
            keyword_count = keywords.len(),
            hashtag_count = hashtags.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Aggregated entries"
        );

        Report {
            entries,
            keywords,
            hashtags,
            histogram,
        }
    }
}
