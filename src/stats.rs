use std::collections::HashMap;

use crate::decompose::VideoEntry;

/// Token counts that remember first-encounter order, so equal counts rank
/// in the order they were first seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewBucket {
    UnderTenThousand,
    UnderHundredThousand,
    UnderMillion,
    UnderTenMillion,
    TenMillionPlus,
}

impl ViewBucket {
    /// Ascending order.
    pub const ALL: [ViewBucket; 5] = [
        ViewBucket::UnderTenThousand,
        ViewBucket::UnderHundredThousand,
        ViewBucket::UnderMillion,
        ViewBucket::UnderTenMillion,
        ViewBucket::TenMillionPlus,
    ];

    pub fn of(views: u128) -> Self {
        match views {
            0..=9_999 => ViewBucket::UnderTenThousand,
            10_000..=99_999 => ViewBucket::UnderHundredThousand,
            100_000..=999_999 => ViewBucket::UnderMillion,
            1_000_000..=9_999_999 => ViewBucket::UnderTenMillion,
            _ => ViewBucket::TenMillionPlus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewBucket::UnderTenThousand => "0-10k",
            ViewBucket::UnderHundredThousand => "10k-100k",
            ViewBucket::UnderMillion => "100k-1M",
            ViewBucket::UnderTenMillion => "1M-10M",
            ViewBucket::TenMillionPlus => "10M+",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewHistogram {
    counts: [usize; 5],
}

impl ViewHistogram {
    pub fn record(&mut self, views: u128) {
        self.counts[ViewBucket::of(views).slot()] += 1;
    }

    pub fn count(&self, bucket: ViewBucket) -> usize {
        self.counts[bucket.slot()]
    }

    /// Buckets with their counts, ascending.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ViewBucket, usize)> + '_ {
        ViewBucket::ALL.into_iter().map(|b| (b, self.count(b)))
    }
}

/// Everything extracted from one page, ready to be written out.
#[derive(Debug)]
pub struct Report {
    /// Sorted by view count, highest first.
    pub entries: Vec<VideoEntry>,
    pub keywords: FrequencyTable,
    pub hashtags: FrequencyTable,
    pub histogram: ViewHistogram,
}

impl Report {
    /// Saturates instead of overflowing.
    pub fn total_views(&self) -> u128 {
        self.entries
            .iter()
            .map(VideoEntry::view_count)
            .fold(0, u128::saturating_add)
    }

    pub fn average_views(&self) -> u128 {
        match self.entries.len() as u128 {
            0 => 0,
            n => self.total_views() / n,
        }
    }

    pub fn highest(&self) -> Option<&VideoEntry> {
        self.entries.first()
    }

    pub fn lowest(&self) -> Option<&VideoEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ViewParse;

    #[test]
    fn most_common_breaks_ties_by_first_seen() {
        let mut table = FrequencyTable::new();
        for token in ["b", "a", "c", "a", "c", "d"] {
            table.add(token);
        }
        assert_eq!(table.most_common(3), vec![("a", 2), ("c", 2), ("b", 1)]);
        assert_eq!(table.most_common(10).last(), Some(&("d", 1)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn total_views_saturates() {
        let entry = |views| VideoEntry {
            title: String::new(),
            hashtags: Vec::new(),
            raw_view_text: String::new(),
            views: ViewParse::Parsed(views),
        };
        let report = Report {
            entries: vec![entry(u128::MAX), entry(u128::MAX)],
            keywords: FrequencyTable::new(),
            hashtags: FrequencyTable::new(),
            histogram: ViewHistogram::default(),
        };
        assert_eq!(report.total_views(), u128::MAX);
        assert_eq!(report.average_views(), u128::MAX / 2);
    }

    #[test]
    fn buckets_have_half_open_bounds() {
        assert_eq!(ViewBucket::of(0), ViewBucket::UnderTenThousand);
        assert_eq!(ViewBucket::of(9_999), ViewBucket::UnderTenThousand);
        assert_eq!(ViewBucket::of(10_000), ViewBucket::UnderHundredThousand);
        assert_eq!(ViewBucket::of(1_000_000), ViewBucket::UnderTenMillion);
        assert_eq!(ViewBucket::of(10_000_000), ViewBucket::TenMillionPlus);
    }

    #[test]
    fn histogram_places_each_value_once() {
        let mut histogram = ViewHistogram::default();
        for views in [5, 15_000, 150_000, 5_000_000, 50_000_000] {
            histogram.record(views);
        }
        assert!(histogram.iter().all(|(_, count)| count == 1));
        assert_eq!(
            histogram.iter().rev().map(|(b, _)| b.label()).collect::<Vec<_>>(),
            vec!["10M+", "1M-10M", "100k-1M", "10k-100k", "0-10k"]
        );
    }
}
