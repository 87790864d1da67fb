use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::stats::Report;

/// Report text with keyword and hashtag tables cut to `top` rows. The
/// section headers are read back by other tools, keep them stable.
pub struct ReportText<'a> {
    pub report: &'a Report,
    pub top: usize,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        for (i, entry) in report.entries.iter().enumerate() {
            write!(
                f,
                "{}.\n{}\n{}\n{}\n\n",
                i + 1,
                entry.title,
                entry.hashtag_line(),
                entry.raw_view_text
            )?;
        }

        writeln!(f, "===== SUMMARY =====")?;
        writeln!(f, "Total videos: {}", report.entries.len())?;
        writeln!(f, "Total views: {}", report.total_views())?;
        writeln!(f, "Average views: {}", report.average_views())?;
        if let Some(entry) = report.highest() {
            writeln!(f, "Highest views video: {} ({})", entry.title, entry.raw_view_text)?;
        }
        if let Some(entry) = report.lowest() {
            writeln!(f, "Lowest views video: {} ({})", entry.title, entry.raw_view_text)?;
        }

        writeln!(f, "\n===== TOP KEYWORDS =====")?;
        for (word, count) in report.keywords.most_common(self.top) {
            writeln!(f, "{} ({})", word, count)?;
        }

        writeln!(f, "\n===== TOP HASHTAGS =====")?;
        for (tag, count) in report.hashtags.most_common(self.top) {
            writeln!(f, "{} ({})", tag, count)?;
        }

        writeln!(f, "\n===== VIEWS DISTRIBUTION =====")?;
        for (bucket, count) in report.histogram.iter().rev() {
            writeln!(f, "{}: {} videos", bucket.label(), count)?;
        }

        Ok(())
    }
}

pub fn render(report: &Report, top: usize) -> String {
    ReportText { report, top }.to_string()
}

/// Writes the rendered report, creating the parent directory and
/// overwriting any previous file.
pub fn write_report(path: &Path, report: &Report, top: usize) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir))?;
    }

    fs::write(path, render(report, top))
        .with_context(|| format!("Failed to write report {:?}", path))?;

    info!(action = "write", component = "report", path = ?path, entry_count = report.entries.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::config::Settings;

    fn report(fragments: &[&str]) -> Report {
        let settings = Settings::default();
        Aggregator::new(&settings.locale, &settings.stopwords)
            .unwrap()
            .aggregate(fragments)
    }

    #[test]
    fn renders_entries_and_summary() {
        let text = render(
            &report(&["Small one #a, 觀看次數：10次", "Big one #b #a, 觀看次數：1.2萬次"]),
            10,
        );
        let expected = "\
1.
Big one
#b #a
觀看次數：1.2萬次

2.
Small one
#a
觀看次數：10次

===== SUMMARY =====
Total videos: 2
Total views: 12010
Average views: 6005
Highest views video: Big one (觀看次數：1.2萬次)
Lowest views video: Small one (觀看次數：10次)

===== TOP KEYWORDS =====
one (2)
small (1)
big (1)

===== TOP HASHTAGS =====
#a (2)
#b (1)

===== VIEWS DISTRIBUTION =====
10M+: 0 videos
1M-10M: 0 videos
100k-1M: 0 videos
10k-100k: 1 videos
0-10k: 1 videos
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_report_omits_highest_and_lowest() {
        let text = render(&report(&[]), 10);
        assert!(text.starts_with("===== SUMMARY =====\nTotal videos: 0\nTotal views: 0\nAverage views: 0\n\n"));
        assert!(!text.contains("Highest views video"));
        assert!(text.ends_with("0-10k: 0 videos\n"));
    }

    #[test]
    fn huge_view_counts_sum_without_overflow() {
        let text = render(
            &report(&[
                "Viral #a, 觀看次數：1000000000000億次",
                "Also viral #b, 觀看次數：1000000000000億次",
            ]),
            10,
        );
        assert!(text.contains(
            "Total views: 200000000000000000000\nAverage views: 100000000000000000000\n"
        ));
        assert!(text.contains("10M+: 2 videos\n"));
    }

    #[test]
    fn top_limits_tables() {
        let fragments: Vec<String> = (0..15)
            .map(|i| format!("word{} #tag{}, 觀看次數：{}次", i, i, i))
            .collect();
        let fragments: Vec<&str> = fragments.iter().map(String::as_str).collect();
        let text = render(&report(&fragments), 10);
        assert_eq!(text.matches(" (1)\n").count(), 20);

        let text = render(&report(&fragments), 3);
        assert_eq!(text.matches(" (1)\n").count(), 6);
    }
}
