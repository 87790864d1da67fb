use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::aggregate::Aggregator;
use crate::config::Settings;
use crate::editor;
use crate::extract::Extractor;
use crate::report;
use crate::stats::Report;

#[derive(Debug)]
pub struct DocumentResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub channel: String,
    pub video_count: usize,
    pub total_views: u128,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<DocumentResult>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

pub struct Pipeline {
    settings: Settings,
    extractor: Extractor,
    aggregator: Aggregator,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Result<Self> {
        let extractor = Extractor::new(&settings.locale, &settings.home_sentinels)?;
        let aggregator = Aggregator::new(&settings.locale, &settings.stopwords)?;
        Ok(Self {
            settings,
            extractor,
            aggregator,
        })
    }

    /// Channel handle and aggregated report for one page.
    pub fn analyze_html(&self, html: &str) -> (String, Report) {
        let channel = self.extractor.channel_handle(html);
        let fragments = self.extractor.fragments(html);
        info!(
            action = "extract",
            component = "pipeline",
            channel = channel.as_str(),
            fragment_count = fragments.len(),
            "Extracted fragments"
        );
        (channel, self.aggregator.aggregate(&fragments))
    }

    pub fn output_path(&self, channel: &str) -> PathBuf {
        self.settings
            .output_dir
            .join(format!("result_{}.txt", channel))
    }

    pub fn process_document(&self, path: &Path) -> Result<DocumentResult> {
        let start_time = Instant::now();
        info!(action = "start", component = "document", path = ?path, "Processing document");

        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {:?}", path))?;
        let (channel, report) = self.analyze_html(&html);

        let output = self.output_path(&channel);
        report::write_report(&output, &report, self.settings.top)?;

        info!(
            action = "complete",
            component = "document",
            path = ?path,
            duration_ms = start_time.elapsed().as_millis(),
            "Document processed"
        );

        Ok(DocumentResult {
            source: path.to_path_buf(),
            output,
            channel,
            video_count: report.entries.len(),
            total_views: report.total_views(),
        })
    }

    /// Processes every document independently; one failure does not stop
    /// the rest.
    pub fn run_batch(&self, inputs: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for path in inputs {
            match self.process_document(path) {
                Ok(result) => {
                    if let Some(previous) = claimed.insert(result.output.clone(), path.clone()) {
                        warn!(
                            action = "write",
                            component = "report",
                            output = ?result.output,
                            previous = ?previous,
                            "Report overwrote one written earlier in this run"
                        );
                    }
                    if let Some(editor) = self.settings.editor.as_deref().filter(|e| !e.is_empty()) {
                        editor::open_in_editor(editor, &result.output);
                    }
                    summary.written.push(result);
                }
                Err(e) => {
                    error!(action = "fail", component = "document", path = ?path, error = %format!("{:#}", e), "Document failed");
                    summary.failed.push((path.clone(), e));
                }
            }
        }

        summary
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// A single file is taken as-is; a directory contributes its `.html`/`.htm`
/// files (not recursive), sorted by path.
pub fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.exists() {
        warn!(action = "discover", component = "input", path = ?input, "Input path does not exist");
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(input).with_context(|| format!("Failed to read directory {:?}", input))? {
        let path = entry?.path();
        if path.is_file() && is_html(&path) {
            documents.push(path);
        }
    }
    documents.sort();

    info!(action = "discover", component = "input", path = ?input, document_count = documents.len(), "Discovered documents");
    Ok(documents)
}

pub fn print_batch_results(summary: &BatchSummary) {
    for result in &summary.written {
        println!("✅ Parsing completed, output saved to {}", result.output.display());
        println!(
            "   {} ({}): {} videos, {} total views",
            result.channel,
            result.source.display(),
            crate::utils::format_number(result.video_count as u128),
            crate::utils::format_number(result.total_views)
        );
    }

    for (path, e) in &summary.failed {
        println!("❌ {}: {:#}", path.display(), e);
    }

    if summary.written.len() + summary.failed.len() > 1 {
        println!(
            "\n{} reports written, {} documents failed",
            summary.written.len(),
            summary.failed.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_channel_handle() {
        let settings = Settings {
            output_dir: PathBuf::from("out"),
            ..Settings::default()
        };
        let pipeline = Pipeline::new(settings).unwrap();
        assert_eq!(pipeline.output_path("@chan"), PathBuf::from("out/result_@chan.txt"));
    }

    #[test]
    fn html_extensions() {
        assert!(is_html(Path::new("a/page.html")));
        assert!(is_html(Path::new("page.HTM")));
        assert!(!is_html(Path::new("notes.txt")));
        assert!(!is_html(Path::new("html")));
    }

    #[test]
    fn analyze_without_matches_is_empty() {
        let pipeline = Pipeline::new(Settings::default()).unwrap();
        let (channel, report) = pipeline.analyze_html("<html><body>nothing here</body></html>");
        assert_eq!(channel, "UnknownChannel");
        assert!(report.entries.is_empty());
    }
}
