//! Run summary rendering for stdout.

use anyhow::Result;
use scholar_papers_core::{DownloadResult, DownloadStatus, RunSummary};
use serde::Serialize;

/// Machine-readable report printed by `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonReport<'a> {
    output_dir: String,
    attempted: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    results: &'a [DownloadResult],
}

impl<'a> JsonReport<'a> {
    pub(crate) fn from_summary(summary: &'a RunSummary) -> Self {
        Self {
            output_dir: summary.output_dir.display().to_string(),
            attempted: summary.attempted(),
            succeeded: summary.succeeded(),
            skipped: summary.skipped(),
            failed: summary.failed(),
            results: &summary.results,
        }
    }
}

/// Final line: PDFs on disk over publications attempted.
pub(crate) fn summary_line(summary: &RunSummary) -> String {
    let mut line = format!(
        "Downloaded {}/{} papers to {}",
        summary.available(),
        summary.attempted(),
        summary.output_dir.display()
    );
    if summary.skipped() > 0 || summary.failed() > 0 {
        line.push_str(&format!(
            " ({} new, {} already present, {} failed)",
            summary.succeeded(),
            summary.skipped(),
            summary.failed()
        ));
    }
    line
}

pub(crate) fn failure_lines(summary: &RunSummary) -> Vec<String> {
    summary
        .results
        .iter()
        .filter(|result| result.status == DownloadStatus::Failed)
        .map(|result| {
            format!(
                "  failed: {}: {}",
                result.title,
                result.error.as_deref().unwrap_or("unknown error")
            )
        })
        .collect()
}

pub(crate) fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonReport::from_summary(summary))?
        );
        return Ok(());
    }

    for line in failure_lines(summary) {
        println!("{line}");
    }
    println!("{}", summary_line(summary));
    Ok(())
}
