//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use scholar_papers_core::DEFAULT_LIMIT;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./papers";

/// Default delay between publications in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Download the most-cited papers of a Google Scholar profile.
///
/// Lists every publication on the profile, ranks them by citation count and
/// saves the PDFs of the top entries into one directory. Files already
/// present are skipped, so re-running resumes where a previous run stopped.
#[derive(Parser, Debug)]
#[command(name = "scholar-papers")]
#[command(author, version, about)]
pub struct Args {
    /// Profile URL, e.g. `https://scholar.google.com/citations?user=ABC123`
    pub profile_url: String,

    /// Directory the PDFs are written to (created if missing)
    #[arg(long = "output_dir", visible_alias = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of most-cited publications to download (0-1000; 0 downloads nothing)
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT as u64, value_parser = clap::value_parser!(u64).range(0..=1000))]
    pub limit: u64,

    /// Delay between publications in milliseconds (0 to disable, max 60000)
    #[arg(long, default_value_t = DEFAULT_DELAY_MS, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: u64,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
