//! CLI entry point for the scholar-papers tool.

use anyhow::Result;

mod app;
mod app_config;
mod cli;
mod output;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    app::runtime::run_scholar_papers().await
}
