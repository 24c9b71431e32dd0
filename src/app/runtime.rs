use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use scholar_papers_core::{
    LinkDiscoverer, Orchestrator, PdfDownloader, PipelineSettings, ScholarSource,
};
use tracing::{debug, info};

use crate::app::{config_runtime, terminal};
use crate::app_config;
use crate::output;

pub(crate) async fn run_scholar_papers() -> Result<()> {
    let (args, cli_sources) = config_runtime::parse_cli_with_sources();

    let loaded = app_config::load_default_file_config()?;
    let file_config = loaded.config.as_ref();
    let args = config_runtime::apply_config_defaults(args, &cli_sources, file_config);

    let dumb_terminal = terminal::is_dumb_terminal();
    terminal::init_tracing(
        config_runtime::resolve_default_log_level(&args),
        config_runtime::should_force_cli_log_level(&cli_sources),
        terminal::should_disable_color(terminal::no_color_env_requested(), dumb_terminal),
    );

    if let Some(config) = file_config
        && let Some(path) = &loaded.path
    {
        debug!(
            path = %path.display(),
            verbosity = config.verbosity_label(),
            "loaded config file"
        );
    }
    debug!(?args, "CLI arguments resolved");
    info!("scholar-papers starting");

    let network = config_runtime::resolve_network_settings(file_config);
    let show_progress =
        terminal::should_show_progress(io::stderr().is_terminal(), args.quiet, dumb_terminal);

    let source = ScholarSource::new(&network.scholar_base_url, network.page_timeout)
        .context("Failed to set up the metadata provider")?;
    let discoverer = LinkDiscoverer::new(network.page_timeout)
        .context("Failed to set up landing page client")?;
    let downloader = PdfDownloader::new(network.download_timeout)
        .context("Failed to set up download client")?
        .with_progress(show_progress);

    let settings = PipelineSettings {
        output_dir: args.output_dir.clone(),
        limit: usize::try_from(args.limit).context("limit does not fit this platform")?,
        delay: Duration::from_millis(args.delay_ms),
    };

    let orchestrator = Orchestrator::new(Box::new(source), discoverer, downloader, settings);
    let summary = orchestrator.run(&args.profile_url).await?;

    output::print_summary(&summary, args.json)
}
