use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use scholar_papers_core::download::DEFAULT_DOWNLOAD_TIMEOUT;
use scholar_papers_core::scholar::{DEFAULT_PROVIDER_TIMEOUT, DEFAULT_SCHOLAR_BASE_URL};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which arguments were typed on the command line rather than defaulted.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) output_dir: bool,
    pub(crate) limit: bool,
    pub(crate) delay_ms: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

/// Network settings that only the config file can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NetworkSettings {
    pub(crate) page_timeout: Duration,
    pub(crate) download_timeout: Duration,
    pub(crate) scholar_base_url: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            page_timeout: DEFAULT_PROVIDER_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            scholar_base_url: DEFAULT_SCHOLAR_BASE_URL.to_string(),
        }
    }
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        output_dir: is_commandline_value(matches, "output_dir"),
        limit: is_commandline_value(matches, "limit"),
        delay_ms: is_commandline_value(matches, "delay_ms"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills every argument not given on the command line from the config file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    if !cli_sources.output_dir
        && let Some(output_dir) = &file_config.output_dir
    {
        args.output_dir = output_dir.clone();
    }

    if !cli_sources.limit
        && let Some(limit) = file_config.limit
    {
        args.limit = limit;
    }

    if !cli_sources.delay_ms
        && let Some(delay_ms) = file_config.delay_ms
    {
        args.delay_ms = delay_ms;
    }

    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.verbosity
    {
        apply_config_verbosity(&mut args, verbosity);
    }

    args
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    let (quiet, verbose) = match verbosity {
        VerbositySetting::Default => (false, 0),
        VerbositySetting::Verbose => (false, 1),
        VerbositySetting::Quiet => (true, 0),
        VerbositySetting::Debug => (false, 2),
    };
    args.quiet = quiet;
    args.verbose = verbose;
}

pub(crate) fn resolve_network_settings(file_config: Option<&FileConfig>) -> NetworkSettings {
    let mut settings = NetworkSettings::default();
    let Some(file_config) = file_config else {
        return settings;
    };

    if let Some(secs) = file_config.page_timeout_secs {
        settings.page_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file_config.download_timeout_secs {
        settings.download_timeout = Duration::from_secs(secs);
    }
    if let Some(base) = &file_config.scholar_base_url {
        settings.scholar_base_url.clone_from(base);
    }
    settings
}

pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn should_force_cli_log_level(cli_sources: &CliValueSources) -> bool {
    cli_sources.verbose || cli_sources.quiet
}
