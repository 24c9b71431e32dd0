//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use url::Url;

/// Largest accepted `limit`.
pub const MAX_LIMIT: u64 = 1000;

/// Largest accepted delay between publications, in milliseconds.
pub const MAX_DELAY_MS: u64 = 60_000;

/// TOML-backed file configuration for scholar-papers defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default output directory for PDFs.
    pub output_dir: Option<PathBuf>,
    /// Default number of publications to fetch.
    pub limit: Option<u64>,
    /// Delay between publications in milliseconds.
    pub delay_ms: Option<u64>,
    /// Timeout for provider and landing page requests, in seconds.
    pub page_timeout_secs: Option<u64>,
    /// Per-read timeout for PDF downloads, in seconds.
    pub download_timeout_secs: Option<u64>,
    /// Base URL of the metadata provider.
    pub scholar_base_url: Option<String>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit
            && limit > MAX_LIMIT
        {
            bail!("Invalid config value for `limit`: {limit}. Expected range: 0..={MAX_LIMIT}");
        }

        if let Some(delay_ms) = self.delay_ms
            && delay_ms > MAX_DELAY_MS
        {
            bail!(
                "Invalid config value for `delay_ms`: {delay_ms}. Expected range: 0..={MAX_DELAY_MS}"
            );
        }
        validate_timeout_secs("page_timeout_secs", self.page_timeout_secs)?;
        validate_timeout_secs("download_timeout_secs", self.download_timeout_secs)?;

        if let Some(base) = &self.scholar_base_url {
            let parsed = Url::parse(base)
                .with_context(|| format!("Invalid config value for `scholar_base_url`: '{base}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!(
                    "Invalid config value for `scholar_base_url`: '{base}'. Expected an http or https URL"
                );
            }
        }

        Ok(())
    }

    /// Label of the configured verbosity, or `"unset"`.
    #[must_use]
    pub fn verbosity_label(&self) -> &'static str {
        self.verbosity.map_or("unset", VerbositySetting::as_str)
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/scholar-papers/config.toml`
/// 2. `$HOME/.config/scholar-papers/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("scholar-papers")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("scholar-papers")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "output_dir" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "limit" => {
                cfg.limit = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "delay_ms" => {
                cfg.delay_ms = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "page_timeout_secs" => {
                cfg.page_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "download_timeout_secs" => {
                cfg.download_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "scholar_base_url" => {
                cfg.scholar_base_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
