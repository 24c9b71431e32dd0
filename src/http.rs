//! Shared HTTP client construction policy.
//!
//! The provider lister, the link discoverer and the downloader all build their
//! `reqwest` clients here so they agree on User-Agent, compression and
//! connect timeout. Each caller picks how its overall deadline is enforced.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::user_agent::BROWSER_USER_AGENT;

/// Connect timeout shared by every client.
pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 10;

/// How the per-client timeout is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeoutPolicy {
    /// Whole request (headers and body) must finish within the duration.
    Total(Duration),
    /// Each socket read must make progress within the duration; large
    /// bodies may take longer overall.
    PerRead(Duration),
}

/// Builds a client with the shared policy and the given timeout.
pub(crate) fn build_client(timeout: TimeoutPolicy) -> Result<Client, reqwest::Error> {
    let builder = base_builder();
    let builder = match timeout {
        TimeoutPolicy::Total(duration) => builder.timeout(duration),
        TimeoutPolicy::PerRead(duration) => builder.read_timeout(duration),
    };
    builder.build()
}

fn base_builder() -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .gzip(true)
        .user_agent(BROWSER_USER_AGENT)
}
