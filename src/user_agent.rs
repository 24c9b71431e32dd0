//! Shared User-Agent string for provider, landing-page and download clients.
//!
//! Single source so every request the tool makes presents the same agent.

/// Browser User-Agent sent with every request.
///
/// Profile pages and many publisher landing pages answer tool-identifying
/// agents with a captcha or a 403, so one fixed browser string is used.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
