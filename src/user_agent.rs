//! Default request headers for discovery and download traffic.

use std::collections::BTreeMap;

/// Browser User-Agent sent by default.
///
/// Listing pages that host document archives commonly reject non-browser
/// agents, so both discovery and download requests identify as a desktop
/// browser unless the caller supplies its own header set.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Header set used when none is configured: just the browser User-Agent.
#[must_use]
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("User-Agent".to_string(), BROWSER_USER_AGENT.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_only_carry_user_agent() {
        let headers = default_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("User-Agent").map(String::as_str),
            Some(BROWSER_USER_AGENT)
        );
    }

    #[test]
    fn test_browser_user_agent_looks_like_chrome() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(BROWSER_USER_AGENT.contains("Chrome/"));
    }
}
