use std::time::Duration;

/// Per-request deadline for upstream calls.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest client whose requests abort after `timeout`. Redirects keep reqwest's default policy.
pub fn make_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_default_deadline() {
        assert!(make_http_client(UPSTREAM_TIMEOUT).is_ok());
    }
}
